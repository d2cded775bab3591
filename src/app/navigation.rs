use super::*;

impl App {
    // === 커서 이동 ===

    pub(super) fn move_selection(&mut self, delta: isize) {
        let rows = self.visible_rows;
        let panel = self.active_panel_state_mut();
        panel.move_selection(delta);
        panel.adjust_scroll(rows);
    }

    pub(super) fn go_to_top(&mut self) {
        let rows = self.visible_rows;
        let panel = self.active_panel_state_mut();
        panel.select_first();
        panel.adjust_scroll(rows);
    }

    pub(super) fn go_to_bottom(&mut self) {
        let rows = self.visible_rows;
        let panel = self.active_panel_state_mut();
        panel.select_last();
        panel.adjust_scroll(rows);
    }

    // === 폴더 이동 ===

    /// 패널 폴더 변경. 잠긴 탭이거나 목록을 읽지 못하면 false
    pub(crate) fn change_folder(&mut self, side: ActivePanel, target: VfsPath) -> bool {
        if self.tabs(side).is_active_locked() {
            self.set_toast("Tab is locked");
            return false;
        }
        let rows = self.visible_rows;
        let result = {
            let filesystem = &self.filesystem;
            let tabs = match side {
                ActivePanel::Left => &mut self.left_tabs,
                ActivePanel::Right => &mut self.right_tabs,
            };
            tabs.active_mut().change_directory(target.clone(), filesystem)
        };
        match result {
            Ok(()) => {
                self.tabs_mut(side).active_mut().adjust_scroll(rows);
                tracing::debug!(path = %target, "folder changed");
                true
            }
            Err(e) => {
                self.report_error("Cannot open folder", &e);
                false
            }
        }
    }

    /// 상위 폴더로 이동, 이전 폴더에 커서 위치
    pub(super) fn go_to_parent(&mut self) {
        let current = self.active_panel_state().current_path.clone();
        let Some(parent) = current.parent() else {
            return;
        };
        if self.change_folder(self.active_panel, parent) {
            let rows = self.visible_rows;
            let panel = self.active_panel_state_mut();
            panel.select_by_name(&current.name());
            panel.adjust_scroll(rows);
        }
    }

    /// 선택 항목 열기 (디렉토리, 압축 파일, "..")
    pub(super) fn open_selected(&mut self) {
        if self.active_panel_state().is_parent_selected() {
            self.go_to_parent();
            return;
        }
        let Some((name, target)) = self
            .active_panel_state()
            .selected_entry()
            .map(|entry| (entry.name.clone(), entry.browse_target()))
        else {
            return;
        };
        match target {
            Some(target) => {
                self.change_folder(self.active_panel, target);
            }
            None => self.set_toast(&format!("{} is not a folder or archive", name)),
        }
    }

    /// 활성 패널의 선택 항목이 가리키는 폴더
    fn selected_browse_target(&self) -> Option<VfsPath> {
        let panel = self.active_panel_state();
        if panel.is_parent_selected() {
            return panel.current_path.parent();
        }
        panel.selected_entry().and_then(|entry| entry.browse_target())
    }

    /// 선택 항목을 반대쪽 패널에서 열기
    pub(super) fn open_in_other_panel(&mut self) {
        match self.selected_browse_target() {
            Some(target) => {
                self.change_folder(self.active_panel.other(), target);
            }
            None => self.set_toast("Select a folder or archive"),
        }
    }

    /// "양쪽 패널에서 열기" 가능 여부
    ///
    /// 선택 항목이 열 수 있는 것이고 반대쪽 탭이 잠겨 있지 않아야 한다.
    pub fn can_open_in_both_panels(&self) -> bool {
        let panel = self.active_panel_state();
        let browsable = panel.is_parent_selected()
            || panel
                .selected_entry()
                .is_some_and(|entry| self.filesystem.is_browsable(entry));
        browsable && !self.tabs(self.active_panel.other()).is_active_locked()
    }

    /// 선택 항목을 활성 패널에서 열고, 반대쪽 패널에서도 같은 이름을 연다
    ///
    /// 반대쪽은 ".."이면 상위 폴더로, 아니면 같은 이름(대소문자 무시)의
    /// 열 수 있는 항목이 있을 때만 이동한다.
    pub(super) fn open_in_both_panels(&mut self) {
        if !self.can_open_in_both_panels() {
            return;
        }

        let active = self.active_panel_state();
        let parent_selected = active.is_parent_selected();
        let selected_name = active.selected_entry().map(|entry| entry.name.clone());

        let other_side = self.active_panel.other();
        let other_target = {
            let other = self.tabs(other_side).active();
            if parent_selected {
                other.current_path.parent()
            } else {
                selected_name
                    .as_deref()
                    .and_then(|name| other.find_by_name_ignore_case(name))
                    .filter(|entry| self.filesystem.is_browsable(entry))
                    .and_then(|entry| entry.browse_target())
            }
        };

        self.open_selected();
        if let Some(target) = other_target {
            self.change_folder(other_side, target);
        }
    }

    pub(super) fn switch_panel(&mut self) {
        self.active_panel.toggle();
    }

    /// 반대쪽 패널을 활성 패널과 같은 폴더로
    pub(super) fn set_same_folder(&mut self) {
        let path = self.active_panel_state().current_path.clone();
        self.change_folder(self.active_panel.other(), path);
    }

    /// 양쪽 패널 폴더 교환
    pub(super) fn swap_folders(&mut self) {
        if self.left_tabs.is_active_locked() || self.right_tabs.is_active_locked() {
            self.set_toast("Tab is locked");
            return;
        }
        let left = self.left_tabs.active().current_path.clone();
        let right = self.right_tabs.active().current_path.clone();
        if self.change_folder(ActivePanel::Left, right) && !self.change_folder(ActivePanel::Right, left.clone()) {
            // 오른쪽 실패 시 왼쪽도 되돌린다
            self.change_folder(ActivePanel::Left, left);
        }
    }

    // === 탭 ===

    pub(super) fn new_tab(&mut self) {
        let side = self.active_panel;
        if self.tabs_mut(side).create_tab() {
            let index = self.tabs(side).active_index() + 1;
            self.set_toast(&format!("Tab {} opened", index));
        } else {
            self.set_toast(&format!("Max {} tabs per panel", MAX_TABS));
        }
    }

    pub(super) fn close_tab(&mut self) {
        let side = self.active_panel;
        let locked = self.tabs(side).is_active_locked();
        if self.tabs_mut(side).close_active_tab() {
            self.set_toast("Tab closed");
        } else if locked {
            self.set_toast("Tab is locked");
        } else {
            self.set_toast("Cannot close last tab");
        }
    }

    pub(super) fn next_tab(&mut self) {
        let side = self.active_panel;
        self.tabs_mut(side).next_tab();
    }

    pub(super) fn previous_tab(&mut self) {
        let side = self.active_panel;
        self.tabs_mut(side).prev_tab();
    }

    pub(super) fn toggle_lock_tab(&mut self) {
        let side = self.active_panel;
        if self.tabs_mut(side).toggle_lock() {
            self.set_toast("Tab locked");
        } else {
            self.set_toast("Tab unlocked");
        }
    }

    // === 선택 ===

    /// 마킹 토글 후 다음 행으로
    pub(super) fn toggle_mark(&mut self) {
        if self.active_panel_state_mut().toggle_mark_selected() {
            self.move_selection(1);
        }
    }

    // === 보기 ===

    /// 숨김 파일 표시 토글 (모든 패널, 모든 탭)
    pub(super) fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        let show_hidden = self.show_hidden;
        let filesystem = &self.filesystem;
        for panel in self.left_tabs.panels_mut().chain(self.right_tabs.panels_mut()) {
            panel.show_hidden = show_hidden;
            if let Err(e) = panel.refresh(filesystem) {
                tracing::warn!(path = %panel.current_path, error = %e, "refresh failed");
            }
        }
        self.set_toast(if show_hidden {
            "Hidden files shown"
        } else {
            "Hidden files hidden"
        });
    }

    pub(super) fn sort_active_panel(&mut self, sort_by: SortBy) {
        let panel = self.active_panel_state_mut();
        panel.set_sort(sort_by);
        let indicator = panel.sort_indicator();
        self.set_toast(&format!("Sort: {}", indicator));
    }

    pub(super) fn reverse_sort_order(&mut self) {
        let panel = self.active_panel_state_mut();
        panel.reverse_order();
        let indicator = panel.sort_indicator();
        self.set_toast(&format!("Sort: {}", indicator));
    }

    /// 양쪽 패널의 활성 탭 새로고침
    pub(crate) fn refresh_all(&mut self) {
        let rows = self.visible_rows;
        for side in [ActivePanel::Left, ActivePanel::Right] {
            let result = {
                let filesystem = &self.filesystem;
                let tabs = match side {
                    ActivePanel::Left => &mut self.left_tabs,
                    ActivePanel::Right => &mut self.right_tabs,
                };
                tabs.active_mut().refresh(filesystem)
            };
            match result {
                Ok(()) => self.tabs_mut(side).active_mut().adjust_scroll(rows),
                Err(e) => self.recover_missing_folder(side, e),
            }
        }
    }

    /// 현재 폴더가 사라졌으면 존재하는 상위 폴더로 올라간다
    fn recover_missing_folder(&mut self, side: ActivePanel, error: MuError) {
        tracing::warn!(error = %error, "refresh failed");
        let mut candidate = self.tabs(side).active().current_path.parent();
        while let Some(path) = candidate {
            if self.filesystem.exists_as_folder(&path) {
                let filesystem = &self.filesystem;
                let tabs = match side {
                    ActivePanel::Left => &mut self.left_tabs,
                    ActivePanel::Right => &mut self.right_tabs,
                };
                if tabs.active_mut().change_directory(path.clone(), filesystem).is_ok() {
                    return;
                }
            }
            candidate = path.parent();
        }
    }
}
