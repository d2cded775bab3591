use crate::models::panel_state::PanelState;
use crate::vfs::VfsPath;

/// 패널당 최대 탭 수
pub const MAX_TABS: usize = 5;

/// 탭 하나
#[derive(Debug, Clone)]
pub struct Tab {
    pub panel: PanelState,
    /// 잠긴 탭은 폴더를 바꿀 수 없다
    pub locked: bool,
}

/// 패널별 탭 상태
#[derive(Debug, Clone)]
pub struct PanelTabs {
    tabs: Vec<Tab>,
    active_index: usize,
}

impl PanelTabs {
    /// 초기 탭 1개로 생성
    pub fn new(initial: PanelState) -> Self {
        Self {
            tabs: vec![Tab {
                panel: initial,
                locked: false,
            }],
            active_index: 0,
        }
    }

    /// 활성 탭 상태 반환
    pub fn active(&self) -> &PanelState {
        &self.tabs[self.active_index].panel
    }

    /// 활성 탭 상태 반환 (mutable)
    pub fn active_mut(&mut self) -> &mut PanelState {
        &mut self.tabs[self.active_index].panel
    }

    pub fn is_active_locked(&self) -> bool {
        self.tabs[self.active_index].locked
    }

    /// 활성 탭 잠금 토글, 변경 후 상태 반환
    pub fn toggle_lock(&mut self) -> bool {
        let tab = &mut self.tabs[self.active_index];
        tab.locked = !tab.locked;
        tab.locked
    }

    /// 탭 개수
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// 활성 탭 인덱스
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// 활성 탭을 복제해 바로 뒤에 새 탭 생성 + 활성화
    ///
    /// 최대 탭 수 초과 시 false. 새 탭은 잠기지 않은 상태로 시작한다.
    pub fn create_tab(&mut self) -> bool {
        if self.tabs.len() >= MAX_TABS {
            return false;
        }
        let mut panel = self.active().clone();
        panel.marked.clear();
        let insert_pos = self.active_index + 1;
        self.tabs.insert(
            insert_pos,
            Tab {
                panel,
                locked: false,
            },
        );
        self.active_index = insert_pos;
        true
    }

    /// 활성 탭 닫기. 마지막 탭이거나 잠긴 탭이면 false 반환
    pub fn close_active_tab(&mut self) -> bool {
        if self.tabs.len() <= 1 || self.is_active_locked() {
            return false;
        }

        self.tabs.remove(self.active_index);
        if self.active_index >= self.tabs.len() {
            self.active_index = self.tabs.len() - 1;
        }
        true
    }

    /// 다음 탭
    pub fn next_tab(&mut self) {
        if self.tabs.len() > 1 {
            self.active_index = (self.active_index + 1) % self.tabs.len();
        }
    }

    /// 이전 탭
    pub fn prev_tab(&mut self) {
        if self.tabs.len() > 1 {
            self.active_index = if self.active_index == 0 {
                self.tabs.len() - 1
            } else {
                self.active_index - 1
            };
        }
    }

    /// 모든 탭의 패널 (테마 변경 등 일괄 갱신용)
    pub fn panels_mut(&mut self) -> impl Iterator<Item = &mut PanelState> {
        self.tabs.iter_mut().map(|tab| &mut tab.panel)
    }

    /// 탭 타이틀 목록 (잠긴 탭은 자물쇠 표시)
    pub fn titles(&self) -> Vec<String> {
        self.tabs
            .iter()
            .map(|tab| {
                let title = title_from_path(&tab.panel.current_path);
                if tab.locked {
                    format!("🔒{}", title)
                } else {
                    title
                }
            })
            .collect()
    }
}

fn title_from_path(path: &VfsPath) -> String {
    if path.parent().is_none() {
        return "/".to_string();
    }
    let name = path.name();
    if name.is_empty() {
        path.to_string()
    } else {
        name
    }
}
