use crate::config::{Bookmark, Preferences, PreferencesStore};
use crate::core::actions::Action;
use crate::models::tab_state::MAX_TABS;
use crate::models::{PanelState, PanelTabs, SortBy};
use crate::ui::components::PopupKind;
use crate::ui::theme::{ChannelListener, ThemeEvent, ThemeManager};
use crate::ui::ActivePanel;
use crate::utils::clipboard::{ClipboardSink, Osc52Clipboard};
use crate::utils::error::{MuError, Result};
use crate::vfs::{FileSystem, VfsPath};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

mod navigation;
mod operations;
mod popup;
#[cfg(test)]
mod tests;

/// 토스트 메시지 표시 시간
const TOAST_DURATION: Duration = Duration::from_secs(3);
/// 시퀀스 키 대기 시간
const PENDING_KEY_TIMEOUT: Duration = Duration::from_millis(1500);

/// 앱 시작 옵션
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// 설정 폴더
    pub prefs_dir: PathBuf,
    /// 명령행으로 지정한 왼쪽 폴더
    pub left_folder: Option<PathBuf>,
    /// 명령행으로 지정한 오른쪽 폴더
    pub right_folder: Option<PathBuf>,
}

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 좌측 패널 탭 상태
    pub left_tabs: PanelTabs,
    /// 우측 패널 탭 상태
    pub right_tabs: PanelTabs,
    /// 활성 패널
    pub active_panel: ActivePanel,
    /// 파일 시스템
    pub filesystem: FileSystem,
    /// 테마 관리자
    pub theme_manager: ThemeManager,
    /// 테마 변경 이벤트 수신
    theme_events: Receiver<ThemeEvent>,
    /// 설정 저장소
    prefs_store: PreferencesStore,
    /// 북마크 목록
    pub bookmarks: Vec<Bookmark>,
    /// 숨김 파일 표시 여부 (모든 패널 공통)
    pub show_hidden: bool,
    /// 현재 표시 중인 팝업
    pub popup: Option<PopupKind>,
    /// 대기 중인 키 (예: 'g' for 'gg')
    pub pending_key: Option<char>,
    pending_key_time: Option<Instant>,
    /// 토스트 메시지 (3초 후 자동 소멸)
    toast_message: Option<(String, Instant)>,
    /// 파일 클립보드 (복사해 둔 경로)
    file_clipboard: Vec<VfsPath>,
    /// 텍스트 클립보드
    clipboard: Box<dyn ClipboardSink>,
    /// 패널에 보이는 행 수 (페이지 이동 단위)
    visible_rows: usize,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_clipboard(config, Box::new(Osc52Clipboard))
    }

    /// 클립보드 구현을 지정해 생성
    pub fn with_clipboard(config: AppConfig, clipboard: Box<dyn ClipboardSink>) -> Result<Self> {
        let prefs_store = PreferencesStore::new(config.prefs_dir.clone());
        let prefs = prefs_store.load();
        let filesystem = FileSystem::new();

        let mut theme_manager = ThemeManager::load(config.prefs_dir.clone(), prefs.theme.clone());
        let (tx, theme_events) = mpsc::channel();
        theme_manager.add_listener(Box::new(ChannelListener::new(tx)));

        // 시작 폴더: 명령행 > 저장된 폴더 > (왼쪽) 현재 폴더, (오른쪽) 홈 폴더
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let home_dir = dirs::home_dir().unwrap_or_else(|| current_dir.clone());
        let left_start = config
            .left_folder
            .or(prefs.left_folder.clone())
            .unwrap_or_else(|| current_dir.clone());
        let right_start = config
            .right_folder
            .or(prefs.right_folder.clone())
            .unwrap_or_else(|| home_dir.clone());

        let left_panel = Self::open_initial_panel(&filesystem, left_start, &current_dir, prefs.show_hidden)?;
        let right_panel = Self::open_initial_panel(&filesystem, right_start, &home_dir, prefs.show_hidden)?;

        Ok(Self {
            should_quit: false,
            left_tabs: PanelTabs::new(left_panel),
            right_tabs: PanelTabs::new(right_panel),
            active_panel: ActivePanel::Left,
            filesystem,
            theme_manager,
            theme_events,
            prefs_store,
            bookmarks: prefs.bookmarks,
            show_hidden: prefs.show_hidden,
            popup: None,
            pending_key: None,
            pending_key_time: None,
            toast_message: None,
            file_clipboard: Vec::new(),
            clipboard,
            visible_rows: 20,
        })
    }

    /// 시작 폴더 열기 (실패하면 대체 폴더)
    fn open_initial_panel(
        filesystem: &FileSystem,
        folder: PathBuf,
        fallback: &Path,
        show_hidden: bool,
    ) -> Result<PanelState> {
        let mut panel = PanelState::new(VfsPath::Local(folder.clone()));
        panel.show_hidden = show_hidden;
        if let Err(e) = panel.refresh(filesystem) {
            tracing::warn!(folder = %folder.display(), error = %e, "cannot open start folder");
            panel.current_path = VfsPath::Local(fallback.to_path_buf());
            panel.refresh(filesystem)?;
        }
        Ok(panel)
    }

    /// 종료
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// 종료 시 테마와 설정 저장
    pub fn shutdown(&mut self) -> Result<()> {
        if let Err(e) = self.theme_manager.save_current_theme() {
            tracing::warn!(error = %e, "failed to save user theme");
        }
        self.save_preferences()
    }

    /// 현재 상태를 설정 파일에 기록
    pub fn save_preferences(&self) -> Result<()> {
        let prefs = self.current_preferences();
        self.prefs_store.save(&prefs).map_err(|e| {
            tracing::warn!(error = %e, "failed to save preferences");
            e
        })
    }

    fn current_preferences(&self) -> Preferences {
        let local_folder = |tabs: &PanelTabs| Some(tabs.active().current_path.host_folder());
        Preferences {
            show_hidden: self.show_hidden,
            left_folder: local_folder(&self.left_tabs),
            right_folder: local_folder(&self.right_tabs),
            theme: self.theme_manager.preference().clone(),
            bookmarks: self.bookmarks.clone(),
            ..Preferences::default()
        }
    }

    // === 패널 접근 ===

    pub fn tabs(&self, panel: ActivePanel) -> &PanelTabs {
        match panel {
            ActivePanel::Left => &self.left_tabs,
            ActivePanel::Right => &self.right_tabs,
        }
    }

    pub fn tabs_mut(&mut self, panel: ActivePanel) -> &mut PanelTabs {
        match panel {
            ActivePanel::Left => &mut self.left_tabs,
            ActivePanel::Right => &mut self.right_tabs,
        }
    }

    pub fn active_panel_state(&self) -> &PanelState {
        self.tabs(self.active_panel).active()
    }

    pub fn active_panel_state_mut(&mut self) -> &mut PanelState {
        let panel = self.active_panel;
        self.tabs_mut(panel).active_mut()
    }

    pub fn inactive_panel_state(&self) -> &PanelState {
        self.tabs(self.active_panel.other()).active()
    }

    /// 페이지 이동과 스크롤 계산에 쓸 행 수 갱신 (렌더러에서 호출)
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        for side in [ActivePanel::Left, ActivePanel::Right] {
            self.tabs_mut(side).active_mut().adjust_scroll(rows);
        }
    }

    pub(crate) fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    // === 토스트 ===

    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    /// 유효한 토스트 메시지
    pub fn toast(&self) -> Option<&str> {
        self.toast_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < TOAST_DURATION)
            .map(|(message, _)| message.as_str())
    }

    /// 실패를 기록하고 토스트로 알린다
    pub(crate) fn report_error(&mut self, context: &str, error: &MuError) {
        tracing::warn!(context, error = %error, "operation failed");
        self.set_toast(&format!("{}: {}", context, error));
    }

    // === 키 시퀀스 ===

    pub fn set_pending_key(&mut self, key: char) {
        self.pending_key = Some(key);
        self.pending_key_time = Some(Instant::now());
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
        self.pending_key_time = None;
    }

    pub fn is_pending_key_expired(&self) -> bool {
        self.pending_key_time
            .map(|at| at.elapsed() >= PENDING_KEY_TIMEOUT)
            .unwrap_or(false)
    }

    // === 테마 이벤트 ===

    /// 쌓인 테마 변경 이벤트 처리, 처리한 개수 반환
    ///
    /// 화면은 매 루프마다 현재 테마로 다시 그리므로 여기서는 비우고 기록만 한다.
    pub fn drain_theme_events(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.theme_events.try_recv() {
            tracing::debug!(?event, "theme changed");
            count += 1;
        }
        count
    }

    // === 액션 디스패치 ===

    /// 액션 실행 (단일 진입점)
    pub fn execute_action(&mut self, action: Action) {
        tracing::debug!(action = action.id(), "execute");
        match action {
            Action::Quit => self.quit(),
            Action::ShowHelp => self.popup = Some(PopupKind::help()),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-(self.visible_rows() as isize)),
            Action::PageDown => self.move_selection(self.visible_rows() as isize),
            Action::GoToTop => self.go_to_top(),
            Action::GoToBottom => self.go_to_bottom(),
            Action::GoToParent => self.go_to_parent(),
            Action::Open => self.open_selected(),
            Action::OpenInBothPanels => self.open_in_both_panels(),
            Action::OpenInOtherPanel => self.open_in_other_panel(),
            Action::SwitchActivePanel => self.switch_panel(),
            Action::SetSameFolder => self.set_same_folder(),
            Action::SwapFolders => self.swap_folders(),
            Action::NewTab => self.new_tab(),
            Action::CloseTab => self.close_tab(),
            Action::NextTab => self.next_tab(),
            Action::PreviousTab => self.previous_tab(),
            Action::ToggleLockTab => self.toggle_lock_tab(),
            Action::Mark => self.toggle_mark(),
            Action::MarkAll => self.active_panel_state_mut().mark_all(),
            Action::UnmarkAll => self.active_panel_state_mut().unmark_all(),
            Action::InvertSelection => self.active_panel_state_mut().invert_marks(),
            Action::ToggleHidden => self.toggle_hidden(),
            Action::SortByName => self.sort_active_panel(SortBy::Name),
            Action::SortBySize => self.sort_active_panel(SortBy::Size),
            Action::SortByDate => self.sort_active_panel(SortBy::Modified),
            Action::SortByExtension => self.sort_active_panel(SortBy::Extension),
            Action::ReverseOrder => self.reverse_sort_order(),
            Action::Refresh => self.refresh_all(),
            Action::CopyFileNames => self.copy_file_names(),
            Action::CopyFilePaths => self.copy_file_paths(),
            Action::CopyFiles => self.copy_files_to_clipboard(),
            Action::PasteFiles => self.paste_clipboard_files(),
            Action::Copy => self.start_copy(),
            Action::Move => self.start_move(),
            Action::Rename => self.start_rename(),
            Action::MakeDirectory => self.start_mkdir(),
            Action::Delete => self.start_delete(),
            Action::AddBookmark => self.start_add_bookmark(),
            Action::ShowBookmarks => self.show_bookmarks(),
            Action::ChooseTheme => self.show_theme_list(),
            Action::DuplicateTheme => self.start_duplicate_theme(),
            Action::ImportTheme => self.import_selected_theme(),
            Action::ExportTheme => self.start_export_theme(),
        }
    }

    /// 현재 상태에서 액션 실행 가능 여부 (커맨드바 표시용)
    pub fn is_action_enabled(&self, action: Action) -> bool {
        match action {
            Action::OpenInBothPanels => self.can_open_in_both_panels(),
            Action::OpenInOtherPanel => !self.tabs(self.active_panel.other()).is_active_locked(),
            Action::Move | Action::Rename | Action::Delete | Action::MakeDirectory => {
                self.active_panel_state().current_path.is_local()
            }
            Action::PasteFiles => !self.file_clipboard.is_empty(),
            _ => true,
        }
    }
}
