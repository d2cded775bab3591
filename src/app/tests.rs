use super::*;
use crate::config::PreferencesStore;
use crate::ui::components::{InputPurpose, ListPurpose};
use crate::ui::theme::ThemeType;
use crate::utils::clipboard::MemoryClipboard;
use crossterm::event::{KeyCode, KeyModifiers};
use std::fs;
use std::io::Write;
use tempfile::TempDir;
use zip::write::SimpleFileOptions as ZipFileOptions;
use zip::ZipWriter;

/// 테스트 환경
///
/// ```text
/// left/   Music/ Photos/ a.txt b.txt data.zip(inner/x.txt, top.txt)
/// right/  photos/ .hidden
/// ```
struct Fixture {
    temp: TempDir,
    clipboard: MemoryClipboard,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let left = temp.path().join("left");
        let right = temp.path().join("right");
        fs::create_dir_all(left.join("Music")).unwrap();
        fs::create_dir_all(left.join("Photos")).unwrap();
        fs::create_dir_all(right.join("photos")).unwrap();
        fs::create_dir_all(temp.path().join("prefs")).unwrap();
        fs::write(left.join("a.txt"), "abc").unwrap();
        fs::write(left.join("b.txt"), "hello").unwrap();
        fs::write(right.join(".hidden"), "").unwrap();
        create_zip(&left.join("data.zip"));
        Self {
            temp,
            clipboard: MemoryClipboard::default(),
        }
    }

    fn left(&self) -> PathBuf {
        self.temp.path().join("left")
    }

    fn right(&self) -> PathBuf {
        self.temp.path().join("right")
    }

    fn prefs(&self) -> PathBuf {
        self.temp.path().join("prefs")
    }

    fn app(&self) -> App {
        let config = AppConfig {
            prefs_dir: self.prefs(),
            left_folder: Some(self.left()),
            right_folder: Some(self.right()),
        };
        App::with_clipboard(config, Box::new(self.clipboard.clone())).unwrap()
    }
}

fn create_zip(path: &Path) {
    let file = fs::File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = ZipFileOptions::default();
    writer.add_directory("inner/", options).unwrap();
    writer.start_file("inner/x.txt", options).unwrap();
    writer.write_all(b"inside").unwrap();
    writer.start_file("top.txt", options).unwrap();
    writer.write_all(b"top level").unwrap();
    writer.finish().unwrap();
}

fn select(app: &mut App, name: &str) {
    assert!(app.active_panel_state_mut().select_by_name(name), "{} not found", name);
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_popup_key(KeyModifiers::NONE, code);
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn entry_names(panel: &PanelState) -> Vec<&str> {
    panel.entries.iter().map(|e| e.name.as_str()).collect()
}

fn input_value(app: &App) -> String {
    match &app.popup {
        Some(PopupKind::Input { input, .. }) => input.value().to_string(),
        other => panic!("expected input popup, got {:?}", other),
    }
}

// === 시작 상태 ===

#[test]
fn test_app_starts_in_given_folders() {
    let fx = Fixture::new();
    let app = fx.app();

    assert_eq!(app.active_panel, ActivePanel::Left);
    assert_eq!(app.left_tabs.active().current_path, VfsPath::Local(fx.left()));
    assert_eq!(app.right_tabs.active().current_path, VfsPath::Local(fx.right()));
    assert_eq!(
        entry_names(app.active_panel_state()),
        vec!["Music", "Photos", "a.txt", "b.txt", "data.zip"]
    );
    // 숨김 파일은 기본적으로 숨긴다
    assert_eq!(entry_names(app.inactive_panel_state()), vec!["photos"]);
}

#[test]
fn test_missing_start_folder_falls_back() {
    let fx = Fixture::new();
    let config = AppConfig {
        prefs_dir: fx.prefs(),
        left_folder: Some(fx.left().join("does-not-exist")),
        right_folder: Some(fx.right()),
    };
    let app = App::with_clipboard(config, Box::new(MemoryClipboard::default())).unwrap();

    let fallback = env::current_dir().unwrap();
    assert_eq!(app.left_tabs.active().current_path, VfsPath::Local(fallback));
}

// === 텍스트 클립보드 ===

#[test]
fn test_copy_file_names_uses_marked_entries() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "a.txt");
    app.execute_action(Action::Mark);
    app.execute_action(Action::Mark);
    assert_eq!(app.active_panel_state().marked.len(), 2);

    app.execute_action(Action::CopyFileNames);
    assert_eq!(fx.clipboard.contents().as_deref(), Some("a.txt\nb.txt"));
    assert_eq!(app.toast(), Some("Copied 2 names"));
}

#[test]
fn test_copy_file_names_falls_back_to_selection() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "b.txt");
    app.execute_action(Action::CopyFileNames);
    assert_eq!(fx.clipboard.contents().as_deref(), Some("b.txt"));
}

#[test]
fn test_copy_file_paths() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "a.txt");
    app.execute_action(Action::CopyFilePaths);
    let expected = fx.left().join("a.txt").display().to_string();
    assert_eq!(fx.clipboard.contents(), Some(expected));
}

#[test]
fn test_copy_file_names_on_parent_row_is_noop() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::GoToTop);
    assert!(app.active_panel_state().is_parent_selected());
    app.execute_action(Action::CopyFileNames);
    assert_eq!(fx.clipboard.contents(), None);
    assert_eq!(app.toast(), Some("Nothing selected"));
}

// === 열기 ===

#[test]
fn test_open_and_go_to_parent_restores_cursor() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "Photos");
    app.execute_action(Action::Open);
    assert_eq!(app.active_panel_state().current_path, VfsPath::Local(fx.left().join("Photos")));

    app.execute_action(Action::GoToParent);
    assert_eq!(app.active_panel_state().current_path, VfsPath::Local(fx.left()));
    assert_eq!(app.active_panel_state().selected_entry().unwrap().name, "Photos");
}

#[test]
fn test_open_file_shows_toast() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "a.txt");
    app.execute_action(Action::Open);
    assert_eq!(app.active_panel_state().current_path, VfsPath::Local(fx.left()));
    assert_eq!(app.toast(), Some("a.txt is not a folder or archive"));
}

#[test]
fn test_open_in_both_panels_matches_name_ignoring_case() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "Photos");
    assert!(app.can_open_in_both_panels());
    app.execute_action(Action::OpenInBothPanels);

    assert_eq!(app.left_tabs.active().current_path, VfsPath::Local(fx.left().join("Photos")));
    assert_eq!(app.right_tabs.active().current_path, VfsPath::Local(fx.right().join("photos")));
}

#[test]
fn test_open_in_both_panels_without_match_keeps_other_panel() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "Music");
    app.execute_action(Action::OpenInBothPanels);

    assert_eq!(app.left_tabs.active().current_path, VfsPath::Local(fx.left().join("Music")));
    assert_eq!(app.right_tabs.active().current_path, VfsPath::Local(fx.right()));
}

#[test]
fn test_open_in_both_panels_parent_row() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::GoToTop);
    app.execute_action(Action::OpenInBothPanels);

    let root = VfsPath::Local(fx.temp.path().to_path_buf());
    assert_eq!(app.left_tabs.active().current_path, root);
    assert_eq!(app.right_tabs.active().current_path, root);
}

#[test]
fn test_open_in_both_panels_disabled() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "a.txt");
    assert!(!app.can_open_in_both_panels());
    assert!(!app.is_action_enabled(Action::OpenInBothPanels));

    select(&mut app, "Photos");
    app.right_tabs.toggle_lock();
    assert!(!app.can_open_in_both_panels());

    app.execute_action(Action::OpenInBothPanels);
    assert_eq!(app.left_tabs.active().current_path, VfsPath::Local(fx.left()));
}

#[test]
fn test_open_in_other_panel() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "Music");
    app.execute_action(Action::OpenInOtherPanel);
    assert_eq!(app.left_tabs.active().current_path, VfsPath::Local(fx.left()));
    assert_eq!(app.right_tabs.active().current_path, VfsPath::Local(fx.left().join("Music")));
}

// === 잠금 / 패널 ===

#[test]
fn test_locked_tab_refuses_folder_change() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::ToggleLockTab);
    select(&mut app, "Photos");
    app.execute_action(Action::Open);

    assert_eq!(app.active_panel_state().current_path, VfsPath::Local(fx.left()));
    assert_eq!(app.toast(), Some("Tab is locked"));
}

#[test]
fn test_set_same_folder() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::SetSameFolder);
    assert_eq!(app.right_tabs.active().current_path, VfsPath::Local(fx.left()));
}

#[test]
fn test_swap_folders() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::SwapFolders);
    assert_eq!(app.left_tabs.active().current_path, VfsPath::Local(fx.right()));
    assert_eq!(app.right_tabs.active().current_path, VfsPath::Local(fx.left()));

    app.right_tabs.toggle_lock();
    app.execute_action(Action::SwapFolders);
    assert_eq!(app.left_tabs.active().current_path, VfsPath::Local(fx.right()));
    assert_eq!(app.toast(), Some("Tab is locked"));
}

#[test]
fn test_switch_active_panel() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::SwitchActivePanel);
    assert_eq!(app.active_panel, ActivePanel::Right);
    assert_eq!(app.active_panel_state().current_path, VfsPath::Local(fx.right()));
}

// === 탭 ===

#[test]
fn test_tabs_lifecycle() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::NewTab);
    assert_eq!(app.left_tabs.len(), 2);
    assert_eq!(app.toast(), Some("Tab 2 opened"));

    for _ in 0..5 {
        app.execute_action(Action::NewTab);
    }
    assert_eq!(app.left_tabs.len(), MAX_TABS);
    assert_eq!(app.toast(), Some("Max 5 tabs per panel"));

    app.execute_action(Action::ToggleLockTab);
    app.execute_action(Action::CloseTab);
    assert_eq!(app.left_tabs.len(), MAX_TABS);
    assert_eq!(app.toast(), Some("Tab is locked"));

    app.execute_action(Action::ToggleLockTab);
    app.execute_action(Action::CloseTab);
    assert_eq!(app.left_tabs.len(), MAX_TABS - 1);
}

// === 파일 작업 ===

#[test]
fn test_copy_through_popup() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "a.txt");
    app.execute_action(Action::Copy);
    assert_eq!(input_value(&app), fx.right().display().to_string());

    press(&mut app, KeyCode::Enter);
    assert!(app.popup.is_none());
    assert_eq!(fs::read_to_string(fx.right().join("a.txt")).unwrap(), "abc");
    assert!(fx.left().join("a.txt").exists());
    assert!(entry_names(app.inactive_panel_state()).contains(&"a.txt"));
}

#[test]
fn test_move_marked_files() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "a.txt");
    app.execute_action(Action::Mark);
    app.execute_action(Action::Mark);
    app.execute_action(Action::Move);
    press(&mut app, KeyCode::Enter);

    assert!(!fx.left().join("a.txt").exists());
    assert!(!fx.left().join("b.txt").exists());
    assert!(fx.right().join("a.txt").exists());
    assert!(fx.right().join("b.txt").exists());
    assert!(app.active_panel_state().marked.is_empty());
}

#[test]
fn test_copy_into_itself_is_refused() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "Photos");
    app.execute_action(Action::Copy);
    press(&mut app, KeyCode::Home);
    app.handle_popup_key(KeyModifiers::CONTROL, KeyCode::Char('u'));
    type_text(&mut app, &fx.left().join("Photos").display().to_string());
    press(&mut app, KeyCode::Enter);

    assert!(matches!(app.popup, Some(PopupKind::Message { is_error: true, .. })));
    assert!(!fx.left().join("Photos").join("Photos").exists());
}

#[test]
fn test_is_recursive_path() {
    let temp = TempDir::new().unwrap();
    let parent = temp.path().join("parent");
    let child = parent.join("child");
    fs::create_dir_all(&child).unwrap();

    assert!(App::is_recursive_path(&parent, &child));
    assert!(!App::is_recursive_path(&child, &parent));
}

#[test]
fn test_make_directory() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::MakeDirectory);
    type_text(&mut app, "Videos");
    press(&mut app, KeyCode::Enter);

    assert!(fx.left().join("Videos").is_dir());
    assert_eq!(app.active_panel_state().selected_entry().unwrap().name, "Videos");
}

#[test]
fn test_make_directory_rejects_empty_name() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::MakeDirectory);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.toast(), Some("Name cannot be empty"));
}

#[test]
fn test_rename_keeps_cursor_before_extension() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "a.txt");
    app.execute_action(Action::Rename);
    match &app.popup {
        Some(PopupKind::Input { input, purpose, .. }) => {
            assert_eq!(input.cursor(), 1);
            assert!(matches!(purpose, InputPurpose::Rename { .. }));
        }
        other => panic!("unexpected popup {:?}", other),
    }

    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "renamed");
    press(&mut app, KeyCode::Enter);

    assert!(fx.left().join("renamed.txt").exists());
    assert!(!fx.left().join("a.txt").exists());
    assert_eq!(app.active_panel_state().selected_entry().unwrap().name, "renamed.txt");
}

#[test]
fn test_delete_asks_for_confirmation() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "a.txt");
    app.execute_action(Action::Delete);
    assert!(matches!(app.popup, Some(PopupKind::Confirm { .. })));

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    assert!(app.popup.is_none());
    assert!(fx.left().join("a.txt").exists());
}

#[test]
fn test_copy_and_paste_files() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "b.txt");
    app.execute_action(Action::CopyFiles);
    assert_eq!(app.file_clipboard().len(), 1);

    app.execute_action(Action::SwitchActivePanel);
    assert!(app.is_action_enabled(Action::PasteFiles));
    app.execute_action(Action::PasteFiles);
    assert_eq!(fs::read_to_string(fx.right().join("b.txt")).unwrap(), "hello");
}

#[test]
fn test_paste_onto_existing_name_keeps_file() {
    let fx = Fixture::new();
    fs::write(fx.right().join("b.txt"), "precious").unwrap();
    let mut app = fx.app();

    select(&mut app, "b.txt");
    app.execute_action(Action::CopyFiles);
    app.execute_action(Action::SwitchActivePanel);
    app.execute_action(Action::PasteFiles);

    assert!(matches!(app.popup, Some(PopupKind::Message { is_error: true, .. })));
    assert_eq!(fs::read_to_string(fx.right().join("b.txt")).unwrap(), "precious");
}

// === 압축 파일 ===

#[test]
fn test_browse_archive() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "data.zip");
    app.execute_action(Action::Open);
    let archive_root = VfsPath::archive_root(fx.left().join("data.zip"));
    assert_eq!(app.active_panel_state().current_path, archive_root);
    assert_eq!(entry_names(app.active_panel_state()), vec!["inner", "top.txt"]);

    select(&mut app, "inner");
    app.execute_action(Action::Open);
    assert_eq!(entry_names(app.active_panel_state()), vec!["x.txt"]);

    app.execute_action(Action::GoToParent);
    app.execute_action(Action::GoToParent);
    assert_eq!(app.active_panel_state().current_path, VfsPath::Local(fx.left()));
    assert_eq!(app.active_panel_state().selected_entry().unwrap().name, "data.zip");
}

#[test]
fn test_copy_out_of_archive() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "data.zip");
    app.execute_action(Action::Open);
    select(&mut app, "inner");
    app.execute_action(Action::Copy);
    press(&mut app, KeyCode::Enter);

    assert_eq!(
        fs::read_to_string(fx.right().join("inner").join("x.txt")).unwrap(),
        "inside"
    );
}

#[test]
fn test_archive_is_read_only() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "data.zip");
    app.execute_action(Action::Open);
    select(&mut app, "top.txt");

    assert!(!app.is_action_enabled(Action::Rename));
    app.execute_action(Action::Move);
    assert!(app.popup.is_none());
    assert!(app.toast().unwrap().contains("read-only"));

    app.execute_action(Action::MakeDirectory);
    assert!(app.popup.is_none());
}

// === 보기 ===

#[test]
fn test_toggle_hidden_applies_to_all_panels() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::ToggleHidden);
    assert!(app.show_hidden);
    assert!(entry_names(app.inactive_panel_state()).contains(&".hidden"));

    app.execute_action(Action::ToggleHidden);
    assert!(!entry_names(app.inactive_panel_state()).contains(&".hidden"));
}

#[test]
fn test_sort_actions() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::SortBySize);
    assert_eq!(app.active_panel_state().sort_by, SortBy::Size);
    assert_eq!(app.toast(), Some("Sort: Size ↑"));

    app.execute_action(Action::ReverseOrder);
    assert_eq!(app.toast(), Some("Sort: Size ↓"));
    let names = entry_names(app.active_panel_state());
    // 디렉토리는 역순에서도 위에 남는다
    assert_eq!(names[2..], ["data.zip", "b.txt", "a.txt"]);
}

// === 북마크 ===

#[test]
fn test_bookmarks() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::AddBookmark);
    assert_eq!(input_value(&app), "left");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.bookmarks.len(), 1);
    assert_eq!(app.bookmarks[0].path, fx.left());

    select(&mut app, "Photos");
    app.execute_action(Action::Open);
    app.execute_action(Action::ShowBookmarks);
    assert!(matches!(
        app.popup,
        Some(PopupKind::List {
            purpose: ListPurpose::Bookmarks,
            ..
        })
    ));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.active_panel_state().current_path, VfsPath::Local(fx.left()));

    app.execute_action(Action::ShowBookmarks);
    press(&mut app, KeyCode::Delete);
    assert!(app.bookmarks.is_empty());
    assert!(app.popup.is_none());
}

// === 테마 ===

#[test]
fn test_choose_theme_from_list() {
    let fx = Fixture::new();
    let mut app = fx.app();
    assert_eq!(app.theme_manager.current_theme().name(), "dark");

    app.execute_action(Action::ChooseTheme);
    let light_index = match &app.popup {
        Some(PopupKind::List {
            items, selected_index, ..
        }) => {
            assert_eq!(items[*selected_index], "dark [predefined]");
            items.iter().position(|i| i == "light [predefined]").unwrap()
        }
        other => panic!("unexpected popup {:?}", other),
    };
    if let Some(PopupKind::List { selected_index, .. }) = app.popup.as_mut() {
        *selected_index = light_index;
    }
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.theme_manager.current_theme().name(), "light");
    assert_eq!(app.theme_manager.preference().name.as_deref(), Some("light"));
    assert!(app.drain_theme_events() > 0);
    assert_eq!(app.drain_theme_events(), 0);
}

#[test]
fn test_duplicate_theme() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::DuplicateTheme);
    assert_eq!(input_value(&app), "dark (2)");
    press(&mut app, KeyCode::Enter);

    let current = app.theme_manager.current_theme();
    assert_eq!(current.theme_type(), ThemeType::Custom);
    assert_eq!(current.name(), "dark (2)");
    assert!(app.theme_manager.custom_theme_names().contains(&"dark (2)".to_string()));
}

#[test]
fn test_export_then_import_theme() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::ExportTheme);
    let exported = fx.left().join("dark.toml");
    assert_eq!(input_value(&app), exported.display().to_string());
    press(&mut app, KeyCode::Enter);
    assert!(exported.exists());

    select(&mut app, "dark.toml");
    app.execute_action(Action::ImportTheme);
    let current = app.theme_manager.current_theme();
    assert_eq!(current.theme_type(), ThemeType::Custom);
    assert_eq!(current.name(), "dark (2)");
}

#[test]
fn test_import_invalid_theme_shows_error() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "a.txt");
    app.execute_action(Action::ImportTheme);
    assert!(matches!(app.popup, Some(PopupKind::Message { is_error: true, .. })));
    assert_eq!(app.theme_manager.current_theme().name(), "dark");
}

// === 설정 저장 ===

#[test]
fn test_shutdown_saves_preferences() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::ToggleHidden);
    select(&mut app, "Photos");
    app.execute_action(Action::Open);
    app.shutdown().unwrap();

    let prefs = PreferencesStore::new(fx.prefs()).load();
    assert!(prefs.show_hidden);
    assert_eq!(prefs.left_folder, Some(fx.left().join("Photos")));
    assert_eq!(prefs.right_folder, Some(fx.right()));
    assert_eq!(prefs.theme.name.as_deref(), Some("dark"));

    let config = AppConfig {
        prefs_dir: fx.prefs(),
        left_folder: None,
        right_folder: None,
    };
    let restored = App::with_clipboard(config, Box::new(MemoryClipboard::default())).unwrap();
    assert_eq!(restored.left_tabs.active().current_path, VfsPath::Local(fx.left().join("Photos")));
    assert!(restored.show_hidden);
}

#[test]
fn test_archive_folder_saved_as_host_folder() {
    let fx = Fixture::new();
    let mut app = fx.app();

    select(&mut app, "data.zip");
    app.execute_action(Action::Open);
    app.save_preferences().unwrap();

    let prefs = PreferencesStore::new(fx.prefs()).load();
    assert_eq!(prefs.left_folder, Some(fx.left()));
}

// === 팝업 / 키 ===

#[test]
fn test_help_popup() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::ShowHelp);
    assert!(app.is_popup_active());
    press(&mut app, KeyCode::Char('j'));
    assert!(matches!(app.popup, Some(PopupKind::Help { scroll_offset: 1 })));
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.is_popup_active());
}

#[test]
fn test_pending_key() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.set_pending_key('g');
    assert_eq!(app.pending_key, Some('g'));
    assert!(!app.is_pending_key_expired());
    app.clear_pending_key();
    assert!(app.pending_key.is_none());
}

#[test]
fn test_quit() {
    let fx = Fixture::new();
    let mut app = fx.app();

    app.execute_action(Action::Quit);
    assert!(app.should_quit());
}
