//! 액션 시스템 — 단일 진실 원천 (Single Source of Truth)
//!
//! 모든 키 바인딩, 커맨드바 항목, 도움말 내용이
//! 이 모듈의 레지스트리를 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    GoToParent,
    Open,
    OpenInBothPanels,
    OpenInOtherPanel,
    SwitchActivePanel,
    SetSameFolder,
    SwapFolders,
    // Tab
    NewTab,
    CloseTab,
    NextTab,
    PreviousTab,
    ToggleLockTab,
    // Selection
    Mark,
    MarkAll,
    UnmarkAll,
    InvertSelection,
    // File Operations
    CopyFileNames,
    CopyFilePaths,
    CopyFiles,
    PasteFiles,
    Copy,
    Move,
    Rename,
    MakeDirectory,
    Delete,
    // Bookmark
    AddBookmark,
    ShowBookmarks,
    // Theme
    ChooseTheme,
    DuplicateTheme,
    ImportTheme,
    ExportTheme,
    // View
    ToggleHidden,
    SortByName,
    SortBySize,
    SortByDate,
    SortByExtension,
    ReverseOrder,
    Refresh,
    // System
    ShowHelp,
    Quit,
}

/// 액션 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Tab,
    Selection,
    FileOperation,
    Bookmark,
    Theme,
    View,
    System,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 8] = [
        ActionCategory::Navigation,
        ActionCategory::Tab,
        ActionCategory::Selection,
        ActionCategory::FileOperation,
        ActionCategory::Bookmark,
        ActionCategory::Theme,
        ActionCategory::View,
        ActionCategory::System,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActionCategory::Navigation => "Navigation",
            ActionCategory::Tab => "Tabs",
            ActionCategory::Selection => "Selection",
            ActionCategory::FileOperation => "File Operations",
            ActionCategory::Bookmark => "Bookmarks",
            ActionCategory::Theme => "Themes",
            ActionCategory::View => "View",
            ActionCategory::System => "System",
        }
    }
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub id: &'static str,
    pub label: &'static str,
    pub category: ActionCategory,
    /// 기본 단축키 표시
    pub shortcut_display: Option<&'static str>,
    /// 대체 단축키 표시
    pub alternate_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 시퀀스 키 바인딩 정의 (예: `g` + `g`)
pub struct SequenceBinding {
    pub prefix: char,
    pub key: char,
    pub action: Action,
}

const fn def(
    action: Action,
    id: &'static str,
    label: &'static str,
    category: ActionCategory,
    shortcut_display: Option<&'static str>,
    alternate_display: Option<&'static str>,
) -> ActionDef {
    ActionDef {
        action,
        id,
        label,
        category,
        shortcut_display,
        alternate_display,
        command_bar: None,
    }
}

const fn with_bar(mut def: ActionDef, key: &'static str, label: &'static str, priority: u8) -> ActionDef {
    def.command_bar = Some(CommandBarEntry {
        key,
        label,
        priority,
    });
    def
}

use ActionCategory as C;

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Navigation
    def(Action::MoveUp, "move_up", "Move up", C::Navigation, Some("k"), Some("↑")),
    def(Action::MoveDown, "move_down", "Move down", C::Navigation, Some("j"), Some("↓")),
    def(Action::PageUp, "page_up", "Page up", C::Navigation, Some("^U"), Some("PgUp")),
    def(Action::PageDown, "page_down", "Page down", C::Navigation, Some("^D"), Some("PgDn")),
    def(Action::GoToTop, "go_top", "Top", C::Navigation, Some("gg"), Some("Home")),
    def(Action::GoToBottom, "go_bottom", "Bottom", C::Navigation, Some("G"), Some("End")),
    def(Action::GoToParent, "go_parent", "Parent folder", C::Navigation, Some("h"), Some("Backspace")),
    def(Action::Open, "open", "Open", C::Navigation, Some("l"), Some("Enter")),
    with_bar(
        def(
            Action::OpenInBothPanels,
            "open_in_both_panels",
            "Open in both panels",
            C::Navigation,
            Some("O"),
            None,
        ),
        "O",
        "Both",
        32,
    ),
    with_bar(
        def(
            Action::OpenInOtherPanel,
            "open_in_other_panel",
            "Open in other panel",
            C::Navigation,
            Some("o"),
            None,
        ),
        "o",
        "Other",
        31,
    ),
    with_bar(
        def(Action::SwitchActivePanel, "switch_panel", "Switch panel", C::Navigation, Some("Tab"), None),
        "Tab",
        "Panel",
        30,
    ),
    def(Action::SetSameFolder, "set_same_folder", "Set same folder", C::Navigation, Some("="), None),
    def(Action::SwapFolders, "swap_folders", "Swap folders", C::Navigation, Some("^W"), None),
    // Tab
    def(Action::NewTab, "tab_new", "New tab", C::Tab, Some("tn"), None),
    def(Action::CloseTab, "tab_close", "Close tab", C::Tab, Some("tx"), None),
    def(Action::NextTab, "tab_next", "Next tab", C::Tab, Some("]"), None),
    def(Action::PreviousTab, "tab_previous", "Previous tab", C::Tab, Some("["), None),
    def(Action::ToggleLockTab, "tab_toggle_lock", "Lock/unlock tab", C::Tab, Some("tl"), None),
    // Selection
    with_bar(
        def(Action::Mark, "mark", "Mark", C::Selection, Some("Space"), Some("Insert")),
        "Spc",
        "Mark",
        20,
    ),
    def(Action::MarkAll, "mark_all", "Mark all", C::Selection, Some("^A"), None),
    def(Action::UnmarkAll, "unmark_all", "Unmark all", C::Selection, Some("u"), None),
    def(Action::InvertSelection, "invert_selection", "Invert selection", C::Selection, Some("v"), Some("*")),
    // File Operations
    def(Action::CopyFileNames, "copy_file_names", "Copy file names", C::FileOperation, Some("cn"), None),
    def(Action::CopyFilePaths, "copy_file_paths", "Copy file paths", C::FileOperation, Some("cp"), None),
    def(Action::CopyFiles, "copy_files_to_clipboard", "Copy files to clipboard", C::FileOperation, Some("cc"), None),
    def(Action::PasteFiles, "paste_clipboard_files", "Paste files", C::FileOperation, Some("cv"), None),
    with_bar(
        def(Action::Copy, "copy", "Copy", C::FileOperation, Some("y"), Some("F5")),
        "y",
        "Copy",
        10,
    ),
    with_bar(
        def(Action::Move, "move", "Move", C::FileOperation, Some("x"), Some("F6")),
        "x",
        "Move",
        11,
    ),
    with_bar(
        def(Action::Rename, "rename", "Rename", C::FileOperation, Some("r"), Some("F2")),
        "r",
        "Ren",
        13,
    ),
    with_bar(
        def(Action::MakeDirectory, "mkdir", "Make directory", C::FileOperation, Some("a"), Some("F7")),
        "a",
        "Mkdir",
        14,
    ),
    with_bar(
        def(Action::Delete, "delete", "Delete (trash)", C::FileOperation, Some("d"), Some("F8")),
        "d",
        "Del",
        12,
    ),
    // Bookmark
    def(Action::AddBookmark, "bookmark_add", "Add bookmark", C::Bookmark, Some("^B"), None),
    def(Action::ShowBookmarks, "bookmark_list", "Bookmarks", C::Bookmark, Some("tb"), None),
    // Theme
    def(Action::ChooseTheme, "theme_choose", "Choose theme", C::Theme, Some("zt"), None),
    def(Action::DuplicateTheme, "theme_duplicate", "Duplicate theme", C::Theme, Some("zd"), None),
    def(Action::ImportTheme, "theme_import", "Import selected theme", C::Theme, Some("zi"), None),
    def(Action::ExportTheme, "theme_export", "Export current theme", C::Theme, Some("ze"), None),
    // View
    def(Action::ToggleHidden, "toggle_hidden", "Show hidden files", C::View, Some("."), None),
    def(Action::SortByName, "sort_name", "Sort by name", C::View, Some("sn"), None),
    def(Action::SortBySize, "sort_size", "Sort by size", C::View, Some("ss"), None),
    def(Action::SortByDate, "sort_date", "Sort by date", C::View, Some("sd"), None),
    def(Action::SortByExtension, "sort_ext", "Sort by extension", C::View, Some("se"), None),
    def(Action::ReverseOrder, "reverse_order", "Reverse order", C::View, Some("sr"), None),
    def(Action::Refresh, "refresh", "Refresh", C::View, Some("^R"), None),
    // System
    with_bar(
        def(Action::ShowHelp, "help", "Help", C::System, Some("?"), Some("F1")),
        "?",
        "Help",
        40,
    ),
    with_bar(
        def(Action::Quit, "quit", "Quit", C::System, Some("q"), Some("^C")),
        "q",
        "Quit",
        41,
    ),
];

fn key(code: KeyCode, modifiers: Option<KeyModifiers>, action: Action) -> KeyBinding {
    KeyBinding {
        code,
        modifiers,
        action,
    }
}

fn plain(c: char, action: Action) -> KeyBinding {
    key(KeyCode::Char(c), Some(KeyModifiers::NONE), action)
}

fn ctrl(c: char, action: Action) -> KeyBinding {
    key(KeyCode::Char(c), Some(KeyModifiers::CONTROL), action)
}

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        // 종료
        plain('q', Action::Quit),
        ctrl('c', Action::Quit),
        // 패널
        key(KeyCode::Tab, None, Action::SwitchActivePanel),
        plain('o', Action::OpenInOtherPanel),
        key(KeyCode::Char('O'), None, Action::OpenInBothPanels),
        plain('=', Action::SetSameFolder),
        ctrl('w', Action::SwapFolders),
        // 탐색: Vim
        plain('j', Action::MoveDown),
        key(KeyCode::Down, None, Action::MoveDown),
        plain('k', Action::MoveUp),
        key(KeyCode::Up, None, Action::MoveUp),
        plain('h', Action::GoToParent),
        key(KeyCode::Left, Some(KeyModifiers::NONE), Action::GoToParent),
        key(KeyCode::Backspace, None, Action::GoToParent),
        plain('l', Action::Open),
        key(KeyCode::Right, Some(KeyModifiers::NONE), Action::Open),
        key(KeyCode::Enter, Some(KeyModifiers::NONE), Action::Open),
        key(KeyCode::Char('G'), None, Action::GoToBottom),
        key(KeyCode::Home, None, Action::GoToTop),
        key(KeyCode::End, None, Action::GoToBottom),
        ctrl('u', Action::PageUp),
        key(KeyCode::PageUp, None, Action::PageUp),
        ctrl('d', Action::PageDown),
        key(KeyCode::PageDown, None, Action::PageDown),
        // 탭
        plain(']', Action::NextTab),
        plain('[', Action::PreviousTab),
        // 파일 작업
        plain('y', Action::Copy),
        key(KeyCode::F(5), None, Action::Copy),
        plain('x', Action::Move),
        key(KeyCode::F(6), None, Action::Move),
        plain('r', Action::Rename),
        key(KeyCode::F(2), None, Action::Rename),
        plain('a', Action::MakeDirectory),
        key(KeyCode::F(7), None, Action::MakeDirectory),
        plain('d', Action::Delete),
        key(KeyCode::Delete, None, Action::Delete),
        key(KeyCode::F(8), None, Action::Delete),
        // 선택
        plain(' ', Action::Mark),
        key(KeyCode::Insert, None, Action::Mark),
        ctrl('a', Action::MarkAll),
        plain('u', Action::UnmarkAll),
        plain('v', Action::InvertSelection),
        key(KeyCode::Char('*'), None, Action::InvertSelection),
        // 보기
        plain('.', Action::ToggleHidden),
        ctrl('r', Action::Refresh),
        ctrl('b', Action::AddBookmark),
        // 시스템
        key(KeyCode::Char('?'), None, Action::ShowHelp),
        key(KeyCode::F(1), None, Action::ShowHelp),
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && match binding.modifiers {
                    None => true,
                    Some(required) => modifiers == required,
                }
        })
        .map(|binding| binding.action)
}

/// 시퀀스 입력(prefix + key)으로 액션 조회
pub fn find_sequence_action(prefix: char, key: char) -> Option<Action> {
    sequence_bindings()
        .iter()
        .find(|binding| binding.prefix == prefix && binding.key == key)
        .map(|binding| binding.action)
}

/// 시퀀스 시작 prefix 여부
pub fn is_sequence_prefix(c: char) -> bool {
    sequence_bindings().iter().any(|binding| binding.prefix == c)
}

fn seq(prefix: char, key: char, action: Action) -> SequenceBinding {
    SequenceBinding {
        prefix,
        key,
        action,
    }
}

fn build_sequence_bindings() -> Vec<SequenceBinding> {
    vec![
        seq('g', 'g', Action::GoToTop),
        // 정렬
        seq('s', 'n', Action::SortByName),
        seq('s', 's', Action::SortBySize),
        seq('s', 'd', Action::SortByDate),
        seq('s', 'e', Action::SortByExtension),
        seq('s', 'r', Action::ReverseOrder),
        // 탭 / 북마크
        seq('t', 'n', Action::NewTab),
        seq('t', 'x', Action::CloseTab),
        seq('t', 'l', Action::ToggleLockTab),
        seq('t', 'b', Action::ShowBookmarks),
        // 클립보드
        seq('c', 'n', Action::CopyFileNames),
        seq('c', 'p', Action::CopyFilePaths),
        seq('c', 'c', Action::CopyFiles),
        seq('c', 'v', Action::PasteFiles),
        // 테마
        seq('z', 't', Action::ChooseTheme),
        seq('z', 'd', Action::DuplicateTheme),
        seq('z', 'i', Action::ImportTheme),
        seq('z', 'e', Action::ExportTheme),
    ]
}

static SEQUENCE_BINDINGS: LazyLock<Vec<SequenceBinding>> = LazyLock::new(build_sequence_bindings);

/// 시퀀스 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn sequence_bindings() -> &'static [SequenceBinding] {
    SEQUENCE_BINDINGS.as_slice()
}

impl Action {
    /// 로그에 남기는 action_id
    pub fn id(&self) -> &'static str {
        ACTION_DEFS
            .iter()
            .find(|d| d.action == *self)
            .map(|d| d.id)
            .unwrap_or("unknown")
    }
}

/// 커맨드바 항목과 해당 액션 (활성 여부 계산용)
pub fn command_bar_actions() -> Vec<(Action, CommandItem)> {
    let mut entries: Vec<(Action, &CommandBarEntry)> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref().map(|cb| (def.action, cb)))
        .collect();

    entries.sort_by_key(|(_, cb)| cb.priority);

    entries
        .into_iter()
        .map(|(action, cb)| (action, CommandItem::new(cb.key, cb.label)))
        .collect()
}

/// 도움말용 엔트리 생성
///
/// 반환: (카테고리명, Vec<(단축키, 설명)>) 목록
pub fn generate_help_entries() -> Vec<(&'static str, Vec<(String, &'static str)>)> {
    ActionCategory::ALL
        .iter()
        .map(|cat| {
            let items: Vec<(String, &'static str)> = ACTION_DEFS
                .iter()
                .filter(|d| d.category == *cat)
                .filter_map(|d| {
                    let primary = d.shortcut_display?;
                    let keys = match d.alternate_display {
                        Some(alt) => format!("{} / {}", primary, alt),
                        None => primary.to_string(),
                    };
                    Some((keys, d.label))
                })
                .collect();
            (cat.label(), items)
        })
        .filter(|(_, items)| !items.is_empty())
        .collect()
}
