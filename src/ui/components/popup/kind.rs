use super::text_input::TextInput;
use crate::ui::theme::ThemeType;
use crate::vfs::VfsPath;
use std::path::PathBuf;

/// 입력 팝업 목적 (확정 시 필요한 문맥 포함)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPurpose {
    /// 복사 대상 폴더
    CopyDestination { sources: Vec<VfsPath> },
    /// 이동 대상 폴더
    MoveDestination { sources: Vec<VfsPath> },
    /// 이름 변경
    Rename { original: VfsPath },
    /// 새 디렉토리 이름
    MakeDirectory { parent: VfsPath },
    /// 북마크 이름
    BookmarkName { path: PathBuf },
    /// 복제할 테마의 새 이름
    DuplicateThemeName,
    /// 테마 내보내기 경로
    ExportThemePath,
}

/// 확인 팝업 목적
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPurpose {
    /// 휴지통으로 이동
    Trash { targets: Vec<VfsPath> },
}

/// 목록 팝업 목적
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPurpose {
    Bookmarks,
    /// 항목과 같은 순서의 테마 식별자
    Themes(Vec<(ThemeType, Option<String>)>),
}

/// 팝업 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupKind {
    Input {
        title: String,
        prompt: String,
        input: TextInput,
        purpose: InputPurpose,
    },
    Confirm {
        title: String,
        message: String,
        /// 0: OK, 1: Cancel
        selected_button: usize,
        purpose: ConfirmPurpose,
    },
    List {
        title: String,
        items: Vec<String>,
        selected_index: usize,
        purpose: ListPurpose,
    },
    Help {
        scroll_offset: usize,
    },
    Message {
        title: String,
        message: String,
        is_error: bool,
    },
}

impl PopupKind {
    pub fn input(
        title: impl Into<String>,
        prompt: impl Into<String>,
        input: TextInput,
        purpose: InputPurpose,
    ) -> Self {
        PopupKind::Input {
            title: title.into(),
            prompt: prompt.into(),
            input,
            purpose,
        }
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>, purpose: ConfirmPurpose) -> Self {
        PopupKind::Confirm {
            title: title.into(),
            message: message.into(),
            selected_button: 0,
            purpose,
        }
    }

    pub fn list(title: impl Into<String>, items: Vec<String>, selected_index: usize, purpose: ListPurpose) -> Self {
        let selected_index = selected_index.min(items.len().saturating_sub(1));
        PopupKind::List {
            title: title.into(),
            items,
            selected_index,
            purpose,
        }
    }

    pub fn help() -> Self {
        PopupKind::Help { scroll_offset: 0 }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        PopupKind::Message {
            title: title.into(),
            message: message.into(),
            is_error: true,
        }
    }
}
