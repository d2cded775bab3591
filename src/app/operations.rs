use super::*;
use crate::ui::components::{ConfirmPurpose, InputPurpose, ListPurpose, TextInput};
use crate::ui::theme::{Theme, ThemeType};
use crate::utils::formatter::{format_file_size, pluralize};

/// 복사/이동 구분
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransferKind {
    Copy,
    Move,
}

impl TransferKind {
    fn name(&self) -> &'static str {
        match self {
            TransferKind::Copy => "Copy",
            TransferKind::Move => "Move",
        }
    }
}

impl App {
    /// 작업 대상 경로 (마킹 항목, 없으면 커서 항목)
    pub fn operation_sources(&self) -> Vec<VfsPath> {
        self.active_panel_state()
            .target_entries()
            .into_iter()
            .map(|entry| entry.path.clone())
            .collect()
    }

    /// 활성 패널이 로컬 폴더가 아니면 알리고 None
    fn require_local_active_folder(&mut self) -> Option<PathBuf> {
        let current = self.active_panel_state().current_path.clone();
        match self.filesystem.require_local(&current) {
            Ok(path) => Some(path.to_path_buf()),
            Err(e) => {
                self.set_toast(&e.to_string());
                None
            }
        }
    }

    /// 디렉토리를 자기 자신 안으로 복사/이동하는지 검사
    pub(super) fn is_recursive_path(source: &Path, dest: &Path) -> bool {
        if !source.is_dir() {
            return false;
        }
        let (Ok(source), Ok(dest)) = (source.canonicalize(), dest.canonicalize()) else {
            return false;
        };
        dest.starts_with(&source)
    }

    /// 입력한 대상 경로 해석 (상대 경로는 활성 폴더 기준, `~`는 홈)
    fn resolve_destination(&self, input: &str) -> PathBuf {
        let trimmed = input.trim();
        if let Some(rest) = trimmed.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        if trimmed == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
        let path = PathBuf::from(trimmed);
        if path.is_absolute() {
            path
        } else {
            self.active_panel_state().current_path.host_folder().join(path)
        }
    }

    // === 텍스트 클립보드 ===

    /// 대상 항목 이름을 줄 단위로 클립보드에
    pub(super) fn copy_file_names(&mut self) {
        let names: Vec<String> = self
            .active_panel_state()
            .target_entries()
            .iter()
            .map(|entry| entry.name.clone())
            .collect();
        self.copy_lines_to_clipboard(names, "name");
    }

    /// 대상 항목 전체 경로를 줄 단위로 클립보드에
    pub(super) fn copy_file_paths(&mut self) {
        let paths: Vec<String> = self
            .active_panel_state()
            .target_entries()
            .iter()
            .map(|entry| entry.path.to_string())
            .collect();
        self.copy_lines_to_clipboard(paths, "path");
    }

    fn copy_lines_to_clipboard(&mut self, lines: Vec<String>, noun: &str) {
        if lines.is_empty() {
            self.set_toast("Nothing selected");
            return;
        }
        let count = lines.len();
        match self.clipboard.set_text(&lines.join("\n")) {
            Ok(()) => {
                let plural = format!("{}s", noun);
                self.set_toast(&format!("Copied {}", pluralize(count, noun, &plural)));
            }
            Err(e) => self.report_error("Clipboard", &e),
        }
    }

    // === 파일 클립보드 ===

    pub(super) fn copy_files_to_clipboard(&mut self) {
        let sources = self.operation_sources();
        if sources.is_empty() {
            self.set_toast("Nothing selected");
            return;
        }
        let count = sources.len();
        self.file_clipboard = sources;
        self.set_toast(&format!("{} copied to clipboard", pluralize(count, "file", "files")));
    }

    /// 클립보드 파일을 활성 폴더에 붙여넣기
    pub(super) fn paste_clipboard_files(&mut self) {
        if self.file_clipboard.is_empty() {
            self.set_toast("Clipboard is empty");
            return;
        }
        let Some(dest) = self.require_local_active_folder() else {
            return;
        };
        let sources = self.file_clipboard.clone();
        self.transfer(TransferKind::Copy, &sources, &dest);
    }

    /// 클립보드에 담긴 파일 경로
    pub fn file_clipboard(&self) -> &[VfsPath] {
        &self.file_clipboard
    }

    // === 복사/이동 ===

    pub(super) fn start_copy(&mut self) {
        self.start_transfer(TransferKind::Copy);
    }

    pub(super) fn start_move(&mut self) {
        if self.require_local_active_folder().is_none() {
            return;
        }
        self.start_transfer(TransferKind::Move);
    }

    /// 대상 폴더 입력 팝업 (기본값: 반대쪽 패널 폴더)
    fn start_transfer(&mut self, kind: TransferKind) {
        let sources = self.operation_sources();
        if sources.is_empty() {
            self.set_toast("Nothing selected");
            return;
        }
        let default_dest = self.inactive_panel_state().current_path.host_folder();
        let prompt = match sources.as_slice() {
            [single] => format!("{} '{}' to:", kind.name(), single.name()),
            many => format!("{} {} to:", kind.name(), pluralize(many.len(), "item", "items")),
        };
        let input = TextInput::new(default_dest.to_string_lossy());
        let purpose = match kind {
            TransferKind::Copy => InputPurpose::CopyDestination { sources },
            TransferKind::Move => InputPurpose::MoveDestination { sources },
        };
        self.popup = Some(PopupKind::input(kind.name(), prompt, input, purpose));
    }

    /// 복사/이동 실행 후 양쪽 패널 새로고침
    fn transfer(&mut self, kind: TransferKind, sources: &[VfsPath], dest: &Path) {
        if !dest.is_dir() {
            self.popup = Some(PopupKind::error(
                kind.name(),
                format!("Destination is not a folder: {}", dest.display()),
            ));
            return;
        }

        let mut done = 0usize;
        let mut bytes = 0u64;
        let mut failures = Vec::new();
        for source in sources {
            if let Some(local) = source.as_local() {
                if Self::is_recursive_path(local, dest) {
                    failures.push(format!("Cannot {} '{}' into itself", kind.name().to_lowercase(), source.name()));
                    continue;
                }
            }
            let result = match kind {
                TransferKind::Copy => self.filesystem.copy_to_local(source, dest),
                TransferKind::Move => self.filesystem.move_to_local(source, dest),
            };
            match result {
                Ok(n) => {
                    done += 1;
                    bytes += n;
                }
                Err(e) => {
                    tracing::warn!(src = %source, dest = %dest.display(), error = %e, "transfer failed");
                    failures.push(e.to_string());
                }
            }
        }

        tracing::info!(kind = kind.name(), done, bytes, failed = failures.len(), "transfer finished");
        self.active_panel_state_mut().unmark_all();
        self.refresh_all();

        if failures.is_empty() {
            self.set_toast(&format!(
                "{}: {} ({})",
                kind.name(),
                pluralize(done, "item", "items"),
                format_file_size(bytes)
            ));
        } else {
            self.popup = Some(PopupKind::error(kind.name(), failures.join("\n")));
        }
    }

    // === 이름 변경 / 새 폴더 / 삭제 ===

    pub(super) fn start_rename(&mut self) {
        if self.require_local_active_folder().is_none() {
            return;
        }
        let Some(entry) = self.active_panel_state().selected_entry() else {
            self.set_toast("Nothing selected");
            return;
        };
        let input = TextInput::with_cursor_before_extension(entry.name.clone());
        let prompt = format!("Rename '{}' to:", entry.name);
        let purpose = InputPurpose::Rename {
            original: entry.path.clone(),
        };
        self.popup = Some(PopupKind::input("Rename", prompt, input, purpose));
    }

    pub(super) fn start_mkdir(&mut self) {
        if self.require_local_active_folder().is_none() {
            return;
        }
        let parent = self.active_panel_state().current_path.clone();
        self.popup = Some(PopupKind::input(
            "Make directory",
            "Directory name:",
            TextInput::default(),
            InputPurpose::MakeDirectory { parent },
        ));
    }

    /// 휴지통 이동 확인 팝업
    pub(super) fn start_delete(&mut self) {
        if self.require_local_active_folder().is_none() {
            return;
        }
        let targets = self.operation_sources();
        let message = match targets.as_slice() {
            [] => {
                self.set_toast("Nothing selected");
                return;
            }
            [single] => format!("Move '{}' to trash?", single.name()),
            many => format!("Move {} to trash?", pluralize(many.len(), "item", "items")),
        };
        self.popup = Some(PopupKind::confirm("Delete", message, ConfirmPurpose::Trash { targets }));
    }

    /// 이름 검증 (빈 이름, 경로 구분자 거부)
    fn validate_name(name: &str) -> std::result::Result<&str, &'static str> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Name cannot be empty");
        }
        if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
            return Err("Invalid name");
        }
        Ok(name)
    }

    // === 팝업 확정 처리 ===

    /// 입력 팝업 확정
    pub(super) fn confirm_input(&mut self, value: &str, purpose: InputPurpose) {
        match purpose {
            InputPurpose::CopyDestination { sources } => {
                let dest = self.resolve_destination(value);
                self.transfer(TransferKind::Copy, &sources, &dest);
            }
            InputPurpose::MoveDestination { sources } => {
                let dest = self.resolve_destination(value);
                self.transfer(TransferKind::Move, &sources, &dest);
            }
            InputPurpose::Rename { original } => self.finish_rename(&original, value),
            InputPurpose::MakeDirectory { parent } => self.finish_mkdir(&parent, value),
            InputPurpose::BookmarkName { path } => self.finish_add_bookmark(value, path),
            InputPurpose::DuplicateThemeName => self.finish_duplicate_theme(value),
            InputPurpose::ExportThemePath => {
                let dest = self.resolve_destination(value);
                self.finish_export_theme(&dest);
            }
        }
    }

    fn finish_rename(&mut self, original: &VfsPath, value: &str) {
        let name = match Self::validate_name(value) {
            Ok(name) => name,
            Err(reason) => {
                self.set_toast(reason);
                return;
            }
        };
        if name == original.name() {
            return;
        }
        match self.filesystem.rename(original, name) {
            Ok(renamed) => {
                tracing::info!(from = %original, to = %renamed, "renamed");
                self.refresh_all();
                self.active_panel_state_mut().select_by_name(name);
                self.set_toast(&format!("Renamed to {}", name));
            }
            Err(e) => self.popup = Some(PopupKind::error("Rename", e.to_string())),
        }
    }

    fn finish_mkdir(&mut self, parent: &VfsPath, value: &str) {
        let name = match Self::validate_name(value) {
            Ok(name) => name,
            Err(reason) => {
                self.set_toast(reason);
                return;
            }
        };
        match self.filesystem.create_directory(parent, name) {
            Ok(created) => {
                tracing::info!(path = %created, "directory created");
                self.refresh_all();
                self.active_panel_state_mut().select_by_name(name);
                self.set_toast(&format!("Created {}", name));
            }
            Err(e) => self.popup = Some(PopupKind::error("Make directory", e.to_string())),
        }
    }

    /// 확인 팝업 확정
    pub(super) fn confirm_action(&mut self, purpose: ConfirmPurpose) {
        match purpose {
            ConfirmPurpose::Trash { targets } => match self.filesystem.trash(&targets) {
                Ok(()) => {
                    tracing::info!(count = targets.len(), "moved to trash");
                    self.refresh_all();
                    self.set_toast(&format!("{} moved to trash", pluralize(targets.len(), "item", "items")));
                }
                Err(e) => self.popup = Some(PopupKind::error("Delete", e.to_string())),
            },
        }
    }

    // === 북마크 ===

    pub(super) fn start_add_bookmark(&mut self) {
        let Some(path) = self.require_local_active_folder() else {
            return;
        };
        let name = self.active_panel_state().current_path.name();
        self.popup = Some(PopupKind::input(
            "Add bookmark",
            format!("Bookmark name for {}:", path.display()),
            TextInput::new(name),
            InputPurpose::BookmarkName { path },
        ));
    }

    /// 북마크 추가 (같은 경로는 이름만 갱신)
    fn finish_add_bookmark(&mut self, value: &str, path: PathBuf) {
        let name = value.trim();
        if name.is_empty() {
            self.set_toast("Name cannot be empty");
            return;
        }
        match self.bookmarks.iter_mut().find(|b| b.path == path) {
            Some(existing) => existing.name = name.to_string(),
            None => self.bookmarks.push(Bookmark {
                name: name.to_string(),
                path,
            }),
        }
        self.set_toast(&format!("Bookmark '{}' added", name));
    }

    fn bookmark_items(&self) -> Vec<String> {
        self.bookmarks
            .iter()
            .map(|b| format!("{}  {}", b.name, b.path.display()))
            .collect()
    }

    pub(super) fn show_bookmarks(&mut self) {
        if self.bookmarks.is_empty() {
            self.set_toast("No bookmarks");
            return;
        }
        self.popup = Some(PopupKind::list(
            "Bookmarks",
            self.bookmark_items(),
            0,
            ListPurpose::Bookmarks,
        ));
    }

    /// 북마크 삭제 후 목록 팝업 갱신
    pub(super) fn remove_bookmark(&mut self, index: usize) {
        if index >= self.bookmarks.len() {
            return;
        }
        let removed = self.bookmarks.remove(index);
        self.set_toast(&format!("Bookmark '{}' removed", removed.name));
        self.popup = if self.bookmarks.is_empty() {
            None
        } else {
            Some(PopupKind::list(
                "Bookmarks",
                self.bookmark_items(),
                index,
                ListPurpose::Bookmarks,
            ))
        };
    }

    // === 테마 ===

    pub(super) fn show_theme_list(&mut self) {
        let themes = self.theme_manager.available_themes();
        let current = themes
            .iter()
            .position(|theme| self.theme_manager.is_current_theme(theme))
            .unwrap_or(0);
        let items = themes
            .iter()
            .map(|theme| format!("{} [{}]", theme.name(), theme.theme_type().label()))
            .collect();
        let ids = themes.iter().map(theme_id).collect();
        self.popup = Some(PopupKind::list("Themes", items, current, ListPurpose::Themes(ids)));
    }

    /// 테마 적용
    pub(super) fn apply_theme(&mut self, theme_type: ThemeType, name: Option<&str>) {
        match self.theme_manager.read_theme(theme_type, name) {
            Ok(theme) => {
                let label = theme.name().to_string();
                self.theme_manager.set_current_theme(theme);
                self.set_toast(&format!("Theme: {}", label));
            }
            Err(e) => self.report_error("Theme", &e),
        }
    }

    pub(super) fn start_duplicate_theme(&mut self) {
        let name = self
            .theme_manager
            .available_custom_theme_name(self.theme_manager.current_theme().name());
        self.popup = Some(PopupKind::input(
            "Duplicate theme",
            "New theme name:",
            TextInput::new(name),
            InputPurpose::DuplicateThemeName,
        ));
    }

    fn finish_duplicate_theme(&mut self, value: &str) {
        let name = value.trim();
        if name.is_empty() {
            self.set_toast("Name cannot be empty");
            return;
        }
        let data = self.theme_manager.current_theme().data().clone_data();
        match self.theme_manager.import_theme_data(data, name) {
            Ok(theme) => {
                let label = theme.name().to_string();
                self.theme_manager.set_current_theme(theme);
                self.set_toast(&format!("Theme '{}' created", label));
            }
            Err(e) => self.popup = Some(PopupKind::error("Duplicate theme", e.to_string())),
        }
    }

    /// 커서 위치의 테마 파일 가져오기
    pub(super) fn import_selected_theme(&mut self) {
        let Some(path) = self
            .active_panel_state()
            .selected_entry()
            .and_then(|entry| entry.path.as_local().map(Path::to_path_buf))
        else {
            self.set_toast("Select a local theme file");
            return;
        };
        match self.theme_manager.import_theme_file(&path) {
            Ok(theme) => {
                let label = theme.name().to_string();
                self.theme_manager.set_current_theme(theme);
                self.set_toast(&format!("Theme '{}' imported", label));
            }
            Err(e) => self.popup = Some(PopupKind::error("Import theme", e.to_string())),
        }
    }

    pub(super) fn start_export_theme(&mut self) {
        let folder = self.active_panel_state().current_path.host_folder();
        let file = format!("{}.toml", self.theme_manager.current_theme().name());
        self.popup = Some(PopupKind::input(
            "Export theme",
            "Export to:",
            TextInput::new(folder.join(file).to_string_lossy()),
            InputPurpose::ExportThemePath,
        ));
    }

    fn finish_export_theme(&mut self, dest: &Path) {
        let theme = self.theme_manager.current_theme().clone();
        match self.theme_manager.export_theme_to_path(&theme, dest) {
            Ok(()) => {
                self.refresh_all();
                self.set_toast(&format!("Theme exported to {}", dest.display()));
            }
            Err(e) => self.popup = Some(PopupKind::error("Export theme", e.to_string())),
        }
    }
}

/// 테마 목록 팝업에서 쓰는 식별자
fn theme_id(theme: &Theme) -> (ThemeType, Option<String>) {
    match theme.theme_type() {
        ThemeType::User => (ThemeType::User, None),
        other => (other, Some(theme.name().to_string())),
    }
}
