// ThemeManager - 현재 테마와 테마 파일 관리
//
// 테마는 세 종류가 있다:
// - user: 사용자가 직접 수정한 단일 테마 (`user_theme.toml`)
// - predefined: 바이너리에 내장된 테마
// - custom: `themes/` 폴더에 가져오거나 복제한 테마
#![allow(dead_code)]

use super::data::{ColorId, FontId, Theme, ThemeColor, ThemeData, ThemeFont, ThemeType, USER_THEME_NAME};
use super::io::{
    parse_theme_data, predefined_source, serialize_theme_data, ThemeSources, PREDEFINED_THEMES, THEME_EXTENSION,
};
use super::listener::{ListenerId, ListenerRegistry, ThemeEvent, ThemeListener};
use crate::config::{ThemePreferences, DEFAULT_THEME_NAME};
use crate::utils::backup::{backup_path, read_with_backup, write_with_backup};
use crate::utils::error::{MuError, Result};
use ratatui::style::Color;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const USER_THEME_FILE_NAME: &str = "user_theme.toml";
const CUSTOM_THEME_FOLDER: &str = "themes";

pub struct ThemeManager {
    prefs_dir: PathBuf,
    predefined: ThemeSources,
    user_theme_file: Option<PathBuf>,
    current: Theme,
    user_theme_modified: bool,
    preference: ThemePreferences,
    listeners: ListenerRegistry,
}

impl ThemeManager {
    /// 설정된 테마 로드
    ///
    /// 실패하면 기본 테마, 그다음 사용자 테마, 마지막으로 빈 사용자 테마를 쓴다.
    /// 대체 테마를 쓴 경우 테마 설정도 실제 로드된 테마로 바뀐다.
    pub fn load(prefs_dir: impl Into<PathBuf>, preference: ThemePreferences) -> Self {
        Self::load_with_predefined(prefs_dir.into(), preference, PREDEFINED_THEMES)
    }

    fn load_with_predefined(prefs_dir: PathBuf, preference: ThemePreferences, predefined: ThemeSources) -> Self {
        let mut manager = Self {
            prefs_dir,
            predefined,
            user_theme_file: None,
            current: Theme::user(ThemeData::new()),
            user_theme_modified: false,
            preference: preference.clone(),
            listeners: ListenerRegistry::default(),
        };

        let theme_type = preference.theme_type;
        let name = match theme_type {
            ThemeType::User => None,
            _ => Some(
                preference
                    .name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_THEME_NAME.to_string()),
            ),
        };
        let was_user_theme_loaded = theme_type == ThemeType::User;

        match manager.read_theme_uncached(theme_type, name.as_deref()) {
            Ok(theme) => manager.current = theme,
            Err(e) => {
                tracing::warn!(
                    theme_type = theme_type.label(),
                    name = ?name,
                    error = %e,
                    "failed to load configured theme, using default"
                );

                let fallback = match manager.read_theme_uncached(ThemeType::Predefined, Some(DEFAULT_THEME_NAME)) {
                    Ok(theme) => Some(theme),
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to load default theme");
                        if was_user_theme_loaded {
                            None
                        } else {
                            manager
                                .read_theme_uncached(ThemeType::User, None)
                                .map_err(|e| tracing::warn!(error = %e, "failed to load user theme"))
                                .ok()
                        }
                    }
                };

                manager.current = match fallback {
                    Some(theme) => theme,
                    None => {
                        manager.user_theme_modified = true;
                        Theme::user(ThemeData::new())
                    }
                };
                manager.update_preference();
            }
        }

        tracing::info!(
            theme_type = manager.current.theme_type().label(),
            name = manager.current.name(),
            "theme loaded"
        );
        manager
    }

    // 테마 목록 -------------------------------------------------------------

    pub fn predefined_theme_names(&self) -> Vec<String> {
        self.predefined.iter().map(|(name, _)| name.to_string()).collect()
    }

    /// custom 폴더의 `*.toml` 파일 이름 (확장자 제외)
    pub fn custom_theme_names(&self) -> Vec<String> {
        let Ok(dir) = self.custom_themes_dir() else {
            return Vec::new();
        };
        let Ok(read_dir) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = read_dir
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(THEME_EXTENSION))
            })
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().to_string()))
            .collect();
        names.sort();
        names
    }

    /// 사용자 테마 + 내장 테마 + custom 테마 이름 (정렬)
    pub fn available_theme_names(&self) -> Vec<String> {
        let mut names = vec![USER_THEME_NAME.to_string()];
        names.extend(self.predefined_theme_names());
        names.extend(self.custom_theme_names());
        names.sort();
        names
    }

    /// 로드 가능한 모든 테마 (이름순)
    pub fn available_themes(&self) -> Vec<Theme> {
        let mut themes = vec![self
            .read_theme(ThemeType::User, None)
            .unwrap_or_else(|_| Theme::user(ThemeData::new()))];

        for name in self.predefined_theme_names() {
            match self.read_theme(ThemeType::Predefined, Some(&name)) {
                Ok(theme) => themes.push(theme),
                Err(e) => tracing::warn!(name = %name, error = %e, "failed to load predefined theme"),
            }
        }
        for name in self.custom_theme_names() {
            match self.read_theme(ThemeType::Custom, Some(&name)) {
                Ok(theme) => themes.push(theme),
                Err(e) => tracing::warn!(name = %name, error = %e, "failed to load custom theme"),
            }
        }

        themes.sort_by(|a, b| a.name().cmp(b.name()));
        themes
    }

    // 경로 -----------------------------------------------------------------

    pub fn user_theme_file(&self) -> PathBuf {
        self.user_theme_file
            .clone()
            .unwrap_or_else(|| self.prefs_dir.join(USER_THEME_FILE_NAME))
    }

    pub fn set_user_theme_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if path.is_dir() {
            return Err(MuError::IllegalThemeOperation(format!(
                "Not a valid file: {}",
                path.display()
            )));
        }
        self.user_theme_file = Some(path);
        Ok(())
    }

    /// custom 테마 폴더 (없으면 생성)
    pub fn custom_themes_dir(&self) -> Result<PathBuf> {
        let dir = self.prefs_dir.join(CUSTOM_THEME_FOLDER);
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| MuError::from_io(&dir, e))?;
        }
        Ok(dir)
    }

    /// 테마 파일 경로 (내장 테마는 파일이 없다)
    pub fn theme_file(&self, theme_type: ThemeType, name: &str) -> Result<PathBuf> {
        match theme_type {
            ThemeType::Predefined => Err(MuError::IllegalThemeOperation(
                "Predefined themes have no file".to_string(),
            )),
            ThemeType::Custom => Ok(self
                .custom_themes_dir()?
                .join(format!("{}.{}", name, THEME_EXTENSION))),
            ThemeType::User => Ok(self.user_theme_file()),
        }
    }

    // 삭제 / 이름 변경 ---------------------------------------------------------

    pub fn delete_custom_theme(&mut self, name: &str) -> Result<()> {
        if self.current.is(ThemeType::Custom, Some(name)) {
            return Err(MuError::IllegalThemeOperation(
                "Cannot delete current theme".to_string(),
            ));
        }

        let file = self.theme_file(ThemeType::Custom, name)?;
        for path in [file.clone(), backup_path(&file)] {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| MuError::from_io(&path, e))?;
            }
        }
        tracing::info!(name, "custom theme deleted");
        Ok(())
    }

    pub fn rename_custom_theme(&mut self, theme: &mut Theme, name: &str) -> Result<()> {
        if theme.theme_type() != ThemeType::Custom {
            return Err(MuError::IllegalThemeOperation(
                "Cannot rename non-custom themes".to_string(),
            ));
        }
        if theme.name() == name {
            return Ok(());
        }

        let new_name = self.available_custom_theme_name(name);
        let src = self.theme_file(ThemeType::Custom, theme.name())?;
        let dest = self.theme_file(ThemeType::Custom, &new_name)?;
        fs::rename(&src, &dest).map_err(|e| MuError::RenameFailed {
            src: src.clone(),
            dest: dest.clone(),
            reason: e.to_string(),
        })?;

        let was_current = self.is_current_theme(theme);
        theme.set_name(new_name.clone());
        if was_current {
            self.current.set_name(new_name);
            self.update_preference();
        }
        Ok(())
    }

    // 쓰기 / 내보내기 / 가져오기 -------------------------------------------------

    pub fn write_theme(&self, theme: &Theme) -> Result<()> {
        self.write_theme_data(theme.data(), theme.theme_type(), theme.name())
    }

    pub fn write_theme_data(&self, data: &ThemeData, theme_type: ThemeType, name: &str) -> Result<()> {
        if theme_type == ThemeType::Predefined {
            return Err(MuError::IllegalThemeOperation(
                "Cannot write predefined themes".to_string(),
            ));
        }
        let file = self.theme_file(theme_type, name)?;
        let content = serialize_theme_data(data)?;
        write_with_backup(&file, content.as_bytes()).map_err(|e| MuError::from_io(&file, e))
    }

    /// 테마 원문을 그대로 복사
    pub fn export_theme(&self, theme: &Theme, out: &mut dyn Write) -> Result<()> {
        let source = self.theme_source(theme.theme_type(), theme.name())?;
        out.write_all(&source)?;
        Ok(())
    }

    pub fn export_theme_to_path(&self, theme: &Theme, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|e| MuError::from_io(path, e))?;
        self.export_theme(theme, &mut file)
    }

    /// 사용 가능한 custom 테마 이름
    ///
    /// 이미 쓰이는 이름이면 끝의 `(n)`을 떼고 ` (2)`, ` (3)`... 을 붙여 본다.
    pub fn available_custom_theme_name(&self, name: &str) -> String {
        let names = self.available_theme_names();
        let is_available = |candidate: &str| !names.iter().any(|n| n == candidate);

        if is_available(name) {
            return name.to_string();
        }

        let mut base = strip_counter_suffix(name).to_string();
        if !base.ends_with(' ') {
            base.push(' ');
        }

        let mut i = 1;
        loop {
            i += 1;
            let candidate = format!("{}({})", base, i);
            if is_available(&candidate) {
                return candidate;
            }
        }
    }

    pub fn duplicate_theme(&self, theme: &Theme) -> Result<Theme> {
        self.import_theme_data(theme.data().clone_data(), theme.name())
    }

    pub fn import_theme_data(&self, data: ThemeData, name: &str) -> Result<Theme> {
        let name = self.available_custom_theme_name(name);
        self.write_theme_data(&data, ThemeType::Custom, &name)?;
        Ok(Theme::new(ThemeType::Custom, name, data))
    }

    /// 외부 테마 파일 가져오기 (먼저 내용을 검증한다)
    pub fn import_theme_file(&self, path: &Path) -> Result<Theme> {
        let raw = fs::read(path).map_err(|e| MuError::from_io(path, e))?;
        let source_name = path.display().to_string();
        let content = String::from_utf8(raw.clone()).map_err(|e| MuError::ThemeParse {
            source_name: source_name.clone(),
            reason: e.to_string(),
        })?;
        let data = parse_theme_data(&content, &source_name)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let suffix = format!(".{}", THEME_EXTENSION);
        let stem = if file_name.to_lowercase().ends_with(&suffix) {
            &file_name[..file_name.len() - suffix.len()]
        } else {
            file_name.as_str()
        };

        let name = self.available_custom_theme_name(stem);
        let dest = self.theme_file(ThemeType::Custom, &name)?;
        write_with_backup(&dest, &raw).map_err(|e| MuError::from_io(&dest, e))?;
        tracing::info!(name = %name, "theme imported");
        Ok(Theme::new(ThemeType::Custom, name, data))
    }

    // 읽기 -----------------------------------------------------------------

    /// 테마 읽기 (현재 테마는 다시 읽지 않고 그대로 돌려준다)
    pub fn read_theme(&self, theme_type: ThemeType, name: Option<&str>) -> Result<Theme> {
        if self.current.is(theme_type, name) {
            return Ok(self.current.clone());
        }
        self.read_theme_uncached(theme_type, name)
    }

    fn read_theme_uncached(&self, theme_type: ThemeType, name: Option<&str>) -> Result<Theme> {
        let name = match theme_type {
            ThemeType::User => USER_THEME_NAME,
            _ => name.ok_or_else(|| MuError::ThemeNotFound {
                name: String::new(),
            })?,
        };
        let source = self.theme_source(theme_type, name)?;
        let content = String::from_utf8(source).map_err(|e| MuError::ThemeParse {
            source_name: name.to_string(),
            reason: e.to_string(),
        })?;
        let data = parse_theme_data(&content, name)?;
        Ok(Theme::new(theme_type, name, data))
    }

    fn theme_source(&self, theme_type: ThemeType, name: &str) -> Result<Vec<u8>> {
        match theme_type {
            ThemeType::Predefined => predefined_source(self.predefined, name)
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(|| MuError::ThemeNotFound {
                    name: name.to_string(),
                }),
            ThemeType::User | ThemeType::Custom => {
                let file = self.theme_file(theme_type, name)?;
                read_with_backup(&file).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => MuError::ThemeNotFound {
                        name: name.to_string(),
                    },
                    _ => MuError::from_io(&file, e),
                })
            }
        }
    }

    // 현재 테마 -------------------------------------------------------------

    pub fn current_theme(&self) -> &Theme {
        &self.current
    }

    pub fn is_current_theme(&self, theme: &Theme) -> bool {
        self.current.is(theme.theme_type(), Some(theme.name()))
    }

    pub fn is_user_theme_modified(&self) -> bool {
        self.user_theme_modified
    }

    /// 현재 테마 설정 (설정 파일에 기록될 값)
    pub fn preference(&self) -> &ThemePreferences {
        &self.preference
    }

    fn update_preference(&mut self) {
        self.preference = ThemePreferences {
            theme_type: self.current.theme_type(),
            name: match self.current.theme_type() {
                ThemeType::User => None,
                _ => Some(self.current.name().to_string()),
            },
        };
    }

    /// 수정된 사용자 테마 저장
    pub fn save_current_theme(&mut self) -> Result<()> {
        if self.current.theme_type() == ThemeType::User && self.user_theme_modified {
            self.write_theme(&self.current)?;
            self.user_theme_modified = false;
        }
        Ok(())
    }

    pub fn set_current_theme(&mut self, theme: Theme) {
        if self.is_current_theme(&theme) {
            return;
        }

        if let Err(e) = self.save_current_theme() {
            tracing::warn!(error = %e, "couldn't save current theme");
        }

        let old = std::mem::replace(&mut self.current, theme);
        self.update_preference();
        self.trigger_theme_change(&old);
        tracing::info!(name = self.current.name(), "current theme changed");
    }

    pub fn current_font(&self, id: FontId) -> ThemeFont {
        self.current.font(id)
    }

    pub fn current_color(&self, id: ColorId) -> Color {
        self.current.color(id)
    }

    /// 사용자 테마를 주어진 데이터로 덮어쓴다
    pub fn overwrite_user_theme(&mut self, data: &ThemeData) -> Result<Theme> {
        if self.current.theme_type() == ThemeType::User {
            let old = self.current.clone();
            self.current.data_mut().import_data(data);
            self.write_theme(&self.current)?;
            self.user_theme_modified = false;
            self.trigger_theme_change(&old);
            Ok(self.current.clone())
        } else {
            self.write_theme_data(data, ThemeType::User, USER_THEME_NAME)?;
            Ok(Theme::user(data.clone()))
        }
    }

    pub fn will_overwrite_user_theme_font(&self, id: FontId, font: ThemeFont) -> bool {
        self.current.data().is_font_different(id, font) && self.current.theme_type() != ThemeType::User
    }

    pub fn will_overwrite_user_theme_color(&self, id: ColorId, color: ThemeColor) -> bool {
        self.current.data().is_color_different(id, color) && self.current.theme_type() != ThemeType::User
    }

    pub fn set_current_font(&mut self, id: FontId, font: ThemeFont) -> bool {
        if !self.current.data().is_font_different(id, font) {
            return false;
        }
        self.convert_current_to_user();
        self.current.data_mut().set_font(id, font);
        self.user_theme_modified = true;
        self.listeners.emit(ThemeEvent::FontChanged { id, font });
        true
    }

    pub fn set_current_color(&mut self, id: ColorId, color: ThemeColor) -> bool {
        if !self.current.data().is_color_different(id, color) {
            return false;
        }
        self.convert_current_to_user();
        self.current.data_mut().set_color(id, color);
        self.user_theme_modified = true;
        self.listeners.emit(ThemeEvent::ColorChanged { id, color });
        true
    }

    fn convert_current_to_user(&mut self) {
        if self.current.theme_type() != ThemeType::User {
            self.current.set_type(ThemeType::User);
            self.update_preference();
        }
    }

    // 이벤트 ---------------------------------------------------------------

    pub fn add_listener(&mut self, listener: Box<dyn ThemeListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn trigger_theme_change(&mut self, old: &Theme) {
        for id in FontId::ALL {
            let font = self.current.font(id);
            if old.data().is_font_different(id, font) {
                self.listeners.emit(ThemeEvent::FontChanged { id, font });
            }
        }
        for id in ColorId::ALL {
            let color = self.current.data().color(id);
            if old.data().is_color_different(id, color) {
                self.listeners.emit(ThemeEvent::ColorChanged { id, color });
            }
        }
    }
}

/// 끝의 `(숫자)` 제거
fn strip_counter_suffix(name: &str) -> &str {
    let Some(body) = name.strip_suffix(')') else {
        return name;
    };
    match body.rfind('(') {
        Some(open) if open + 1 < body.len() && body[open + 1..].chars().all(|c| c.is_ascii_digit()) => {
            &name[..open]
        }
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::listener::ChannelListener;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn predefined(name: &str) -> ThemePreferences {
        ThemePreferences {
            theme_type: ThemeType::Predefined,
            name: Some(name.to_string()),
        }
    }

    fn user_pref() -> ThemePreferences {
        ThemePreferences {
            theme_type: ThemeType::User,
            name: None,
        }
    }

    #[test]
    fn test_load_configured_predefined_theme() {
        let temp = TempDir::new().unwrap();
        let manager = ThemeManager::load(temp.path(), predefined("light"));
        assert!(manager.current_theme().is(ThemeType::Predefined, Some("light")));
        assert_eq!(manager.preference(), &predefined("light"));
        assert!(!manager.is_user_theme_modified());
    }

    #[test]
    fn test_load_falls_back_to_default_theme() {
        let temp = TempDir::new().unwrap();
        let manager = ThemeManager::load(
            temp.path(),
            ThemePreferences {
                theme_type: ThemeType::Custom,
                name: Some("missing".to_string()),
            },
        );
        assert!(manager.current_theme().is(ThemeType::Predefined, Some(DEFAULT_THEME_NAME)));
        assert_eq!(manager.preference(), &predefined(DEFAULT_THEME_NAME));
    }

    #[test]
    fn test_load_user_theme() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(USER_THEME_FILE_NAME),
            "[colors]\ndirectory = \"#010203\"\n",
        )
        .unwrap();

        let manager = ThemeManager::load(temp.path(), user_pref());
        assert_eq!(manager.current_theme().theme_type(), ThemeType::User);
        assert_eq!(manager.current_color(ColorId::Directory), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_available_custom_theme_name() {
        let temp = TempDir::new().unwrap();
        let manager = ThemeManager::load(temp.path(), predefined("dark"));

        assert_eq!(manager.available_custom_theme_name("fresh"), "fresh");
        assert_eq!(manager.available_custom_theme_name("dark"), "dark (2)");

        manager
            .import_theme_data(ThemeData::new(), "dark")
            .unwrap();
        assert_eq!(manager.available_custom_theme_name("dark"), "dark (3)");
        assert_eq!(manager.available_custom_theme_name("dark (2)"), "dark (3)");
        assert_eq!(manager.available_custom_theme_name("dark(2)"), "dark(2)");
    }

    #[test]
    fn test_strip_counter_suffix() {
        assert_eq!(strip_counter_suffix("theme (12)"), "theme ");
        assert_eq!(strip_counter_suffix("theme"), "theme");
        assert_eq!(strip_counter_suffix("theme ()"), "theme ()");
        assert_eq!(strip_counter_suffix("theme (x)"), "theme (x)");
    }

    #[test]
    fn test_duplicate_and_list_custom_themes() {
        let temp = TempDir::new().unwrap();
        let manager = ThemeManager::load(temp.path(), predefined("dark"));

        let copy = manager.duplicate_theme(manager.current_theme()).unwrap();
        assert_eq!(copy.theme_type(), ThemeType::Custom);
        assert_eq!(copy.name(), "dark (2)");
        assert_eq!(copy.data(), manager.current_theme().data());

        assert_eq!(manager.custom_theme_names(), vec!["dark (2)".to_string()]);
        let names = manager.available_theme_names();
        assert_eq!(names[0], USER_THEME_NAME);
        assert!(names.contains(&"dark (2)".to_string()));

        let themes = manager.available_themes();
        assert_eq!(themes.len(), 5);
        let sorted: Vec<&str> = themes.iter().map(|t| t.name()).collect();
        let mut expected = sorted.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_available_themes_skips_broken_custom_theme() {
        let temp = TempDir::new().unwrap();
        let manager = ThemeManager::load(temp.path(), predefined("dark"));
        let dir = manager.custom_themes_dir().unwrap();
        fs::write(dir.join("broken.toml"), "[colors]\ndirectory = \"nope\"\n").unwrap();

        let themes = manager.available_themes();
        assert!(themes.iter().all(|t| t.name() != "broken"));
        assert_eq!(themes.len(), 4);
    }

    #[test]
    fn test_import_theme_file_validates_and_names() {
        let temp = TempDir::new().unwrap();
        let manager = ThemeManager::load(temp.path(), predefined("dark"));

        let good = temp.path().join("Ocean.TOML");
        fs::write(&good, "[colors]\naccent = \"#00aaff\"\n").unwrap();
        let theme = manager.import_theme_file(&good).unwrap();
        assert_eq!(theme.name(), "Ocean");
        assert_eq!(theme.color(ColorId::Accent), Color::Rgb(0, 0xaa, 0xff));

        // 같은 이름으로 다시 가져오면 번호가 붙는다
        let again = manager.import_theme_file(&good).unwrap();
        assert_eq!(again.name(), "Ocean (2)");

        let bad = temp.path().join("bad.toml");
        fs::write(&bad, "[colors]\naccent = \"#nothex\"\n").unwrap();
        assert!(matches!(
            manager.import_theme_file(&bad),
            Err(MuError::ThemeParse { .. })
        ));
        assert!(!manager.custom_themes_dir().unwrap().join("bad.toml").exists());
    }

    #[test]
    fn test_export_theme_copies_source() {
        let temp = TempDir::new().unwrap();
        let manager = ThemeManager::load(temp.path(), predefined("dark"));

        let mut out = Vec::new();
        manager.export_theme(manager.current_theme(), &mut out).unwrap();
        assert_eq!(out, predefined_source(PREDEFINED_THEMES, "dark").unwrap().as_bytes());

        let path = temp.path().join("exported.toml");
        manager
            .export_theme_to_path(manager.current_theme(), &path)
            .unwrap();
        let reimported = manager.import_theme_file(&path).unwrap();
        assert_eq!(reimported.data(), manager.current_theme().data());
    }

    #[test]
    fn test_write_predefined_theme_is_illegal() {
        let temp = TempDir::new().unwrap();
        let manager = ThemeManager::load(temp.path(), predefined("dark"));
        assert!(matches!(
            manager.write_theme(manager.current_theme()),
            Err(MuError::IllegalThemeOperation(_))
        ));
    }

    #[test]
    fn test_delete_custom_theme() {
        let temp = TempDir::new().unwrap();
        let mut manager = ThemeManager::load(temp.path(), predefined("dark"));
        let theme = manager.import_theme_data(ThemeData::new(), "mine").unwrap();

        manager.set_current_theme(theme.clone());
        assert!(matches!(
            manager.delete_custom_theme("mine"),
            Err(MuError::IllegalThemeOperation(_))
        ));

        let dark = manager.read_theme(ThemeType::Predefined, Some("dark")).unwrap();
        manager.set_current_theme(dark);
        manager.delete_custom_theme("mine").unwrap();
        assert!(manager.custom_theme_names().is_empty());
        assert!(manager.read_theme(ThemeType::Custom, Some("mine")).is_err());
    }

    #[test]
    fn test_rename_custom_theme_updates_preference() {
        let temp = TempDir::new().unwrap();
        let mut manager = ThemeManager::load(temp.path(), predefined("dark"));
        let mut theme = manager.import_theme_data(ThemeData::new(), "first").unwrap();
        manager.set_current_theme(theme.clone());

        manager.rename_custom_theme(&mut theme, "light").unwrap();
        assert_eq!(theme.name(), "light (2)");
        assert_eq!(manager.current_theme().name(), "light (2)");
        assert_eq!(
            manager.preference(),
            &ThemePreferences {
                theme_type: ThemeType::Custom,
                name: Some("light (2)".to_string()),
            }
        );
        assert_eq!(manager.custom_theme_names(), vec!["light (2)".to_string()]);

        let mut dark = manager.read_theme(ThemeType::Predefined, Some("dark")).unwrap();
        assert!(matches!(
            manager.rename_custom_theme(&mut dark, "x"),
            Err(MuError::IllegalThemeOperation(_))
        ));
    }

    #[test]
    fn test_set_current_theme_emits_differences_only() {
        let temp = TempDir::new().unwrap();
        let mut manager = ThemeManager::load(temp.path(), predefined("dark"));
        let (tx, rx) = mpsc::channel();
        manager.add_listener(Box::new(ChannelListener::new(tx)));

        // 현재 테마를 다시 지정하면 아무 일도 없다
        let same = manager.read_theme(ThemeType::Predefined, Some("dark")).unwrap();
        manager.set_current_theme(same);
        assert!(rx.try_recv().is_err());

        let light = manager.read_theme(ThemeType::Predefined, Some("light")).unwrap();
        manager.set_current_theme(light.clone());
        let events: Vec<ThemeEvent> = rx.try_iter().collect();

        // panel_border_active와 accent는 두 테마에서 같다
        assert!(!events.contains(&ThemeEvent::ColorChanged {
            id: ColorId::Accent,
            color: light.data().color(ColorId::Accent),
        }));
        assert!(events.contains(&ThemeEvent::ColorChanged {
            id: ColorId::Background,
            color: light.data().color(ColorId::Background),
        }));
        assert_eq!(manager.preference(), &predefined("light"));
    }

    #[test]
    fn test_set_current_color_converts_to_user_theme() {
        let temp = TempDir::new().unwrap();
        let mut manager = ThemeManager::load(temp.path(), predefined("dark"));
        let (tx, rx) = mpsc::channel();
        let listener = manager.add_listener(Box::new(ChannelListener::new(tx)));

        let same = ThemeColor(manager.current_color(ColorId::Directory));
        assert!(!manager.will_overwrite_user_theme_color(ColorId::Directory, same));
        assert!(!manager.set_current_color(ColorId::Directory, same));

        let red = ThemeColor(Color::Red);
        assert!(manager.will_overwrite_user_theme_color(ColorId::Directory, red));
        assert!(manager.set_current_color(ColorId::Directory, red));
        assert_eq!(manager.current_theme().theme_type(), ThemeType::User);
        assert_eq!(manager.current_theme().name(), USER_THEME_NAME);
        assert!(manager.is_user_theme_modified());
        assert_eq!(manager.preference(), &user_pref());
        assert_eq!(
            rx.try_recv().unwrap(),
            ThemeEvent::ColorChanged {
                id: ColorId::Directory,
                color: red
            }
        );

        // 이미 사용자 테마이므로 더 이상 덮어쓰기 경고 대상이 아니다
        assert!(!manager.will_overwrite_user_theme_color(ColorId::Accent, red));

        assert!(manager.remove_listener(listener));
        let bold = ThemeFont {
            bold: true,
            ..ThemeFont::default()
        };
        assert!(manager.set_current_font(FontId::StatusBar, bold));
        assert!(rx.try_recv().is_err());

        manager.save_current_theme().unwrap();
        assert!(!manager.is_user_theme_modified());
        let saved = fs::read_to_string(manager.user_theme_file()).unwrap();
        assert!(saved.contains("directory = \"red\""));
        assert!(saved.contains("panel_border_active"));
    }

    #[test]
    fn test_set_current_font_converts_to_user_theme() {
        let temp = TempDir::new().unwrap();
        let mut manager = ThemeManager::load(temp.path(), predefined("light"));
        let (tx, rx) = mpsc::channel();
        manager.add_listener(Box::new(ChannelListener::new(tx)));

        let current = manager.current_font(FontId::PanelTitle);
        assert!(!manager.will_overwrite_user_theme_font(FontId::PanelTitle, current));
        assert!(!manager.set_current_font(FontId::PanelTitle, current));

        let underline = ThemeFont {
            underline: !current.underline,
            ..current
        };
        assert!(manager.will_overwrite_user_theme_font(FontId::PanelTitle, underline));
        assert!(manager.set_current_font(FontId::PanelTitle, underline));
        assert_eq!(manager.current_theme().theme_type(), ThemeType::User);
        assert_eq!(manager.current_font(FontId::PanelTitle), underline);
        assert_eq!(
            rx.try_recv().unwrap(),
            ThemeEvent::FontChanged {
                id: FontId::PanelTitle,
                font: underline
            }
        );
        assert!(!manager.will_overwrite_user_theme_font(FontId::PanelTitle, current));
    }

    #[test]
    fn test_missing_user_theme_falls_back_to_default() {
        let temp = TempDir::new().unwrap();
        let manager = ThemeManager::load(temp.path(), user_pref());
        assert!(manager.current_theme().is(ThemeType::Predefined, Some(DEFAULT_THEME_NAME)));
        assert_eq!(manager.preference(), &predefined(DEFAULT_THEME_NAME));
    }

    #[test]
    fn test_missing_default_theme_uses_user_theme() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(USER_THEME_FILE_NAME), "[colors]\ndirectory = \"red\"\n").unwrap();

        let manager = ThemeManager::load_with_predefined(temp.path().to_path_buf(), predefined("gone"), &[]);
        assert_eq!(manager.current_theme().theme_type(), ThemeType::User);
        assert_eq!(manager.current_color(ColorId::Directory), Color::Red);
        assert!(!manager.is_user_theme_modified());
        assert_eq!(manager.preference(), &user_pref());
    }

    #[test]
    fn test_nothing_loadable_uses_empty_user_theme() {
        let temp = TempDir::new().unwrap();
        let manager = ThemeManager::load_with_predefined(temp.path().to_path_buf(), predefined("gone"), &[]);
        assert_eq!(manager.current_theme().theme_type(), ThemeType::User);
        assert_eq!(manager.current_theme().data(), &ThemeData::new());
        assert!(manager.is_user_theme_modified());
        assert_eq!(manager.preference(), &user_pref());
        assert!(manager.predefined_theme_names().is_empty());

        // 설정이 사용자 테마였으면 사용자 테마를 다시 읽지 않는다
        fs::write(temp.path().join(USER_THEME_FILE_NAME), "not = [valid").unwrap();
        let manager = ThemeManager::load_with_predefined(temp.path().to_path_buf(), user_pref(), &[]);
        assert_eq!(manager.current_theme().data(), &ThemeData::new());
        assert!(manager.is_user_theme_modified());
    }

    #[test]
    fn test_modified_user_theme_saved_when_switching() {
        let temp = TempDir::new().unwrap();
        let mut manager = ThemeManager::load(temp.path(), predefined("light"));

        manager.set_current_color(ColorId::Error, ThemeColor(Color::Magenta));
        assert!(manager.is_user_theme_modified());
        let dark = manager.read_theme(ThemeType::Predefined, Some("dark")).unwrap();
        manager.set_current_theme(dark);

        let user = manager.read_theme(ThemeType::User, None).unwrap();
        assert_eq!(user.color(ColorId::Error), Color::Magenta);
    }

    #[test]
    fn test_overwrite_user_theme() {
        let temp = TempDir::new().unwrap();
        let mut manager = ThemeManager::load(temp.path(), predefined("dark"));
        let mut data = ThemeData::new();
        data.set_color(ColorId::Success, ThemeColor(Color::LightGreen));

        // 현재가 사용자 테마가 아니면 파일만 쓴다
        let theme = manager.overwrite_user_theme(&data).unwrap();
        assert_eq!(theme.theme_type(), ThemeType::User);
        assert!(manager.current_theme().is(ThemeType::Predefined, Some("dark")));
        let stored = manager.read_theme(ThemeType::User, None).unwrap();
        assert_eq!(stored.data(), &data);

        manager.set_current_theme(stored);
        let mut other = ThemeData::new();
        other.set_color(ColorId::Success, ThemeColor(Color::Blue));
        let theme = manager.overwrite_user_theme(&other).unwrap();
        assert_eq!(theme.color(ColorId::Success), Color::Blue);
        assert_eq!(manager.current_color(ColorId::Success), Color::Blue);
    }

    #[test]
    fn test_set_user_theme_file_rejects_directory() {
        let temp = TempDir::new().unwrap();
        let mut manager = ThemeManager::load(temp.path(), predefined("dark"));
        assert!(manager.set_user_theme_file(temp.path()).is_err());

        let custom = temp.path().join("elsewhere.toml");
        manager.set_user_theme_file(&custom).unwrap();
        assert_eq!(manager.user_theme_file(), custom);
    }
}
