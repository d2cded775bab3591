// Preferences - 사용자 설정 저장/로드
//
// `<config_dir>/mucommander/preferences.toml`에 저장된다.
// `MUCOMMANDER_PREFS_DIR` 환경 변수나 `--preferences` 옵션으로 폴더를 바꿀 수 있다.

use crate::ui::theme::ThemeType;
use crate::utils::backup::{read_with_backup, write_with_backup};
use crate::utils::error::{MuError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const PREFS_DIR_ENV: &str = "MUCOMMANDER_PREFS_DIR";
pub const PREFERENCES_FILE_NAME: &str = "preferences.toml";
pub const DEFAULT_THEME_NAME: &str = "dark";
const PREFERENCES_VERSION: u32 = 1;

/// 테마 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePreferences {
    #[serde(rename = "type")]
    pub theme_type: ThemeType,
    /// 사용자 테마는 이름이 없다
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for ThemePreferences {
    fn default() -> Self {
        Self {
            theme_type: ThemeType::Predefined,
            name: Some(DEFAULT_THEME_NAME.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub version: u32,
    pub show_hidden: bool,
    pub left_folder: Option<PathBuf>,
    pub right_folder: Option<PathBuf>,
    pub theme: ThemePreferences,
    pub bookmarks: Vec<Bookmark>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            show_hidden: false,
            left_folder: None,
            right_folder: None,
            theme: ThemePreferences::default(),
            bookmarks: Vec::new(),
        }
    }
}

/// 설정 폴더 결정
///
/// 우선순위: 명시 경로 > 환경 변수 > `<config_dir>/mucommander`
pub fn resolve_prefs_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(custom) = env::var(PREFS_DIR_ENV) {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join("mucommander"))
        .ok_or_else(|| MuError::Config("Cannot locate the configuration directory".to_string()))
}

/// 설정 파일 저장소
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    dir: PathBuf,
}

impl PreferencesStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE_NAME)
    }

    /// 설정 로드
    ///
    /// 파일이 없거나 손상되었으면 기본값을 쓴다.
    pub fn load(&self) -> Preferences {
        let path = self.path();
        let data = match read_with_backup(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no preferences file, using defaults");
                return Preferences::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read preferences");
                return Preferences::default();
            }
        };

        match Self::decode(&data) {
            Some(prefs) => prefs,
            None => {
                tracing::warn!(path = %path.display(), "invalid preferences file, using defaults");
                Preferences::default()
            }
        }
    }

    fn decode(data: &[u8]) -> Option<Preferences> {
        let text = std::str::from_utf8(data).ok()?;
        let parsed: Preferences = toml::from_str(text).ok()?;
        if parsed.version != PREFERENCES_VERSION {
            return None;
        }
        Some(parsed)
    }

    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        let path = self.path();
        let data = toml::to_string_pretty(prefs).map_err(|e| MuError::Config(e.to_string()))?;
        write_with_backup(&path, data.as_bytes()).map_err(|e| MuError::from_io(&path, e))?;
        tracing::debug!(path = %path.display(), "preferences saved");
        Ok(())
    }
}
