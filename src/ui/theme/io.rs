// Theme file I/O
//
// 테마 파일 형식 (TOML):
//
//   [colors]
//   directory = "#569cd6"
//
//   [fonts]
//   panel_title = { bold = true }

use super::data::{ColorId, FontId, ThemeColor, ThemeData, ThemeFont};
use crate::utils::error::{MuError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 테마 파일 확장자
pub const THEME_EXTENSION: &str = "toml";

/// 내장 테마 목록 (이름, 원문)
pub type ThemeSources = &'static [(&'static str, &'static str)];

pub const PREDEFINED_THEMES: ThemeSources = &[
    ("dark", include_str!("../../../resources/themes/dark.toml")),
    ("light", include_str!("../../../resources/themes/light.toml")),
    (
        "high_contrast",
        include_str!("../../../resources/themes/high_contrast.toml"),
    ),
];

pub fn predefined_source(sources: ThemeSources, name: &str) -> Option<&'static str> {
    sources
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| *source)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    colors: BTreeMap<String, String>,
    #[serde(default)]
    fonts: BTreeMap<String, ThemeFont>,
}

/// 테마 파일 파싱
///
/// 알 수 없는 키는 무시하고, 잘못된 색상 값은 오류로 처리한다.
pub fn parse_theme_data(content: &str, source_name: &str) -> Result<ThemeData> {
    let file: ThemeFile = toml::from_str(content).map_err(|e| MuError::ThemeParse {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })?;

    let mut data = ThemeData::new();
    for (key, value) in &file.colors {
        let Some(id) = ColorId::from_key(key) else {
            tracing::debug!(source = source_name, key = %key, "ignoring unknown theme color");
            continue;
        };
        let color = ThemeColor::parse(value).ok_or_else(|| MuError::ThemeParse {
            source_name: source_name.to_string(),
            reason: format!("invalid color for {}: {}", key, value),
        })?;
        data.set_color(id, color);
    }
    for (key, font) in &file.fonts {
        match FontId::from_key(key) {
            Some(id) => {
                data.set_font(id, *font);
            }
            None => {
                tracing::debug!(source = source_name, key = %key, "ignoring unknown theme font");
            }
        }
    }
    Ok(data)
}

/// 테마 데이터 직렬화 (명시된 값만 기록)
pub fn serialize_theme_data(data: &ThemeData) -> Result<String> {
    let mut file = ThemeFile::default();
    for id in ColorId::ALL {
        if let Some(color) = data.explicit_color(id) {
            file.colors.insert(id.key().to_string(), color.to_string());
        }
    }
    for id in FontId::ALL {
        if let Some(font) = data.explicit_font(id) {
            file.fonts.insert(id.key().to_string(), font);
        }
    }
    toml::to_string_pretty(&file).map_err(|e| MuError::Config(e.to_string()))
}
