#![allow(dead_code)]

use ratatui::style::{Color, Modifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 색상 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorId {
    // 배경/전경
    Background,
    Foreground,

    // 패널
    PanelBorderActive,
    PanelBorderInactive,
    PanelBackground,

    // 파일 리스트
    FileNormal,
    FileSelected,
    FileSelectedBackground,
    FileMarked,
    Directory,
    Executable,
    Symlink,
    Archive,

    // UI 컴포넌트
    StatusBarBackground,
    StatusBarForeground,
    CommandBarBackground,
    CommandBarForeground,

    // 강조
    Accent,
    Warning,
    Error,
    Success,
}

impl ColorId {
    pub const ALL: [ColorId; 21] = [
        ColorId::Background,
        ColorId::Foreground,
        ColorId::PanelBorderActive,
        ColorId::PanelBorderInactive,
        ColorId::PanelBackground,
        ColorId::FileNormal,
        ColorId::FileSelected,
        ColorId::FileSelectedBackground,
        ColorId::FileMarked,
        ColorId::Directory,
        ColorId::Executable,
        ColorId::Symlink,
        ColorId::Archive,
        ColorId::StatusBarBackground,
        ColorId::StatusBarForeground,
        ColorId::CommandBarBackground,
        ColorId::CommandBarForeground,
        ColorId::Accent,
        ColorId::Warning,
        ColorId::Error,
        ColorId::Success,
    ];

    /// 테마 파일에서 쓰는 키
    pub fn key(&self) -> &'static str {
        match self {
            ColorId::Background => "background",
            ColorId::Foreground => "foreground",
            ColorId::PanelBorderActive => "panel_border_active",
            ColorId::PanelBorderInactive => "panel_border_inactive",
            ColorId::PanelBackground => "panel_background",
            ColorId::FileNormal => "file_normal",
            ColorId::FileSelected => "file_selected",
            ColorId::FileSelectedBackground => "file_selected_background",
            ColorId::FileMarked => "file_marked",
            ColorId::Directory => "directory",
            ColorId::Executable => "executable",
            ColorId::Symlink => "symlink",
            ColorId::Archive => "archive",
            ColorId::StatusBarBackground => "status_bar_background",
            ColorId::StatusBarForeground => "status_bar_foreground",
            ColorId::CommandBarBackground => "command_bar_background",
            ColorId::CommandBarForeground => "command_bar_foreground",
            ColorId::Accent => "accent",
            ColorId::Warning => "warning",
            ColorId::Error => "error",
            ColorId::Success => "success",
        }
    }

    pub fn from_key(key: &str) -> Option<ColorId> {
        ColorId::ALL.iter().copied().find(|id| id.key() == key)
    }

    /// 테마 파일에 값이 없을 때 쓰는 기본값
    fn default_color(&self) -> Color {
        match self {
            ColorId::Background
            | ColorId::Foreground
            | ColorId::PanelBackground
            | ColorId::FileNormal
            | ColorId::CommandBarBackground => Color::Reset,
            ColorId::PanelBorderActive | ColorId::FileSelectedBackground | ColorId::Accent => {
                Color::Cyan
            }
            ColorId::PanelBorderInactive => Color::DarkGray,
            ColorId::FileSelected => Color::Black,
            ColorId::FileMarked | ColorId::Warning => Color::Yellow,
            ColorId::Directory | ColorId::StatusBarBackground => Color::Blue,
            ColorId::Executable | ColorId::Success => Color::Green,
            ColorId::Symlink => Color::Magenta,
            ColorId::Archive | ColorId::Error => Color::Red,
            ColorId::StatusBarForeground => Color::White,
            ColorId::CommandBarForeground => Color::Gray,
        }
    }
}

/// 폰트 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontId {
    FileList,
    StatusBar,
    CommandBar,
    Popup,
    PanelTitle,
}

impl FontId {
    pub const ALL: [FontId; 5] = [
        FontId::FileList,
        FontId::StatusBar,
        FontId::CommandBar,
        FontId::Popup,
        FontId::PanelTitle,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FontId::FileList => "file_list",
            FontId::StatusBar => "status_bar",
            FontId::CommandBar => "command_bar",
            FontId::Popup => "popup",
            FontId::PanelTitle => "panel_title",
        }
    }

    pub fn from_key(key: &str) -> Option<FontId> {
        FontId::ALL.iter().copied().find(|id| id.key() == key)
    }

    fn default_font(&self) -> ThemeFont {
        match self {
            FontId::PanelTitle => ThemeFont {
                bold: true,
                ..ThemeFont::default()
            },
            _ => ThemeFont::default(),
        }
    }
}

/// 테마 색상
///
/// Hex 문자열("#1e1e1e") 또는 색상 이름("red")을 지원합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColor(pub Color);

impl ThemeColor {
    pub fn parse(value: &str) -> Option<ThemeColor> {
        let value = value.trim();
        if value.starts_with('#') {
            parse_hex_color(value).map(ThemeColor)
        } else {
            parse_named_color(value).map(ThemeColor)
        }
    }

    pub fn color(&self) -> Color {
        self.0
    }
}

impl From<Color> for ThemeColor {
    fn from(color: Color) -> Self {
        ThemeColor(color)
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.0 {
            Color::Rgb(r, g, b) => return write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Indexed(i) => return write!(f, "{}", i),
            Color::Reset => "reset",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::Gray => "gray",
            Color::DarkGray => "darkgray",
            Color::LightRed => "lightred",
            Color::LightGreen => "lightgreen",
            Color::LightYellow => "lightyellow",
            Color::LightBlue => "lightblue",
            Color::LightMagenta => "lightmagenta",
            Color::LightCyan => "lightcyan",
            Color::White => "white",
        };
        f.write_str(name)
    }
}

/// Hex 색상 문자열을 Color로 파싱
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// 색상 이름(또는 256색 인덱스)을 Color로 파싱
fn parse_named_color(name: &str) -> Option<Color> {
    let color = match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        other => return other.parse::<u8>().ok().map(Color::Indexed),
    };
    Some(color)
}

/// 터미널용 폰트 (스타일 수식자)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeFont {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl ThemeFont {
    pub fn modifier(&self) -> Modifier {
        let mut modifier = Modifier::empty();
        if self.bold {
            modifier |= Modifier::BOLD;
        }
        if self.italic {
            modifier |= Modifier::ITALIC;
        }
        if self.underline {
            modifier |= Modifier::UNDERLINED;
        }
        modifier
    }
}

/// 테마 데이터
///
/// 명시된 값만 보관하고, 나머지는 기본값으로 채운다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeData {
    colors: BTreeMap<ColorId, ThemeColor>,
    fonts: BTreeMap<FontId, ThemeFont>,
}

impl ThemeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self, id: ColorId) -> ThemeColor {
        self.colors
            .get(&id)
            .copied()
            .unwrap_or_else(|| ThemeColor(id.default_color()))
    }

    pub fn font(&self, id: FontId) -> ThemeFont {
        self.fonts
            .get(&id)
            .copied()
            .unwrap_or_else(|| id.default_font())
    }

    /// 명시적으로 지정된 색상만
    pub fn explicit_color(&self, id: ColorId) -> Option<ThemeColor> {
        self.colors.get(&id).copied()
    }

    pub fn explicit_font(&self, id: FontId) -> Option<ThemeFont> {
        self.fonts.get(&id).copied()
    }

    /// 값 변경, 실제로 바뀌었으면 true
    pub fn set_color(&mut self, id: ColorId, color: ThemeColor) -> bool {
        let changed = self.is_color_different(id, color);
        self.colors.insert(id, color);
        changed
    }

    pub fn set_font(&mut self, id: FontId, font: ThemeFont) -> bool {
        let changed = self.is_font_different(id, font);
        self.fonts.insert(id, font);
        changed
    }

    pub fn is_color_different(&self, id: ColorId, color: ThemeColor) -> bool {
        self.color(id) != color
    }

    pub fn is_font_different(&self, id: FontId, font: ThemeFont) -> bool {
        self.font(id) != font
    }

    /// 다른 데이터의 명시 값으로 교체
    pub fn import_data(&mut self, other: &ThemeData) {
        self.colors = other.colors.clone();
        self.fonts = other.fonts.clone();
    }

    pub fn clone_data(&self) -> ThemeData {
        self.clone()
    }
}

/// 테마 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    /// 사용자가 수정한 단일 테마
    User,
    /// 프로그램에 내장된 테마
    Predefined,
    /// 사용자가 가져오거나 복제한 테마
    Custom,
}

impl ThemeType {
    pub fn label(&self) -> &'static str {
        match self {
            ThemeType::User => "user",
            ThemeType::Predefined => "predefined",
            ThemeType::Custom => "custom",
        }
    }

    pub fn from_label(label: &str) -> Option<ThemeType> {
        match label {
            "user" => Some(ThemeType::User),
            "predefined" => Some(ThemeType::Predefined),
            "custom" => Some(ThemeType::Custom),
            _ => None,
        }
    }
}

/// 사용자 테마 표시 이름
pub const USER_THEME_NAME: &str = "Custom theme";

/// 테마: 종류 + 이름 + 데이터
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    theme_type: ThemeType,
    name: String,
    data: ThemeData,
}

impl Theme {
    pub fn new(theme_type: ThemeType, name: impl Into<String>, data: ThemeData) -> Self {
        let name = match theme_type {
            ThemeType::User => USER_THEME_NAME.to_string(),
            _ => name.into(),
        };
        Self {
            theme_type,
            name,
            data,
        }
    }

    pub fn user(data: ThemeData) -> Self {
        Self::new(ThemeType::User, USER_THEME_NAME, data)
    }

    pub fn theme_type(&self) -> ThemeType {
        self.theme_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ThemeData {
        &self.data
    }

    pub(super) fn data_mut(&mut self) -> &mut ThemeData {
        &mut self.data
    }

    pub(super) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 종류 변경 (사용자 테마가 되면 이름도 바뀐다)
    pub(super) fn set_type(&mut self, theme_type: ThemeType) {
        self.theme_type = theme_type;
        if theme_type == ThemeType::User {
            self.name = USER_THEME_NAME.to_string();
        }
    }

    /// 같은 테마를 가리키는지 (사용자 테마는 하나뿐)
    pub fn is(&self, theme_type: ThemeType, name: Option<&str>) -> bool {
        self.theme_type == theme_type
            && (theme_type == ThemeType::User || name == Some(self.name.as_str()))
    }

    pub fn color(&self, id: ColorId) -> Color {
        self.data.color(id).color()
    }

    pub fn font(&self, id: FontId) -> ThemeFont {
        self.data.font(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(
            ThemeColor::parse("#1e1e1e"),
            Some(ThemeColor(Color::Rgb(30, 30, 30)))
        );
        assert_eq!(ThemeColor::parse("#12345"), None);
        assert_eq!(ThemeColor::parse("#zzzzzz"), None);
    }

    #[test]
    fn test_named_color_parsing() {
        assert_eq!(ThemeColor::parse("Red"), Some(ThemeColor(Color::Red)));
        assert_eq!(ThemeColor::parse("grey"), Some(ThemeColor(Color::Gray)));
        assert_eq!(ThemeColor::parse("208"), Some(ThemeColor(Color::Indexed(208))));
        assert_eq!(ThemeColor::parse("chartreuse"), None);
    }

    #[test]
    fn test_color_display_parses_back() {
        for value in ["#0078d4", "darkgray", "reset", "17"] {
            let color = ThemeColor::parse(value).unwrap();
            assert_eq!(color.to_string(), value);
        }
    }

    #[test]
    fn test_keys_are_unique() {
        for id in ColorId::ALL {
            assert_eq!(ColorId::from_key(id.key()), Some(id));
        }
        for id in FontId::ALL {
            assert_eq!(FontId::from_key(id.key()), Some(id));
        }
        assert_eq!(ColorId::from_key("menu_bar_bg"), None);
    }

    #[test]
    fn test_theme_data_defaults_and_difference() {
        let mut data = ThemeData::new();
        let default_dir = data.color(ColorId::Directory);

        // 기본값과 같은 값은 변경으로 보지 않는다
        assert!(!data.is_color_different(ColorId::Directory, default_dir));
        assert!(!data.set_color(ColorId::Directory, default_dir));
        assert!(data.set_color(ColorId::Directory, ThemeColor(Color::Rgb(1, 2, 3))));
        assert_eq!(data.color(ColorId::Directory), ThemeColor(Color::Rgb(1, 2, 3)));

        assert!(data.font(FontId::PanelTitle).bold);
        let underline = ThemeFont {
            underline: true,
            ..ThemeFont::default()
        };
        assert!(data.set_font(FontId::StatusBar, underline));
        assert_eq!(data.font(FontId::StatusBar).modifier(), Modifier::UNDERLINED);
    }

    #[test]
    fn test_import_data_replaces_values() {
        let mut a = ThemeData::new();
        a.set_color(ColorId::Accent, ThemeColor(Color::Red));
        let mut b = ThemeData::new();
        b.set_color(ColorId::Error, ThemeColor(Color::Green));

        a.import_data(&b);
        assert_eq!(a.explicit_color(ColorId::Accent), None);
        assert_eq!(a.color(ColorId::Error), ThemeColor(Color::Green));
    }

    #[test]
    fn test_theme_identity() {
        let user = Theme::user(ThemeData::new());
        assert_eq!(user.name(), USER_THEME_NAME);
        assert!(user.is(ThemeType::User, None));
        assert!(user.is(ThemeType::User, Some("anything")));

        let dark = Theme::new(ThemeType::Predefined, "dark", ThemeData::new());
        assert!(dark.is(ThemeType::Predefined, Some("dark")));
        assert!(!dark.is(ThemeType::Custom, Some("dark")));
        assert!(!dark.is(ThemeType::Predefined, None));
    }

    #[test]
    fn test_theme_type_labels() {
        for t in [ThemeType::User, ThemeType::Predefined, ThemeType::Custom] {
            assert_eq!(ThemeType::from_label(t.label()), Some(t));
        }
        assert_eq!(ThemeType::from_label("bogus"), None);
    }
}
