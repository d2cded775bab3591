// Command bar component - 하단 커맨드 바 컴포넌트
//
// 액션 레지스트리에서 생성한 단축키 힌트 표시

use crate::ui::theme::{ColorId, FontId, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// 커맨드 항목
#[derive(Debug, Clone)]
pub struct CommandItem {
    /// 단축키 (y, x, ...)
    pub key: String,
    /// 레이블 (Copy, Move, ...)
    pub label: String,
    /// 활성화 여부
    pub enabled: bool,
}

impl CommandItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// 커맨드 바 컴포넌트
pub struct CommandBar {
    commands: Vec<CommandItem>,
    bg_color: Color,
    key_fg_color: Color,
    label_fg_color: Color,
    disabled_color: Color,
    modifier: Modifier,
}

impl CommandBar {
    pub fn new(theme: &Theme) -> Self {
        Self {
            commands: Vec::new(),
            bg_color: theme.color(ColorId::CommandBarBackground),
            key_fg_color: theme.color(ColorId::Accent),
            label_fg_color: theme.color(ColorId::CommandBarForeground),
            disabled_color: theme.color(ColorId::PanelBorderInactive),
            modifier: theme.font(FontId::CommandBar).modifier(),
        }
    }

    /// 커맨드 목록 설정
    pub fn commands(mut self, commands: Vec<CommandItem>) -> Self {
        self.commands = commands;
        self
    }
}

impl Widget for CommandBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let mut spans = vec![Span::raw(" ")];
        for (i, cmd) in self.commands.iter().enumerate() {
            let (key_style, label_style) = if cmd.enabled {
                (
                    Style::default()
                        .fg(self.key_fg_color)
                        .add_modifier(Modifier::BOLD | self.modifier),
                    Style::default()
                        .fg(self.label_fg_color)
                        .add_modifier(self.modifier),
                )
            } else {
                (
                    Style::default().fg(self.disabled_color),
                    Style::default().fg(self.disabled_color),
                )
            };

            spans.push(Span::styled(cmd.key.clone(), key_style));
            spans.push(Span::styled(":", label_style));
            spans.push(Span::styled(cmd.label.clone(), label_style));

            if i + 1 < self.commands.len() {
                spans.push(Span::raw(" "));
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
