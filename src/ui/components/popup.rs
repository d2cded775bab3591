// Popup component - 입력/확인/목록/도움말/메시지 팝업

mod kind;
mod text_input;

pub use kind::{ConfirmPurpose, InputPurpose, ListPurpose, PopupKind};
pub use text_input::TextInput;

use crate::core::actions::generate_help_entries;
use crate::ui::theme::{ColorId, FontId, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const POPUP_H_PADDING: u16 = 2;
const POPUP_V_PADDING: u16 = 1;

/// 도움말 팝업 행 수 (스크롤 범위 계산용)
pub fn help_row_count() -> usize {
    generate_help_entries()
        .iter()
        .map(|(_, items)| items.len() + 2)
        .sum()
}

/// 팝업 위젯
pub struct Popup<'a> {
    kind: &'a PopupKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    selected_fg: Color,
    selected_bg: Color,
    input_bg: Color,
    muted_color: Color,
    error_color: Color,
    modifier: Modifier,
}

impl<'a> Popup<'a> {
    pub fn new(kind: &'a PopupKind, theme: &Theme) -> Self {
        Self {
            kind,
            bg_color: theme.color(ColorId::PanelBackground),
            fg_color: theme.color(ColorId::Foreground),
            border_color: theme.color(ColorId::PanelBorderActive),
            title_color: theme.color(ColorId::Accent),
            selected_fg: theme.color(ColorId::FileSelected),
            selected_bg: theme.color(ColorId::FileSelectedBackground),
            input_bg: theme.color(ColorId::Background),
            muted_color: theme.color(ColorId::PanelBorderInactive),
            error_color: theme.color(ColorId::Error),
            modifier: theme.font(FontId::Popup).modifier(),
        }
    }

    /// 팝업 영역 계산 (화면 중앙)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            PopupKind::Input { .. } => (56u16, 6u16),
            PopupKind::Confirm { message, .. } => (50, 6 + message.lines().count().max(1) as u16),
            PopupKind::List { items, .. } => (50, (items.len().max(1) as u16) + 4),
            PopupKind::Help { .. } => (62, sh.saturating_sub(4)),
            PopupKind::Message { message, .. } => (50, 5 + message.lines().count().max(1) as u16),
        };

        let width = width.min(sw.saturating_sub(4)).max(20.min(sw));
        let height = height.min(sh.saturating_sub(2)).max(3.min(sh));

        Rect {
            x: screen.x + sw.saturating_sub(width) / 2,
            y: screen.y + sh.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    fn block(&self, title: &str, border: Color) -> Block<'static> {
        Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(self.title_color).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.bg_color))
    }

    fn inner(area: Rect) -> Rect {
        Rect {
            x: area.x + POPUP_H_PADDING,
            y: area.y + POPUP_V_PADDING,
            width: area.width.saturating_sub(POPUP_H_PADDING * 2),
            height: area.height.saturating_sub(POPUP_V_PADDING * 2),
        }
    }

    fn text_style(&self) -> Style {
        Style::default().fg(self.fg_color).add_modifier(self.modifier)
    }

    fn hint(&self, buf: &mut Buffer, area: Rect, hint: &str) {
        let x = area.x + area.width.saturating_sub(hint.width() as u16) / 2;
        buf.set_string(x, area.y + area.height - 1, hint, Style::default().fg(self.muted_color));
    }

    /// 입력 팝업 렌더링
    fn render_input(&self, buf: &mut Buffer, area: Rect, title: &str, prompt: &str, input: &TextInput) {
        self.block(title, self.border_color).render(area, buf);
        let inner = Self::inner(area);
        if inner.height < 2 || inner.width < 3 {
            return;
        }
        buf.set_string(inner.x, inner.y, prompt, self.text_style());

        // 입력 필드 배경
        let input_y = inner.y + 1;
        buf.set_style(
            Rect::new(inner.x, input_y, inner.width, 1),
            Style::default().bg(self.input_bg),
        );

        // 커서가 보이도록 앞부분을 잘라서 표시
        let value = input.value();
        let max_display = inner.width as usize - 2;
        let cursor_col: usize = value[..input.cursor()]
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum();
        let mut start_byte = 0;
        let mut skipped = 0;
        if cursor_col >= max_display {
            start_byte = value.len();
            let target = cursor_col + 1 - max_display;
            for (i, c) in value.char_indices() {
                if skipped >= target {
                    start_byte = i;
                    break;
                }
                skipped += c.width().unwrap_or(0);
            }
        }
        let value_style = self.text_style().bg(self.input_bg);
        buf.set_stringn(inner.x + 1, input_y, &value[start_byte..], max_display, value_style);

        let cursor_x = inner.x + 1 + (cursor_col - skipped) as u16;
        if let Some(cell) = buf.cell_mut((cursor_x, input_y)) {
            if input.cursor() < value.len() {
                cell.set_style(Style::default().fg(self.input_bg).bg(self.fg_color));
            } else {
                cell.set_char('▏');
                cell.set_style(Style::default().fg(self.fg_color).bg(self.input_bg));
            }
        }

        self.hint(buf, area, " Enter:OK  Esc:Cancel ");
    }

    /// 확인 팝업 렌더링
    fn render_confirm(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str, selected_button: usize) {
        self.block(title, self.border_color).render(area, buf);
        let inner = Self::inner(area);
        Paragraph::new(message)
            .style(self.text_style())
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    height: inner.height.saturating_sub(1),
                    ..inner
                },
                buf,
            );

        let button_y = area.y + area.height.saturating_sub(2);
        let buttons = [" OK ", " Cancel "];
        let total: u16 = buttons.iter().map(|b| b.width() as u16).sum::<u16>() + 2;
        let mut x = area.x + area.width.saturating_sub(total) / 2;
        for (i, label) in buttons.iter().enumerate() {
            let style = if i == selected_button {
                Style::default().fg(self.selected_fg).bg(self.selected_bg)
            } else {
                Style::default().fg(self.fg_color).bg(self.input_bg)
            };
            buf.set_string(x, button_y, *label, style);
            x += label.width() as u16 + 2;
        }
    }

    /// 목록 팝업 렌더링
    fn render_list(&self, buf: &mut Buffer, area: Rect, title: &str, items: &[String], selected_index: usize) {
        self.block(title, self.border_color).render(area, buf);
        let inner = Self::inner(area);
        let visible = inner.height.saturating_sub(1) as usize;
        if visible == 0 {
            return;
        }

        if items.is_empty() {
            buf.set_string(inner.x, inner.y, "(empty)", Style::default().fg(self.muted_color));
        }

        let start = (selected_index + 1).saturating_sub(visible);
        for (row, (i, item)) in items.iter().enumerate().skip(start).take(visible).enumerate() {
            let style = if i == selected_index {
                Style::default().fg(self.selected_fg).bg(self.selected_bg)
            } else {
                self.text_style()
            };
            let line = format!(" {:<width$}", item, width = (inner.width as usize).saturating_sub(1));
            buf.set_stringn(inner.x, inner.y + row as u16, line, inner.width as usize, style);
        }

        self.hint(buf, area, " Enter:Select  Esc:Close ");
    }

    /// 도움말 팝업 렌더링
    fn render_help(&self, buf: &mut Buffer, area: Rect, scroll_offset: usize) {
        self.block("Keyboard Shortcuts", self.border_color).render(area, buf);
        let inner = Self::inner(area);
        let visible = inner.height.saturating_sub(1) as usize;

        let header_style = Style::default().fg(self.title_color).add_modifier(Modifier::BOLD);
        let key_style = Style::default().fg(self.border_color);

        let mut rows: Vec<(bool, String, &str)> = Vec::new();
        for (category, items) in generate_help_entries() {
            rows.push((true, category.to_string(), ""));
            for (keys, label) in items {
                rows.push((false, keys, label));
            }
            rows.push((false, String::new(), ""));
        }

        let max_scroll = rows.len().saturating_sub(visible);
        let key_col_width = 18u16;
        for (i, (is_header, col1, col2)) in rows.iter().skip(scroll_offset.min(max_scroll)).take(visible).enumerate() {
            let y = inner.y + i as u16;
            if *is_header {
                buf.set_string(inner.x, y, col1, header_style);
            } else if !col1.is_empty() {
                buf.set_string(inner.x + 2, y, col1, key_style);
                buf.set_string(inner.x + key_col_width, y, *col2, self.text_style());
            }
        }

        self.hint(buf, area, " Esc/?:Close  j/k:Scroll ");
    }

    /// 에러/메시지 팝업 렌더링
    fn render_message(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str, is_error: bool) {
        let border = if is_error { self.error_color } else { self.border_color };
        self.block(title, border).render(area, buf);
        Paragraph::new(message)
            .style(self.text_style())
            .wrap(Wrap { trim: true })
            .render(Self::inner(area), buf);
        self.hint(buf, area, " Enter:OK ");
    }
}

impl Widget for Popup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = self.calculate_area(area);
        if popup_area.width < 6 || popup_area.height < 3 {
            return;
        }
        Clear.render(popup_area, buf);

        match self.kind {
            PopupKind::Input { title, prompt, input, .. } => {
                self.render_input(buf, popup_area, title, prompt, input)
            }
            PopupKind::Confirm {
                title,
                message,
                selected_button,
                ..
            } => self.render_confirm(buf, popup_area, title, message, *selected_button),
            PopupKind::List {
                title,
                items,
                selected_index,
                ..
            } => self.render_list(buf, popup_area, title, items, *selected_index),
            PopupKind::Help { scroll_offset } => self.render_help(buf, popup_area, *scroll_offset),
            PopupKind::Message {
                title,
                message,
                is_error,
            } => self.render_message(buf, popup_area, title, message, *is_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::data::ThemeData;

    fn render(kind: &PopupKind) -> Buffer {
        let theme = Theme::user(ThemeData::new());
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        Popup::new(kind, &theme).render(area, &mut buf);
        buf
    }

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_list_builder_clamps_selection() {
        let kind = PopupKind::list("Themes", vec!["a".into(), "b".into()], 9, ListPurpose::Bookmarks);
        assert!(matches!(kind, PopupKind::List { selected_index: 1, .. }));
    }

    #[test]
    fn test_render_input_shows_value() {
        let kind = PopupKind::input(
            "Rename",
            "New name:",
            TextInput::new("notes.txt"),
            InputPurpose::DuplicateThemeName,
        );
        let text = screen_text(&render(&kind));
        assert!(text.contains(" Rename "));
        assert!(text.contains("New name:"));
        assert!(text.contains("notes.txt"));
    }

    #[test]
    fn test_render_help_lists_categories() {
        let text = screen_text(&render(&PopupKind::help()));
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Navigation"));
        assert!(help_row_count() > 20);
    }

    #[test]
    fn test_render_error_uses_error_border() {
        let theme = Theme::user(ThemeData::new());
        let kind = PopupKind::error("Error", "boom");
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        Popup::new(&kind, &theme).render(area, &mut buf);
        let popup = Popup::new(&kind, &theme).calculate_area(area);
        assert_eq!(buf[(popup.x, popup.y)].fg, theme.color(ColorId::Error));
        assert!(screen_text(&buf).contains("boom"));
    }
}
