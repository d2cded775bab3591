// Status bar component - 상태바 컴포넌트
//
// 파일/디렉토리 개수, 총 크기, 마킹된 항목, 토스트 메시지 표시

use crate::ui::theme::{ColorId, FontId, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    file_count: usize,
    dir_count: usize,
    total_size: &'a str,
    marked_count: usize,
    marked_size: &'a str,
    /// 오른쪽 정보 (정렬 상태, 테마 이름)
    right_info: &'a str,
    /// 토스트 메시지 (있으면 왼쪽 정보를 대체)
    message: Option<&'a str>,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
    modifier: Modifier,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &Theme) -> Self {
        Self {
            file_count: 0,
            dir_count: 0,
            total_size: "0 B",
            marked_count: 0,
            marked_size: "0 B",
            right_info: "",
            message: None,
            bg_color: theme.color(ColorId::StatusBarBackground),
            fg_color: theme.color(ColorId::StatusBarForeground),
            accent_color: theme.color(ColorId::FileMarked),
            modifier: theme.font(FontId::StatusBar).modifier(),
        }
    }

    pub fn file_count(mut self, count: usize) -> Self {
        self.file_count = count;
        self
    }

    pub fn dir_count(mut self, count: usize) -> Self {
        self.dir_count = count;
        self
    }

    pub fn total_size(mut self, size: &'a str) -> Self {
        self.total_size = size;
        self
    }

    pub fn marked(mut self, count: usize, size: &'a str) -> Self {
        self.marked_count = count;
        self.marked_size = size;
        self
    }

    pub fn right_info(mut self, info: &'a str) -> Self {
        self.right_info = info;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    fn left_spans(&self) -> Vec<Span<'static>> {
        let base = Style::default().fg(self.fg_color).add_modifier(self.modifier);
        if let Some(message) = self.message {
            return vec![Span::styled(
                format!(" {}", message),
                base.fg(self.accent_color),
            )];
        }

        let mut spans = vec![Span::styled(
            format!(
                " {} files, {} dirs | {}",
                self.file_count, self.dir_count, self.total_size
            ),
            base,
        )];
        if self.marked_count > 0 {
            spans.push(Span::styled(
                format!(" | {} marked ({})", self.marked_count, self.marked_size),
                base.fg(self.accent_color),
            ));
        }
        spans
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let mut spans = self.left_spans();
        let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let right = format!("{} ", self.right_info);
        let padding_len = (area.width as usize).saturating_sub(left_len + right.chars().count());
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(right, Style::default().fg(self.fg_color)));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
