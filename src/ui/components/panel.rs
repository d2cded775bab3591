// Panel component - 파일 패널 컴포넌트
//
// 탭 줄, 파일 리스트, 마킹 상태, 테두리 렌더링

use crate::models::file_entry::{FileEntry, FileType};
use crate::models::panel_state::{PanelState, SortBy, SortOrder};
use crate::ui::theme::{ColorId, FontId, Theme};
use crate::utils::formatter::{format_date, format_file_size, format_permissions};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 패널 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Inactive,
    Active,
}

/// 헤더(탭 줄 + 컬럼 헤더 + 구분선) 높이
pub const PANEL_HEADER_LINES: usize = 3;

/// 테마에서 뽑아둔 패널 색상
struct PanelColors {
    active_border: Color,
    inactive_border: Color,
    background: Color,
    normal: Color,
    selected: Color,
    selected_bg: Color,
    marked: Color,
    directory: Color,
    executable: Color,
    symlink: Color,
    archive: Color,
    accent: Color,
    list_modifier: Modifier,
    title_modifier: Modifier,
}

impl PanelColors {
    fn from_theme(theme: &Theme) -> Self {
        Self {
            active_border: theme.color(ColorId::PanelBorderActive),
            inactive_border: theme.color(ColorId::PanelBorderInactive),
            background: theme.color(ColorId::PanelBackground),
            normal: theme.color(ColorId::FileNormal),
            selected: theme.color(ColorId::FileSelected),
            selected_bg: theme.color(ColorId::FileSelectedBackground),
            marked: theme.color(ColorId::FileMarked),
            directory: theme.color(ColorId::Directory),
            executable: theme.color(ColorId::Executable),
            symlink: theme.color(ColorId::Symlink),
            archive: theme.color(ColorId::Archive),
            accent: theme.color(ColorId::Accent),
            list_modifier: theme.font(FontId::FileList).modifier(),
            title_modifier: theme.font(FontId::PanelTitle).modifier(),
        }
    }
}

/// 패널 컴포넌트
pub struct Panel<'a> {
    state: &'a PanelState,
    tab_titles: Vec<String>,
    active_tab: usize,
    status: PanelStatus,
    colors: PanelColors,
}

impl<'a> Panel<'a> {
    pub fn new(state: &'a PanelState, theme: &Theme) -> Self {
        Self {
            state,
            tab_titles: Vec::new(),
            active_tab: 0,
            status: PanelStatus::default(),
            colors: PanelColors::from_theme(theme),
        }
    }

    /// 탭 타이틀 설정
    pub fn tabs(mut self, titles: Vec<String>, active: usize) -> Self {
        self.tab_titles = titles;
        self.active_tab = active;
        self
    }

    pub fn status(mut self, status: PanelStatus) -> Self {
        self.status = status;
        self
    }

    fn border_color(&self) -> Color {
        match self.status {
            PanelStatus::Active => self.colors.active_border,
            PanelStatus::Inactive => self.colors.inactive_border,
        }
    }

    fn title_style(&self) -> Style {
        let base = Style::default().fg(self.colors.normal);
        match self.status {
            PanelStatus::Active => base.add_modifier(self.colors.title_modifier),
            PanelStatus::Inactive => base,
        }
    }

    fn file_icon(file_type: FileType) -> &'static str {
        match file_type {
            FileType::Directory => "/",
            FileType::Archive => "#",
            FileType::Executable => "*",
            FileType::File => " ",
        }
    }

    /// 파일 타입에 따른 색상 반환 (선택되지 않은 상태)
    fn file_color(&self, entry: &FileEntry) -> Color {
        if entry.is_symlink {
            return self.colors.symlink;
        }
        match entry.file_type {
            FileType::Directory => self.colors.directory,
            FileType::Archive => self.colors.archive,
            FileType::Executable => self.colors.executable,
            FileType::File => self.colors.normal,
        }
    }

    /// 경로를 최대 너비에 맞게 축약 (홈 디렉토리 ~로 축약 + 앞부분 생략)
    fn truncate_path(path: &str, max_width: usize) -> String {
        let path = match dirs::home_dir() {
            Some(home) => {
                let home = home.to_string_lossy().to_string();
                match path.strip_prefix(&home) {
                    Some(rest) if !home.is_empty() => format!("~{}", rest),
                    _ => path.to_string(),
                }
            }
            None => path.to_string(),
        };
        if path.width() <= max_width {
            return path;
        }

        let ellipsis = "...";
        let available_width = max_width.saturating_sub(ellipsis.width());
        let mut result = String::new();
        let mut current_width = 0;
        for ch in path.chars().rev() {
            let ch_width = ch.width().unwrap_or(1);
            if current_width + ch_width > available_width {
                break;
            }
            result.insert(0, ch);
            current_width += ch_width;
        }
        format!("{}{}", ellipsis, result)
    }

    /// 파일명을 최대 너비로 잘라냄 (확장자 보존)
    ///
    /// 중간 생략 방식: "very_long_fi...ated.txt"
    /// 확장자 없거나 숨김파일(.bashrc)은 끝에서 자름
    fn truncate_name(name: &str, max_width: usize) -> String {
        if name.width() <= max_width {
            return name.to_string();
        }

        let ellipsis = "...";
        let ellipsis_width = 3;
        let (stem, ext) = match name.rfind('.') {
            Some(dot_pos) if dot_pos > 0 => (&name[..dot_pos], &name[dot_pos..]),
            _ => (name, ""),
        };
        let ext_width = ext.width();

        if ellipsis_width + ext_width >= max_width || ext.is_empty() {
            let mut truncated = String::new();
            let mut current_width = 0;
            for ch in name.chars() {
                let ch_width = ch.width().unwrap_or(1);
                if current_width + ch_width + ellipsis_width > max_width {
                    truncated.push_str(ellipsis);
                    break;
                }
                truncated.push(ch);
                current_width += ch_width;
            }
            return truncated;
        }

        let available_stem_width = max_width - ellipsis_width - ext_width;
        let mut truncated = String::new();
        let mut current_width = 0;
        for ch in stem.chars() {
            let ch_width = ch.width().unwrap_or(1);
            if current_width + ch_width > available_stem_width {
                break;
            }
            truncated.push(ch);
            current_width += ch_width;
        }
        truncated.push_str(ellipsis);
        truncated.push_str(ext);
        truncated
    }
}

/// 컬럼 레이아웃 정보
struct ColumnLayout {
    show_permissions: bool,
    show_size: bool,
    long_date: bool,
    name_width: usize,
    date_width: usize,
}

impl Panel<'_> {
    /// 패널 너비 기반 컬럼 표시 여부/크기 결정
    fn calculate_column_layout(width: usize) -> ColumnLayout {
        let (show_permissions, show_size, long_date) = match width {
            w if w >= 70 => (true, true, true),
            w if w >= 45 => (false, true, false),
            _ => (false, false, false),
        };

        let perm_width = if show_permissions { 12 } else { 0 };
        let date_width = if long_date { 17 } else { 12 };
        let size_width = if show_size { 10 } else { 0 };
        let margins = 3;
        let name_width = width
            .saturating_sub(perm_width)
            .saturating_sub(size_width)
            .saturating_sub(date_width)
            .saturating_sub(margins);

        ColumnLayout {
            show_permissions,
            show_size,
            long_date,
            name_width,
            date_width,
        }
    }

    /// 탭 줄 렌더링
    fn render_tabs(&self, inner: Rect, buf: &mut Buffer, y: &mut u16) {
        let mut spans = Vec::new();
        for (i, title) in self.tab_titles.iter().enumerate() {
            let style = if i == self.active_tab {
                Style::default()
                    .fg(self.colors.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(self.colors.inactive_border)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("{}:{}", i + 1, title), style));
        }
        buf.set_line(inner.x, inner.y + *y, &Line::from(spans), inner.width);
        *y += 1;
    }

    /// 헤더 행 + 구분선 렌더링
    fn render_header(&self, layout: &ColumnLayout, inner: Rect, buf: &mut Buffer, y: &mut u16) {
        let header_style = Style::default()
            .fg(self.colors.inactive_border)
            .add_modifier(Modifier::BOLD);
        let arrow = match self.state.sort_order {
            SortOrder::Ascending => "▲",
            SortOrder::Descending => "▼",
        };
        let sort_by = self.state.sort_by;

        let name_label = match sort_by {
            SortBy::Name => format!("Name {}", arrow),
            SortBy::Extension => format!("Name(Ext) {}", arrow),
            _ => "Name".to_string(),
        };
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                format!("{:<width$}", name_label, width = layout.name_width),
                header_style,
            ),
        ];

        if layout.show_size {
            let size_label = if sort_by == SortBy::Size {
                format!("Size {}", arrow)
            } else {
                "Size".to_string()
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("{:<9}", size_label), header_style));
        }

        let modified_label = if sort_by == SortBy::Modified {
            format!("Modified {}", arrow)
        } else {
            "Modified".to_string()
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{:<width$}", modified_label, width = layout.date_width),
            header_style,
        ));

        if layout.show_permissions {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("{:<11}", "Permissions"), header_style));
        }

        buf.set_line(inner.x, inner.y + *y, &Line::from(spans), inner.width);
        *y += 1;

        buf.set_string(
            inner.x,
            inner.y + *y,
            "─".repeat(inner.width as usize),
            Style::default().fg(self.colors.inactive_border),
        );
        *y += 1;
    }

    fn row_style(&self, is_cursor: bool, fg: Color) -> Style {
        let style = Style::default().fg(fg).add_modifier(self.colors.list_modifier);
        if is_cursor && self.status == PanelStatus::Active {
            style.bg(self.colors.selected_bg)
        } else if is_cursor {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    /// ".." 항목 렌더링
    fn render_parent_entry(&self, inner: Rect, buf: &mut Buffer, y: u16) {
        let is_cursor = self.state.selected_index == 0;
        let fg = if is_cursor {
            self.colors.selected
        } else {
            self.colors.directory
        };
        let style = self.row_style(is_cursor, fg);
        let text = format!(" {:<width$}", "[..]", width = (inner.width as usize).saturating_sub(1));
        buf.set_string(inner.x, inner.y + y, text, style);
    }

    /// 단일 파일 행 렌더링
    fn render_file_entry(&self, entry: &FileEntry, row: usize, layout: &ColumnLayout, inner: Rect, buf: &mut Buffer, y: u16) {
        let is_cursor = row == self.state.selected_index;
        let is_marked = self.state.is_marked(entry);

        let fg = match (is_cursor, is_marked) {
            (_, true) => self.colors.marked,
            (true, false) => self.colors.selected,
            (false, false) => self.file_color(entry),
        };
        let style = self.row_style(is_cursor, fg);
        let marker = if is_marked { "*" } else { " " };

        let icon = Self::file_icon(entry.file_type);
        let display_name = Self::truncate_name(&entry.name, layout.name_width.saturating_sub(2));
        let name_cell = format!("{}{}", icon, display_name);
        let name_padding = layout.name_width.saturating_sub(name_cell.width());

        let mut spans = vec![
            Span::styled(marker, style),
            Span::styled(name_cell, style),
            Span::styled(" ".repeat(name_padding), style),
        ];

        if layout.show_size {
            let size_str = if entry.is_directory() {
                "<DIR>".to_string()
            } else {
                format_file_size(entry.size)
            };
            spans.push(Span::styled(format!(" {:>9}", size_str), style));
        }

        let full_date = format_date(entry.modified);
        let date_str = if layout.long_date {
            full_date
        } else {
            full_date.get(5..).map(str::to_string).unwrap_or(full_date)
        };
        spans.push(Span::styled(
            format!(" {:<width$}", date_str, width = layout.date_width),
            style,
        ));

        if layout.show_permissions {
            spans.push(Span::styled(format!(" {:<11}", format_permissions(entry.mode)), style));
        }

        buf.set_line(inner.x, inner.y + y, &Line::from(spans), inner.width);
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title = self.state.current_path.to_string();
        let display_title = Self::truncate_path(&title, (area.width as usize).saturating_sub(4));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color()))
            .title(Span::styled(format!(" {} ", display_title), self.title_style()))
            .style(Style::default().bg(self.colors.background));

        let inner = block.inner(area);
        block.render(area, buf);

        if (inner.height as usize) <= PANEL_HEADER_LINES {
            return;
        }

        let layout = Self::calculate_column_layout(inner.width as usize);
        let mut y: u16 = 0;
        self.render_tabs(inner, buf, &mut y);
        self.render_header(&layout, inner, buf, &mut y);

        let visible = (inner.height - y) as usize;
        let offset = usize::from(self.state.has_parent());
        let start = self.state.scroll_offset;
        let end = (start + visible).min(self.state.row_count());

        for row in start..end {
            if row < offset {
                self.render_parent_entry(inner, buf, y);
            } else if let Some(entry) = self.state.entries.get(row - offset) {
                self.render_file_entry(entry, row, &layout, inner, buf, y);
            }
            y += 1;
        }

        if self.state.row_count() == 0 {
            buf.set_string(
                inner.x,
                inner.y + y,
                " (No files)",
                Style::default().fg(self.colors.inactive_border),
            );
        }
    }
}
