// Renderer - 앱 상태를 화면에 그린다

use crate::app::App;
use crate::core::actions::command_bar_actions;
use crate::ui::components::{CommandBar, Panel, PanelStatus, Popup, StatusBar, PANEL_HEADER_LINES};
use crate::ui::layout::{calculate_areas, LayoutMode, MIN_HEIGHT, MIN_WIDTH};
use crate::ui::theme::{ColorId, Theme};
use crate::ui::ActivePanel;
use crate::utils::formatter::format_file_size;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

/// 전체 화면 렌더링
pub fn render(frame: &mut Frame<'_>, app: &mut App) {
    let size = frame.area();
    let (mode, areas) = calculate_areas(size, app.active_panel);

    if mode == LayoutMode::TooSmall {
        render_too_small(frame, app.theme_manager.current_theme(), size);
        return;
    }

    // 패널 테두리(2) + 헤더를 뺀 실제 목록 높이
    let list_height = (areas.panel(app.active_panel).height as usize).saturating_sub(2 + PANEL_HEADER_LINES);
    app.set_visible_rows(list_height);

    let theme = app.theme_manager.current_theme();
    for side in [ActivePanel::Left, ActivePanel::Right] {
        if mode == LayoutMode::SinglePanel && side != app.active_panel {
            continue;
        }
        let tabs = app.tabs(side);
        let status = if side == app.active_panel {
            PanelStatus::Active
        } else {
            PanelStatus::Inactive
        };
        let panel = Panel::new(tabs.active(), theme)
            .tabs(tabs.titles(), tabs.active_index())
            .status(status);
        frame.render_widget(panel, areas.panel(side));
    }

    render_status_bar(frame, app, theme, areas.status_bar);

    let commands = command_bar_actions()
        .into_iter()
        .map(|(action, item)| item.enabled(app.is_action_enabled(action)))
        .collect();
    frame.render_widget(CommandBar::new(theme).commands(commands), areas.command_bar);

    if let Some(popup) = &app.popup {
        frame.render_widget(Popup::new(popup, theme), size);
    }
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, theme: &Theme, area: Rect) {
    let panel = app.active_panel_state();
    let total_size = format_file_size(panel.total_size());
    let marked_size = format_file_size(panel.marked_size());
    let right_info = format!("{} | {}", panel.sort_indicator(), theme.name());

    let status_bar = StatusBar::new(theme)
        .file_count(panel.file_count())
        .dir_count(panel.dir_count())
        .total_size(&total_size)
        .marked(panel.marked.len(), &marked_size)
        .right_info(&right_info)
        .message(app.toast());
    frame.render_widget(status_bar, area);
}

/// 터미널이 너무 작을 때 안내
fn render_too_small(frame: &mut Frame<'_>, theme: &Theme, area: Rect) {
    let lines = vec![
        Line::styled("Terminal too small", Style::default().fg(theme.color(ColorId::Warning))),
        Line::styled(
            format!("Current: {}x{}", area.width, area.height),
            Style::default().fg(theme.color(ColorId::Error)),
        ),
        Line::styled(
            format!("Required: {}x{}", MIN_WIDTH, MIN_HEIGHT),
            Style::default().fg(theme.color(ColorId::Success)),
        ),
    ];
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let body = Rect::new(area.x, area.y + top, area.width, area.height.saturating_sub(top));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(
            Style::default()
                .bg(theme.color(ColorId::Background))
                .fg(theme.color(ColorId::Foreground)),
        );
    frame.render_widget(paragraph, body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppConfig;
    use crate::utils::clipboard::MemoryClipboard;
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs;
    use tempfile::TempDir;

    fn make_app(temp: &TempDir) -> App {
        let folder = temp.path().join("work");
        fs::create_dir_all(folder.join("docs")).unwrap();
        fs::write(folder.join("readme.md"), "hi").unwrap();
        let config = AppConfig {
            prefs_dir: temp.path().join("prefs"),
            left_folder: Some(folder.clone()),
            right_folder: Some(folder),
        };
        App::with_clipboard(config, Box::new(MemoryClipboard::default())).unwrap()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_render_dual_panel() {
        let temp = TempDir::new().unwrap();
        let mut app = make_app(&temp);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("readme.md"));
        assert!(text.contains("Copy"));
        assert!(text.contains("Name ↑"));
        // 30줄 - 상태바/커맨드바(2) - 테두리(2) - 헤더(3)
        assert_eq!(app.visible_rows(), 23);
    }

    #[test]
    fn test_render_too_small() {
        let temp = TempDir::new().unwrap();
        let mut app = make_app(&temp);
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();

        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert!(screen_text(&terminal).contains("Terminal too small"));
    }

    #[test]
    fn test_render_popup() {
        let temp = TempDir::new().unwrap();
        let mut app = make_app(&temp);
        app.execute_action(crate::core::actions::Action::ShowHelp);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert!(screen_text(&terminal).contains("Navigation"));
    }
}
