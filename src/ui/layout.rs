// Layout system - 반응형 레이아웃
//
// 터미널 크기에 따른 레이아웃 모드:
// - 80+ cols: 듀얼 패널 모드
// - 40-79 cols: 싱글 패널 모드 (활성 패널만 표시)
// - <40 cols 또는 15줄 미만: 경고 메시지 표시

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 15;
pub const DUAL_PANEL_MIN_WIDTH: u16 = 80;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    DualPanel,
    SinglePanel,
    TooSmall,
}

/// 활성 패널
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    Left,
    Right,
}

impl ActivePanel {
    /// 패널 전환
    pub fn toggle(&mut self) {
        *self = self.other();
    }

    /// 반대편 패널
    pub fn other(self) -> Self {
        match self {
            ActivePanel::Left => ActivePanel::Right,
            ActivePanel::Right => ActivePanel::Left,
        }
    }
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutAreas {
    pub left_panel: Rect,
    pub right_panel: Rect,
    pub status_bar: Rect,
    pub command_bar: Rect,
}

impl LayoutAreas {
    pub fn panel(&self, panel: ActivePanel) -> Rect {
        match panel {
            ActivePanel::Left => self.left_panel,
            ActivePanel::Right => self.right_panel,
        }
    }
}

/// 터미널 크기에 따라 레이아웃 모드 결정
pub fn determine_mode(width: u16, height: u16) -> LayoutMode {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        LayoutMode::TooSmall
    } else if width < DUAL_PANEL_MIN_WIDTH {
        LayoutMode::SinglePanel
    } else {
        LayoutMode::DualPanel
    }
}

/// 레이아웃 영역 계산
///
/// 세로: 패널 | 상태바 | 커맨드바. 싱글 모드에서는 활성 패널만 전체 너비를 쓴다.
pub fn calculate_areas(area: Rect, active: ActivePanel) -> (LayoutMode, LayoutAreas) {
    let mode = determine_mode(area.width, area.height);
    if mode == LayoutMode::TooSmall {
        return (mode, LayoutAreas::default());
    }

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let (left_panel, right_panel) = match mode {
        LayoutMode::DualPanel => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(vertical[0]);
            (halves[0], halves[1])
        }
        _ => match active {
            ActivePanel::Left => (vertical[0], Rect::default()),
            ActivePanel::Right => (Rect::default(), vertical[0]),
        },
    };

    (
        mode,
        LayoutAreas {
            left_panel,
            right_panel,
            status_bar: vertical[1],
            command_bar: vertical[2],
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_mode() {
        assert_eq!(determine_mode(80, 24), LayoutMode::DualPanel);
        assert_eq!(determine_mode(120, 30), LayoutMode::DualPanel);
        assert_eq!(determine_mode(79, 24), LayoutMode::SinglePanel);
        assert_eq!(determine_mode(40, 24), LayoutMode::SinglePanel);
        assert_eq!(determine_mode(39, 24), LayoutMode::TooSmall);
        assert_eq!(determine_mode(80, 14), LayoutMode::TooSmall);
    }

    #[test]
    fn test_toggle_panel() {
        let mut panel = ActivePanel::default();
        assert_eq!(panel, ActivePanel::Left);
        panel.toggle();
        assert_eq!(panel, ActivePanel::Right);
        assert_eq!(panel.other(), ActivePanel::Left);
    }

    #[test]
    fn test_dual_panel_areas() {
        let (mode, areas) = calculate_areas(Rect::new(0, 0, 100, 30), ActivePanel::Left);
        assert_eq!(mode, LayoutMode::DualPanel);
        assert_eq!(areas.left_panel.width + areas.right_panel.width, 100);
        assert_eq!(areas.left_panel.height, 28);
        assert_eq!(areas.status_bar.y, 28);
        assert_eq!(areas.command_bar.y, 29);
    }

    #[test]
    fn test_single_panel_shows_only_active() {
        let (mode, areas) = calculate_areas(Rect::new(0, 0, 60, 20), ActivePanel::Right);
        assert_eq!(mode, LayoutMode::SinglePanel);
        assert_eq!(areas.left_panel, Rect::default());
        assert_eq!(areas.panel(ActivePanel::Right).width, 60);
    }
}
