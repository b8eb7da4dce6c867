use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Top-level layout regions
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

/// Panel split within the main area
pub struct PanelLayout {
    pub list: Rect,
    pub detail: Rect,
}

pub fn app_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    AppLayout {
        header: chunks[0],
        main: chunks[1],
        footer: chunks[2],
    }
}

/// Split main area into the user list and the detail panel.
/// On narrow terminals (<100 cols) the list takes the full width.
pub fn panel_layout(area: Rect) -> PanelLayout {
    if is_single_panel(area) {
        PanelLayout {
            list: area,
            detail: Rect::default(),
        }
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(55),
            ])
            .split(area);

        PanelLayout {
            list: chunks[0],
            detail: chunks[1],
        }
    }
}

pub fn is_single_panel(area: Rect) -> bool {
    area.width < 100
}

/// Rows available for list items inside a bordered block.
pub fn list_rows(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
