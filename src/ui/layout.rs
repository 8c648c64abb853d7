use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub body_area: Rect,
    pub search_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Song number box
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        body_area: chunks[0],
        search_area: chunks[1],
        footer_area: chunks[2],
    }
}

pub struct ContentLayout {
    pub card: Rect,
    pub queue: Option<Rect>,
    pub is_horizontal: bool,
}

/// Card and queue side by side when wide, stacked when tall,
/// card only when the terminal is tiny
pub fn get_content_layout(area: Rect) -> ContentLayout {
    if area.width >= 90 {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Min(30)])
            .split(area);
        ContentLayout {
            card: chunks[0],
            queue: Some(chunks[1]),
            is_horizontal: true,
        }
    } else if area.height >= 24 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(12), Constraint::Min(5)])
            .split(area);
        ContentLayout {
            card: chunks[0],
            queue: Some(chunks[1]),
            is_horizontal: false,
        }
    } else {
        ContentLayout {
            card: area,
            queue: None,
            is_horizontal: false,
        }
    }
}
