use crate::app::App;
use crate::session::PlayerState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};

pub mod controls;
pub mod info;
pub mod progress;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let accent = match app.session.state() {
        PlayerState::Playing => theme.green,
        PlayerState::Paused => theme.yellow,
        PlayerState::Ended => theme.magenta,
        _ => theme.blue,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(vec![Span::styled(
            " Now Singing ",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )]))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(Color::Reset));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let tiny = inner.height < 8;
    let constraints = if tiny {
        vec![
            Constraint::Min(1),    // Info
            Constraint::Length(0), // Gauge (hidden)
            Constraint::Length(1), // Time
            Constraint::Length(1), // Controls
        ]
    } else {
        vec![
            Constraint::Min(4),    // Info (vertically centred inside)
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Time
            Constraint::Length(2), // Controls
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    info::render(f, chunks[0], app);
    if chunks[1].height > 0 {
        progress::render_progress(f, chunks[1], app);
    }
    progress::render_time(f, chunks[2], app);
    controls::render(f, chunks[3], app);
}
