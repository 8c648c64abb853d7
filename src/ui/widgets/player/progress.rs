use crate::app::App;
use crate::catalog::format_time_display;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use std::time::Instant;

/// Seconds into the current song, capped at its length when known
fn position_secs(app: &App) -> f64 {
    let elapsed = app.session.elapsed(Instant::now()).as_secs_f64();
    match app.session.current() {
        Some(song) if song.duration > 0.0 => elapsed.min(song.duration),
        _ => elapsed,
    }
}

pub fn render_progress(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let Some(song) = app.session.current() else {
        return;
    };

    let gauge_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1];

    let ratio = if song.duration > 0.0 {
        position_secs(app) / song.duration
    } else {
        0.0
    };

    let width = gauge_area.width as usize;
    let occupied = (width as f64 * ratio.clamp(0.0, 1.0)) as usize;
    let fill_style = Style::default().fg(theme.magenta);
    let empty_style = Style::default().fg(theme.surface);

    let bar: Vec<Span> = (0..width)
        .map(|i| {
            if i + 1 == occupied {
                Span::styled("●", fill_style)
            } else if i < occupied {
                Span::styled("━", fill_style)
            } else {
                Span::styled("─", empty_style)
            }
        })
        .collect();

    let gauge = Paragraph::new(Line::from(bar))
        .alignment(Alignment::Left)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(gauge, gauge_area);
}

pub fn render_time(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(song) = app.session.current() else {
        return;
    };
    let label = Paragraph::new(format_time_display(position_secs(app), song.duration))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.overlay));
    f.render_widget(label, area);
}
