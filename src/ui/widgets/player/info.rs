use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let max_width = area.width.saturating_sub(4) as usize;

    let mut lines = match app.session.current() {
        Some(song) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("🎵 {}", truncate(&song.title, max_width.saturating_sub(2))),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::raw("🎤 "),
                    Span::styled(
                        truncate(&song.artist, max_width.saturating_sub(2)),
                        Style::default().fg(theme.magenta),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("Música #{}", song.id),
                    Style::default().fg(theme.cyan).add_modifier(Modifier::DIM),
                )),
            ];
            if song.video_exists == Some(false) {
                lines.push(Line::from(Span::styled(
                    "⚠ video file missing",
                    Style::default().fg(theme.red),
                )));
            }
            lines
        }
        None => vec![
            Line::from(Span::styled(
                "🎤 Nobody singing",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Type a song number and press Enter",
                Style::default().fg(theme.overlay),
            )),
        ],
    };

    // Centre the block of lines vertically
    let pad = (area.height as usize).saturating_sub(lines.len()) / 2;
    for _ in 0..pad {
        lines.insert(0, Line::from(""));
    }

    let info = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(info, area);
}
