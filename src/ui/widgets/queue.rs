use crate::app::App;
use crate::catalog::format_duration;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let queue = app.session.queue().queue();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(Span::styled(
            format!(" Queue · {} ", queue.len()),
            Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
        )))
        .border_style(Style::default().fg(theme.surface))
        .style(Style::default().bg(Color::Reset));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let content_h = inner.height as usize;
    let time_w = 6;
    let num_w = 8;
    let artist_w = width / 4;
    let title_w = width.saturating_sub(artist_w + time_w + num_w + 6);

    let muted = theme.overlay;
    let mut lines: Vec<Line> = Vec::new();

    if queue.is_empty() {
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled("Empty queue", Style::default().fg(muted)))
                .alignment(Alignment::Center),
        );
        lines.push(
            Line::from(Span::styled(
                "Songs you confirm line up here",
                Style::default().fg(theme.surface),
            ))
            .alignment(Alignment::Center),
        );
    } else {
        let start = app
            .queue_selected
            .saturating_sub(content_h / 2)
            .min(queue.len().saturating_sub(content_h));

        for (idx, song) in queue.iter().enumerate().skip(start).take(content_h) {
            let is_sel = idx == app.queue_selected;
            let (marker, marker_color, title_style) = if is_sel {
                (
                    "●",
                    theme.yellow,
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", theme.surface, Style::default().fg(theme.text))
            };

            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", marker), Style::default().fg(marker_color)),
                Span::styled(
                    format!("{:>2}. ", idx + 1),
                    Style::default().fg(if is_sel { theme.green } else { muted }),
                ),
                Span::styled(
                    format!("#{:<5} ", song.id),
                    Style::default().fg(theme.cyan),
                ),
                Span::styled(
                    format!("{:title_w$} ", truncate(&song.title, title_w)),
                    title_style,
                ),
                Span::styled(
                    format!("{:artist_w$}", truncate(&song.artist, artist_w)),
                    Style::default().fg(muted),
                ),
                Span::styled(
                    format!("{:>time_w$}", format_duration(song.duration)),
                    Style::default().fg(muted),
                ),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
