use crate::app::App;
use crate::session::PlayerState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let state = app.session.state();

    let (icon, color) = match state {
        PlayerState::Playing => ("▶", theme.green),
        PlayerState::Paused => ("⏸", theme.yellow),
        PlayerState::Loading => ("…", theme.blue),
        PlayerState::Ended => ("■", theme.magenta),
        PlayerState::Idle => ("○", theme.overlay),
    };

    let mut spans = vec![Span::styled(
        format!("{} {}", icon, state.label()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];

    let waiting = app.session.queue().queue().len();
    if waiting > 0 {
        spans.push(Span::styled("  •  ", Style::default().fg(theme.overlay)));
        spans.push(Span::styled(
            format!("{} waiting", waiting),
            Style::default().fg(theme.text),
        ));
    }

    if app.session.queue().has_previous() && state != PlayerState::Ended {
        spans.push(Span::styled("  •  ", Style::default().fg(theme.overlay)));
        spans.push(Span::styled(
            format!("{} previous", app.keys.display(&app.keys.prev_song)),
            Style::default().fg(theme.overlay),
        ));
    }

    if app.session.skip_locked(Instant::now()) {
        spans.push(Span::styled("  •  ", Style::default().fg(theme.overlay)));
        spans.push(Span::styled("⏳ skip", Style::default().fg(theme.overlay)));
    }

    if state == PlayerState::Idle && app.session.current().is_some() {
        spans.push(Span::styled("  •  ", Style::default().fg(theme.overlay)));
        spans.push(Span::styled(
            format!("{} retry", app.keys.display(&app.keys.retry)),
            Style::default().fg(theme.red),
        ));
    }

    let line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(line, area);
}
