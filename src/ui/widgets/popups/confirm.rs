use crate::app::App;
use crate::catalog::format_duration;
use crate::ui::utils::{centered_rect, truncate};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// "Sing this one?" after a successful lookup
pub fn render(f: &mut Frame, app: &App) {
    let Some(song) = app.session.pending() else {
        return;
    };
    let theme = &app.theme;
    let area = centered_rect(f.area(), 44, 9);
    let text_w = area.width.saturating_sub(4) as usize;

    let will_queue = app.session.current().is_some();
    let action = if will_queue { "add to queue" } else { "sing now" };

    let lines = vec![
        Line::from(Span::styled(
            format!("#{}", song.id),
            Style::default().fg(theme.cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate(&song.title, text_w),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate(&song.artist, text_w),
            Style::default().fg(theme.magenta),
        )),
        Line::from(Span::styled(
            format_duration(song.duration),
            Style::default().fg(theme.overlay),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} ", app.keys.display(&app.keys.confirm)),
                Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(action, Style::default().fg(theme.text)),
            Span::styled("   ", Style::default()),
            Span::styled(
                format!("{} ", app.keys.display(&app.keys.cancel)),
                Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("cancel", Style::default().fg(theme.text)),
        ]),
    ];

    f.render_widget(Clear, area);
    let popup = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.yellow))
            .title(" Song found ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, area);
}
