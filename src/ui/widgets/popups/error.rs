use crate::app::App;
use crate::ui::utils::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Persistent modal for storage access problems
pub fn render(f: &mut Frame, app: &App) {
    let Some(message) = app.session.blocking_error() else {
        return;
    };
    let theme = &app.theme;
    let area = centered_rect(f.area(), 56, 9);

    let lines = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} ", app.keys.display(&app.keys.reload_catalog)),
                Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
            ),
            Span::styled("try again", Style::default().fg(theme.text)),
            Span::styled("   ", Style::default()),
            Span::styled(
                format!("{} ", app.keys.display(&app.keys.quit)),
                Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("quit", Style::default().fg(theme.text)),
        ]),
    ];

    f.render_widget(Clear, area);
    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(theme.red))
                .title(" Storage permission needed ")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(Color::Reset)),
        );
    f.render_widget(popup, area);
}
