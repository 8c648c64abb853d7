use crate::app::App;
use crate::ui::utils::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let Some(perf) = app.session.visible_performance() else {
        return;
    };
    let theme = &app.theme;
    let area = centered_rect(f.area(), 36, 8);

    let color = match perf.score {
        90..=100 => theme.green,
        70..=89 => theme.cyan,
        50..=69 => theme.yellow,
        _ => theme.red,
    };
    let stars = (perf.score as usize + 10) / 20;

    let lines = vec![
        Line::from(Span::styled(
            format!("{}", perf.score),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}{}", "★".repeat(stars), "☆".repeat(5 - stars)),
            Style::default().fg(theme.yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            perf.message,
            Style::default().fg(theme.text).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(Clear, area);
    let popup = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(" Your score ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, area);
}
