use crate::app::App;
use crate::session::MAX_SEARCH_DIGITS;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// The song number box, one slot per digit
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let input = app.session.search_input();
    let active = !input.is_empty();

    let mut spans = vec![Span::styled("🔢 ", Style::default())];
    let mut typed = input.chars();
    for slot in 0..MAX_SEARCH_DIGITS {
        match typed.next() {
            Some(c) => spans.push(Span::styled(
                format!("{} ", c),
                Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
            )),
            None if slot == input.len() => {
                spans.push(Span::styled("▁ ", Style::default().fg(theme.text)))
            }
            None => spans.push(Span::styled("_ ", Style::default().fg(theme.surface))),
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Song number ")
        .border_style(Style::default().fg(if active { theme.yellow } else { theme.surface }))
        .style(Style::default().bg(Color::Reset));

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, area);
}
