use crate::app::App;
use crate::session::NoticeLevel;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, app: &App) {
    let Some(ref toast) = app.toast else {
        return;
    };
    let theme = &app.theme;
    let now = std::time::Instant::now();

    let color = match toast.level {
        NoticeLevel::Info => theme.blue,
        NoticeLevel::Warning => theme.yellow,
        NoticeLevel::Error => theme.red,
    };

    // Expiry is handled in App::on_tick()
    let message = &toast.message;
    let width = (message.width() as u16 + 6).min(f.area().width.saturating_sub(4));
    let height = 3;
    let mut x = f.area().width.saturating_sub(width + 1);

    let entrance_elapsed = now.duration_since(toast.start_time).as_millis();
    let time_remaining = toast.deadline.saturating_duration_since(now).as_millis();

    // Slide in from the right, slide back out before the deadline 🌊
    if entrance_elapsed < 300 {
        let t = entrance_elapsed as f32 / 300.0;
        let ease = 1.0 - (1.0 - t).powi(3);
        x += (width as f32 * (1.0 - ease)) as u16;
    } else if time_remaining < 300 {
        let t = (300 - time_remaining) as f32 / 300.0;
        x += (width as f32 * t.powi(3)) as u16;
    }

    if x >= f.area().width {
        return;
    }
    let visible_area = Rect::new(x, 1, width, height).intersection(f.area());
    if visible_area.is_empty() {
        return;
    }

    f.render_widget(Clear, visible_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Reset));

    let text = Paragraph::new(Line::from(vec![Span::styled(
        message.as_str(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )]))
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(text, visible_area);
}
