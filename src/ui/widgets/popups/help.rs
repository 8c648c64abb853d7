use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let k = &app.keys;

    // 🎹 WhichKey-style floating popup
    let remote_keys: Vec<(String, &str, &str)> = vec![
        ("0-9".to_string(), "🔢", "Song number"),
        (k.display(&k.confirm), "✅", "Search / confirm"),
        (k.display(&k.delete_digit), "⌫", "Delete digit"),
        (k.display(&k.skip), "⏭️", "Skip song"),
        (k.display(&k.cancel), "✖", "Cancel / close"),
    ];

    let global_keys: Vec<(String, &str, &str)> = vec![
        (k.display(&k.play_pause), "⏯️", "Play / pause"),
        (k.display(&k.prev_song), "⏮️", "Previous song"),
        (k.display(&k.retry), "🔁", "Retry video"),
        (
            format!("{}/{}", k.display(&k.nav_down), k.display(&k.nav_up)),
            "📋",
            "Select in queue",
        ),
        (k.display(&k.remove_from_queue), "🗑️", "Remove from queue"),
        (k.display(&k.reload_catalog), "📂", "Reload catalog"),
        (k.display(&k.quit), "🚪", "Quit"),
    ];

    let mut lines: Vec<Line> = Vec::new();
    for (key, icon, desc) in &remote_keys {
        lines.push(key_line(key, icon, desc, theme.yellow, theme.text));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "────── Global ──────",
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (key, icon, desc) in &global_keys {
        lines.push(key_line(key, icon, desc, theme.green, theme.text));
    }

    // Fit the popup to its content 📏
    let content_width = remote_keys
        .iter()
        .chain(global_keys.iter())
        .map(|(key, _, desc)| 2 + key.chars().count().max(7) + 3 + 3 + desc.len())
        .max()
        .unwrap_or(20)
        .max(22);

    let max_height = f.area().height.saturating_sub(4);
    let popup_height = (lines.len() as u16 + 2).min(max_height);
    let popup_width = (content_width as u16 + 4).min(f.area().width.saturating_sub(2));

    // Bottom-right corner
    let popup_x = f.area().width.saturating_sub(popup_width + 1);
    let popup_y = f.area().height.saturating_sub(popup_height + 2);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.blue))
            .title(" Remote ")
            .title_alignment(Alignment::Left)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, popup_area);
}

fn key_line<'a>(key: &str, icon: &'a str, desc: &'a str, key_color: Color, text: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!(" {:<7} ", key),
            Style::default().fg(key_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::raw(format!("{} ", icon)),
        Span::styled(desc, Style::default().fg(text)),
    ])
}
