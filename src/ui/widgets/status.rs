use crate::app::App;
use crate::session::FolderStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Folder status on the left, key hint on the right
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let repo = app.session.repository();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(10)])
        .split(area);

    let (icon, text, color) = match app.session.folder_status() {
        FolderStatus::Ready => ("●", format!("{} songs", repo.len()), theme.green),
        FolderStatus::Disconnected => ("○", "folder not connected".to_string(), theme.yellow),
        FolderStatus::Failed => ("✖", "catalog unavailable".to_string(), theme.red),
    };

    let status = Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(color)),
        Span::styled(text, Style::default().fg(color)),
        Span::styled(
            format!("  {}", repo.folder().display()),
            Style::default().fg(theme.overlay),
        ),
        Span::styled(
            format!("  [{}]", app.session.media_name()),
            Style::default().fg(theme.surface),
        ),
    ]);
    f.render_widget(Paragraph::new(status), chunks[0]);

    if !app.show_help {
        let hint = Line::from(vec![
            Span::styled(
                format!(" {} ", app.keys.display(&app.keys.toggle_help)),
                Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys ", Style::default().fg(theme.overlay)),
        ]);
        f.render_widget(Paragraph::new(hint).alignment(Alignment::Right), chunks[1]);
    }
}
