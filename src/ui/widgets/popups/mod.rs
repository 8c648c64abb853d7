use crate::app::App;
use ratatui::Frame;

pub mod confirm;
pub mod error;
pub mod help;
pub mod performance;
pub mod toast;

pub fn render(f: &mut Frame, app: &App) {
    if app.session.visible_performance().is_some() {
        performance::render(f, app);
    }

    if app.session.pending().is_some() {
        confirm::render(f, app);
    }

    if app.toast.is_some() {
        toast::render(f, app);
    }

    if app.show_help {
        help::render(f, app);
    }

    // Blocking modal stays on top of everything
    if app.session.blocking_error().is_some() {
        error::render(f, app);
    }
}
