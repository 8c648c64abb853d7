use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_common_events(key: KeyEvent, app: &mut App) -> bool {
    let keys = &app.keys;

    // Close popups first, then quit
    if keys.matches(key, &keys.quit) {
        if app.show_help {
            app.show_help = false;
        } else {
            app.is_running = false;
        }
        return true;
    }

    if keys.matches(key, &keys.toggle_help) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help && (keys.matches(key, &keys.cancel) || key.code == KeyCode::Esc) {
        app.show_help = false;
        return true;
    }

    false
}

/// While the storage modal is up the only way out is fixing access
pub fn handle_blocked_events(key: KeyEvent, app: &mut App) {
    let keys = &app.keys;
    if keys.matches(key, &keys.quit) {
        app.is_running = false;
    } else if keys.matches(key, &keys.reload_catalog)
        || keys.matches(key, &keys.confirm)
        || keys.matches(key, &keys.retry)
    {
        app.session.reload_catalog();
    }
}
