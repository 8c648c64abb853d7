use crate::app::App;
use crate::session::SearchOutcome;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// The TV remote: digits, Enter, Backspace, Right
pub fn handle_remote_events(key: KeyEvent, app: &mut App, now: Instant) -> bool {
    if let KeyCode::Char(c) = key.code {
        if c.is_ascii_digit() && !key.modifiers.contains(KeyModifiers::CONTROL) {
            app.session.push_digit(c);
            return true;
        }
    }

    let keys = app.keys.clone();

    if keys.matches(key, &keys.confirm) {
        if app.session.search_input().is_empty() {
            // Enter on an empty box retries a failed song, else closes the rating early
            if !app.session.retry_playback() {
                app.session.dismiss_performance();
            }
        } else if let SearchOutcome::Found(song) = app.session.submit_search() {
            tracing::debug!(id = song.id, "awaiting confirmation");
        }
        return true;
    }

    if keys.matches(key, &keys.delete_digit) {
        app.session.pop_digit();
        return true;
    }

    if keys.matches(key, &keys.skip) {
        if !app.session.skip(now) && app.session.skip_locked(now) {
            app.show_toast("⏳ Wait a moment", crate::session::NoticeLevel::Info);
        }
        return true;
    }

    if keys.matches(key, &keys.cancel) {
        if !app.session.search_input().is_empty() {
            app.session.clear_search();
        } else {
            app.session.dismiss_performance();
        }
        return true;
    }

    false
}

/// "Play #N?" is on screen
pub fn handle_pending_events(key: KeyEvent, app: &mut App) {
    let keys = app.keys.clone();
    if keys.matches(key, &keys.confirm) {
        app.session.confirm_pending();
    } else if keys.matches(key, &keys.cancel) || keys.matches(key, &keys.delete_digit) {
        app.session.cancel_pending();
    }
}
