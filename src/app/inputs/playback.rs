use crate::app::App;
use crossterm::event::KeyEvent;

pub fn handle_playback_events(key: KeyEvent, app: &mut App) -> bool {
    let keys = app.keys.clone();

    if keys.matches(key, &keys.play_pause) {
        app.session.toggle_pause();
        return true;
    }

    if keys.matches(key, &keys.prev_song) {
        app.session.play_previous();
        return true;
    }

    if keys.matches(key, &keys.retry) {
        app.session.retry_playback();
        return true;
    }

    if keys.matches(key, &keys.reload_catalog) {
        app.session.reload_catalog();
        return true;
    }

    if keys.matches(key, &keys.nav_down) {
        app.select_next();
        return true;
    }

    if keys.matches(key, &keys.nav_up) {
        app.select_prev();
        return true;
    }

    if keys.matches(key, &keys.remove_from_queue) {
        let index = app.queue_selected;
        app.session.remove_at(index);
        return true;
    }

    false
}
