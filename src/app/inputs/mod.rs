use crate::app::App;
use crossterm::event::{KeyEvent, KeyEventKind};
use std::time::Instant;

pub mod common;
pub mod playback;
pub mod remote;

pub fn handle_event(key: KeyEvent, app: &mut App) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // 1. Blocking modal: only retry and quit get through
    if app.session.blocking_error().is_some() {
        common::handle_blocked_events(key, app);
        app.drain_notices();
        return;
    }

    // 2. Global keys (quit, help)
    if common::handle_common_events(key, app) {
        return;
    }

    // 3. Confirmation popup captures the remote
    if app.session.pending().is_some() {
        remote::handle_pending_events(key, app);
        app.drain_notices();
        return;
    }

    // 4. Remote, then everything else
    let now = Instant::now();
    if !remote::handle_remote_events(key, app, now) {
        playback::handle_playback_events(key, app);
    }
    app.drain_notices();
}
