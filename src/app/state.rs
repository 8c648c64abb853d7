use crate::app::keys::KeyConfig;
use crate::session::{NoticeLevel, Session};
use crate::ui::theme::Theme;
use std::time::{Duration, Instant};

const TOAST_DURATION: Duration = Duration::from_millis(2500);
const ERROR_TOAST_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: NoticeLevel,
    pub start_time: Instant,
    pub deadline: Instant,
}

/// Screen state around the karaoke session
pub struct App {
    pub session: Session,
    pub theme: Theme,
    pub keys: KeyConfig,
    pub is_running: bool,
    pub show_help: bool,
    pub toast: Option<Toast>,
    /// Highlighted row in the queue panel
    pub queue_selected: usize,
}

impl App {
    pub fn new(session: Session, keys: KeyConfig, theme: Theme, show_help: bool) -> Self {
        Self {
            session,
            theme,
            keys,
            is_running: true,
            show_help,
            toast: None,
            queue_selected: 0,
        }
    }

    pub fn show_toast(&mut self, message: &str, level: NoticeLevel) {
        let now = Instant::now();
        let deadline = now
            + match level {
                NoticeLevel::Error => ERROR_TOAST_DURATION,
                _ => TOAST_DURATION,
            };

        if let Some(ref mut current) = self.toast {
            // Keep start_time so a quick update does not replay the slide-in
            current.message = message.to_string();
            current.level = level;
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                level,
                start_time: now,
                deadline,
            });
        }
    }

    /// Turn pending session notices into toasts; the most severe wins
    pub fn drain_notices(&mut self) {
        let notices = self.session.take_notices();
        let shown = notices.iter().max_by_key(|n| match n.level {
            NoticeLevel::Info => 0,
            NoticeLevel::Warning => 1,
            NoticeLevel::Error => 2,
        });
        if let Some(notice) = shown {
            let message = notice.message.clone();
            self.show_toast(&message, notice.level);
        }
        self.clamp_selection();
    }

    /// Called every tick to update state
    pub fn on_tick(&mut self) {
        if let Some(ref toast) = self.toast {
            if Instant::now() > toast.deadline {
                self.toast = None;
            }
        }
    }

    pub fn select_next(&mut self) {
        let len = self.session.queue().queue().len();
        if len > 0 {
            self.queue_selected = (self.queue_selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.queue_selected = self.queue_selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        let len = self.session.queue().queue().len();
        self.queue_selected = self.queue_selected.min(len.saturating_sub(1));
    }
}
