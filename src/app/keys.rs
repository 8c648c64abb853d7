use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Key bindings. Digits are always the song number and cannot be rebound.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    // Remote
    pub confirm: String,
    pub delete_digit: String,
    pub cancel: String,
    pub skip: String,

    // Playback
    pub play_pause: String,
    pub prev_song: String,
    pub retry: String,

    // Queue
    pub nav_up: String,
    pub nav_down: String,
    pub remove_from_queue: String,

    // Global
    pub reload_catalog: String,
    pub toggle_help: String,
    pub quit: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            confirm: "Enter".to_string(),
            delete_digit: "Backspace".to_string(),
            cancel: "Esc".to_string(),
            skip: "Right".to_string(),

            play_pause: "Space".to_string(),
            prev_song: "Left".to_string(),
            retry: "r".to_string(),

            nav_up: "Up".to_string(),
            nav_down: "Down".to_string(),
            remove_from_queue: "d".to_string(),

            reload_catalog: "R".to_string(),
            toggle_help: "?".to_string(),
            quit: "q".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        match key_str {
            "Space" => event.code == KeyCode::Char(' '),
            "Enter" => event.code == KeyCode::Enter,
            "Backspace" => event.code == KeyCode::Backspace,
            "Esc" => event.code == KeyCode::Esc,
            "Tab" => event.code == KeyCode::Tab,
            "Up" => event.code == KeyCode::Up,
            "Down" => event.code == KeyCode::Down,
            "Left" => event.code == KeyCode::Left,
            "Right" => event.code == KeyCode::Right,
            s if s.chars().count() == 1 => match s.chars().next() {
                // Terminals report Shift+r as either 'R' or 'r' with SHIFT
                Some(ch) if ch.is_uppercase() => {
                    event.code == KeyCode::Char(ch)
                        || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                            && event.modifiers.contains(KeyModifiers::SHIFT))
                }
                Some(ch) => {
                    event.code == KeyCode::Char(ch) && !event.modifiers.contains(KeyModifiers::SHIFT)
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Short label for hints
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "Backspace" => "Bksp".to_string(),
            "Enter" => "⏎".to_string(),
            _ => key_str.to_string(),
        }
    }
}
