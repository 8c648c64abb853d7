use crate::session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-editable configuration (read-only after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub keys: crate::app::keys::KeyConfig,
    /// Program used to show videos; the file path is appended to `player_args`
    pub player_command: String,
    pub player_args: Vec<String>,
    /// Catalog file looked up first inside the karaoke folder
    pub catalog_file: String,
    pub poll_interval_secs: u64,
    /// How long the rating stays up before the next song
    pub advance_delay_ms: u64,
    pub skip_cooldown_ms: u64,
    /// Song length assumed by `--no-video` when the catalog has none
    pub headless_fallback_secs: u64,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            keys: crate::app::keys::KeyConfig::default(),
            player_command: "mpv".to_string(),
            player_args: vec!["--fs".to_string(), "--really-quiet".to_string()],
            catalog_file: "karaoke.txt".to_string(),
            poll_interval_secs: 5,
            advance_delay_ms: 3000,
            skip_cooldown_ms: 3500,
            headless_fallback_secs: 180,
        }
    }
}

impl UserConfig {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            advance_delay: Duration::from_millis(self.advance_delay_ms),
            skip_cooldown: Duration::from_millis(self.skip_cooldown_ms),
            poll_interval: Duration::from_secs(self.poll_interval_secs.max(1)),
        }
    }

    pub fn headless_fallback(&self) -> Duration {
        Duration::from_secs(self.headless_fallback_secs)
    }
}
