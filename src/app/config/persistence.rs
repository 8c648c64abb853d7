use crate::error::{KaraokeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Automatically saved session state
/// stored in `state.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistentState {
    #[serde(default = "default_karaoke_folder")]
    pub karaoke_folder_path: String,
    #[serde(default = "default_true")]
    pub show_help_on_start: bool,
}

fn default_karaoke_folder() -> String {
    dirs::video_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("karaoke")
        .to_string_lossy()
        .to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PersistentState {
    fn default() -> Self {
        Self {
            karaoke_folder_path: default_karaoke_folder(),
            show_help_on_start: true,
        }
    }
}

impl PersistentState {
    pub fn save(&self) {
        let path = super::AppConfig::get_state_path();
        if let Err(e) = self.save_to(&path) {
            tracing::warn!(error = %e, "state not saved");
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| KaraokeError::Config(e.to_string()))?;
        fs::write(path, content).map_err(|e| KaraokeError::from_io(e, path))
    }
}
