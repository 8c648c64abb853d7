use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub mod persistence;
pub mod user;

pub use persistence::PersistentState;
pub use user::UserConfig;

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let xdg_dir = home.join(".config").join("karaokebox");

        if !xdg_dir.exists() {
            let _ = fs::create_dir_all(&xdg_dir);
        }

        xdg_dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_state_path() -> PathBuf {
        Self::get_config_dir().join("state.toml")
    }

    /// Load both files from the standard location
    pub fn load() -> (UserConfig, PersistentState) {
        Self::load_from(&Self::get_config_dir())
    }

    /// Load both files from `dir`. A missing `config.toml` is written out
    /// with defaults so users have something to edit; a broken one is
    /// logged and replaced by defaults in memory only.
    pub fn load_from(dir: &Path) -> (UserConfig, PersistentState) {
        let config_path = dir.join("config.toml");
        let state_path = dir.join("state.toml");

        let user_config = if config_path.exists() {
            read_toml(&config_path).unwrap_or_default()
        } else {
            let c = UserConfig::default();
            if let Ok(content) = toml::to_string_pretty(&c) {
                let _ = fs::write(&config_path, content);
            }
            c
        };

        let state = if state_path.exists() {
            read_toml(&state_path).unwrap_or_default()
        } else {
            PersistentState::default()
        };

        (user_config, state)
    }
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read config file");
            return None;
        }
    };
    match toml::from_str(&content) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
            None
        }
    }
}
