use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

pub fn get_theme_path(config_dir: &Path) -> PathBuf {
    config_dir.join("theme.toml")
}

/// Read `theme.toml`, writing the default one on first run.
/// Accepts both the nested `[theme]` table and a flat file.
pub fn load_theme(config_dir: &Path) -> Theme {
    let path = get_theme_path(config_dir);

    if !path.exists() {
        let wrapper = ThemeFile {
            theme: Theme::default(),
        };
        if let Ok(toml_str) = toml::to_string_pretty(&wrapper) {
            let _ = fs::write(&path, toml_str);
        }
        return wrapper.theme;
    }

    let Ok(content) = fs::read_to_string(&path) else {
        return Theme::default();
    };
    if let Ok(wrapper) = toml::from_str::<ThemeFile>(&content) {
        return wrapper.theme;
    }
    match toml::from_str::<Theme>(&content) {
        Ok(theme) => theme,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid theme, using default");
            Theme::default()
        }
    }
}
