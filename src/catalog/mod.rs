pub mod parser;
pub mod repository;
pub mod resolver;

pub use parser::parse;
pub use repository::{LoadOutcome, SongRepository};
pub use resolver::{default_resolvers, CatalogResolver, ResolvedCatalog};

use std::path::PathBuf;

/// A karaoke song as listed in the catalog 🎤
///
/// Immutable once loaded; identity is `id`, the number typed on the remote.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: u32,
    pub title: String,
    pub artist: String,
    /// Seconds, 0.0 when unknown
    pub duration: f64,
    pub video_path: PathBuf,
    pub video_exists: Option<bool>,
}

/// `MM:SS`
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// `MM:SS / MM:SS` for the player card
pub fn format_time_display(current: f64, total: f64) -> String {
    format!("{} / {}", format_duration(current), format_duration(total))
}
