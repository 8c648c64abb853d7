use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the karaoke core.
///
/// None of these are fatal: every path that produces one leaves the session
/// in a recoverable idle-equivalent state.
#[derive(Error, Debug)]
pub enum KaraokeError {
    /// Every catalog source was tried and none produced text
    #[error("catalog unavailable in {}: {}", folder.display(), attempts.join("; "))]
    CatalogUnavailable {
        folder: PathBuf,
        attempts: Vec<String>,
    },

    /// Storage access refused by the platform
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The media backend rejected or aborted playback
    #[error("playback failed: {0}")]
    PlaybackFailed(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KaraokeError {
    /// Map an I/O failure on `path` to the matching variant
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.into()),
            std::io::ErrorKind::NotFound => Self::NotFound(path.into()),
            _ => Self::Io(err),
        }
    }

    pub fn is_permission(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}

pub type Result<T> = std::result::Result<T, KaraokeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_mapping() {
        let e = KaraokeError::from_io(Error::from(ErrorKind::PermissionDenied), "/storage");
        assert!(e.is_permission());

        let e = KaraokeError::from_io(Error::from(ErrorKind::NotFound), "/x");
        assert!(matches!(e, KaraokeError::NotFound(p) if p == PathBuf::from("/x")));

        let e = KaraokeError::from_io(Error::from(ErrorKind::Interrupted), "/x");
        assert!(matches!(e, KaraokeError::Io(_)));
    }

    #[test]
    fn test_unavailable_message_lists_attempts() {
        let e = KaraokeError::CatalogUnavailable {
            folder: PathBuf::from("/media/karaoke"),
            attempts: vec!["configured: missing".into(), "any-txt: none".into()],
        };
        let msg = e.to_string();
        assert!(msg.contains("/media/karaoke"));
        assert!(msg.contains("configured: missing; any-txt: none"));
    }
}
