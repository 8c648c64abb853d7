use super::resolver::{default_resolvers, resolve_first, CatalogResolver};
use super::{parser, Song};
use crate::error::Result;
use crate::storage::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a successful catalog read
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded { count: usize, source: PathBuf },
    /// The file was read but no record parsed. A warning, not an error.
    Empty { source: PathBuf },
}

/// The songs available for queueing 📚
pub struct SongRepository {
    fs: Arc<dyn FileSystem>,
    folder: PathBuf,
    resolvers: Vec<Box<dyn CatalogResolver>>,
    songs: Vec<Song>,
}

impl SongRepository {
    pub fn new(fs: Arc<dyn FileSystem>, folder: impl Into<PathBuf>, catalog_file: &str) -> Self {
        Self {
            fs,
            folder: folder.into(),
            resolvers: default_resolvers(catalog_file),
            songs: Vec::new(),
        }
    }

    pub fn with_resolvers(mut self, resolvers: Vec<Box<dyn CatalogResolver>>) -> Self {
        self.resolvers = resolvers;
        self
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Point at a new folder. Songs from the old one are discarded; call
    /// `load` to read the new catalog.
    pub fn set_folder(&mut self, folder: impl Into<PathBuf>) {
        self.folder = folder.into();
        self.songs.clear();
    }

    pub fn filesystem(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Read and parse the catalog, replacing every song held.
    ///
    /// On failure the previous songs are dropped as well: a catalog that
    /// cannot be read means its videos cannot be trusted either.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        let resolved = match resolve_first(&self.resolvers, self.fs.as_ref(), &self.folder) {
            Ok(r) => r,
            Err(e) => {
                self.songs.clear();
                return Err(e);
            }
        };

        let mut songs = parser::parse(&resolved.content, &self.folder);
        for song in &mut songs {
            song.video_exists = Some(self.fs.exists(&song.video_path));
        }
        let missing = songs.iter().filter(|s| s.video_exists == Some(false)).count();
        self.songs = songs;

        if self.songs.is_empty() {
            warn!(source = %resolved.path.display(), "catalog parsed to zero songs");
            return Ok(LoadOutcome::Empty {
                source: resolved.path,
            });
        }

        info!(
            count = self.songs.len(),
            missing_videos = missing,
            source = %resolved.path.display(),
            "catalog loaded"
        );
        Ok(LoadOutcome::Loaded {
            count: self.songs.len(),
            source: resolved.path,
        })
    }

    pub fn clear(&mut self) {
        self.songs.clear();
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// First song with exactly this id
    pub fn find_by_id(&self, id: u32) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    /// Lookup from raw remote input; anything but digits is ignored
    pub fn search(&self, input: &str) -> Option<&Song> {
        normalize_song_number(input).and_then(|id| self.find_by_id(id))
    }
}

/// Keep the digits, parse what is left. `None` for empty or overflowing input.
pub fn normalize_song_number(input: &str) -> Option<u32> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
