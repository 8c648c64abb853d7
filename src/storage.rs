use crate::error::{KaraokeError, Result};
use std::fs;
use std::path::Path;

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// File access capability used by the catalog code 📂
///
/// Kept behind a trait so removable storage (or a test double) can be
/// swapped in without the repository knowing.
pub trait FileSystem: Send + Sync {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn exists(&self, path: &Path) -> bool;

    /// Probe read access to a folder; permission failures come back as
    /// `PermissionDenied` so callers can raise the blocking notice.
    fn check_access(&self, path: &Path) -> Result<()> {
        self.read_dir(path).map(|_| ())
    }
}

/// The local disk
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let reader = fs::read_dir(path).map_err(|e| KaraokeError::from_io(e, path))?;
        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| KaraokeError::from_io(e, path))?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| KaraokeError::from_io(e, path))?;
        // Catalogs written on TV boxes are not always clean UTF-8
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Local disk whose read access can be revoked, like a card mounted
    /// without permission
    #[derive(Clone, Default)]
    pub(crate) struct RevocableFs {
        pub(crate) denied: Arc<AtomicBool>,
    }

    impl RevocableFs {
        fn check(&self, path: &Path) -> Result<()> {
            if self.denied.load(Ordering::SeqCst) {
                return Err(KaraokeError::PermissionDenied(path.to_path_buf()));
            }
            Ok(())
        }
    }

    impl FileSystem for RevocableFs {
        fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
            self.check(path)?;
            LocalFs.read_dir(path)
        }

        fn read_to_string(&self, path: &Path) -> Result<String> {
            self.check(path)?;
            LocalFs.read_to_string(path)
        }

        fn exists(&self, path: &Path) -> bool {
            LocalFs.exists(path)
        }
    }
}
