//! Catalog source strategies.
//!
//! Removable media rarely keeps the catalog file under exactly the name we
//! expect, so locating it is an ordered chain of strategies. The first
//! success wins; when all fail, their reasons are aggregated into a single
//! `CatalogUnavailable`.

use crate::error::{KaraokeError, Result};
use crate::storage::FileSystem;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Catalog text plus where it was found
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    pub path: PathBuf,
    pub content: String,
    pub strategy: &'static str,
}

pub trait CatalogResolver: Send + Sync {
    fn name(&self) -> &'static str;
    fn resolve(&self, fs: &dyn FileSystem, folder: &Path) -> Result<ResolvedCatalog>;
}

/// The configured file name inside the folder
pub struct ConfiguredFile {
    pub file_name: String,
}

impl CatalogResolver for ConfiguredFile {
    fn name(&self) -> &'static str {
        "configured"
    }

    fn resolve(&self, fs: &dyn FileSystem, folder: &Path) -> Result<ResolvedCatalog> {
        let path = folder.join(&self.file_name);
        let content = fs.read_to_string(&path)?;
        Ok(ResolvedCatalog {
            path,
            content,
            strategy: self.name(),
        })
    }
}

/// Same name, any letter case (`KARAOKE.TXT` on FAT-formatted sticks)
pub struct CaseInsensitiveFile {
    pub file_name: String,
}

impl CatalogResolver for CaseInsensitiveFile {
    fn name(&self) -> &'static str {
        "case-insensitive"
    }

    fn resolve(&self, fs: &dyn FileSystem, folder: &Path) -> Result<ResolvedCatalog> {
        let entry = fs
            .read_dir(folder)?
            .into_iter()
            .find(|e| !e.is_dir && e.name.eq_ignore_ascii_case(&self.file_name))
            .ok_or_else(|| KaraokeError::NotFound(folder.join(&self.file_name)))?;

        let path = folder.join(&entry.name);
        let content = fs.read_to_string(&path)?;
        Ok(ResolvedCatalog {
            path,
            content,
            strategy: self.name(),
        })
    }
}

/// First `.txt` file in the folder, by name
pub struct AnyTextFile;

impl CatalogResolver for AnyTextFile {
    fn name(&self) -> &'static str {
        "any-txt"
    }

    fn resolve(&self, fs: &dyn FileSystem, folder: &Path) -> Result<ResolvedCatalog> {
        let mut candidates: Vec<String> = fs
            .read_dir(folder)?
            .into_iter()
            .filter(|e| !e.is_dir && e.name.to_ascii_lowercase().ends_with(".txt"))
            .map(|e| e.name)
            .collect();
        candidates.sort();

        let name = candidates
            .into_iter()
            .next()
            .ok_or_else(|| KaraokeError::NotFound(folder.join("*.txt")))?;
        let path = folder.join(name);
        let content = fs.read_to_string(&path)?;
        Ok(ResolvedCatalog {
            path,
            content,
            strategy: self.name(),
        })
    }
}

pub fn default_resolvers(file_name: &str) -> Vec<Box<dyn CatalogResolver>> {
    vec![
        Box::new(ConfiguredFile {
            file_name: file_name.to_string(),
        }),
        Box::new(CaseInsensitiveFile {
            file_name: file_name.to_string(),
        }),
        Box::new(AnyTextFile),
    ]
}

/// Try each strategy in order.
///
/// A permission failure short-circuits: the other strategies would hit the
/// same wall and the caller needs to know it is a permission problem.
pub fn resolve_first(
    resolvers: &[Box<dyn CatalogResolver>],
    fs: &dyn FileSystem,
    folder: &Path,
) -> Result<ResolvedCatalog> {
    let mut attempts = Vec::with_capacity(resolvers.len());

    for resolver in resolvers {
        match resolver.resolve(fs, folder) {
            Ok(found) => {
                debug!(strategy = found.strategy, path = %found.path.display(), "catalog resolved");
                return Ok(found);
            }
            Err(e) if e.is_permission() => return Err(e),
            Err(e) => {
                debug!(strategy = resolver.name(), error = %e, "catalog strategy failed");
                attempts.push(format!("{}: {}", resolver.name(), e));
            }
        }
    }

    Err(KaraokeError::CatalogUnavailable {
        folder: folder.to_path_buf(),
        attempts,
    })
}
