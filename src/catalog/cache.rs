use super::{Catalog, CatalogLoadError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug)]
struct CachedCatalog {
    modified: Option<SystemTime>,
    catalog: Catalog,
}

/// Keeps a loaded catalog until the token file's modification time changes.
#[derive(Debug)]
pub struct CatalogCache {
    path: PathBuf,
    loaded: Option<CachedCatalog>,
}

impl CatalogCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn invalidate(&mut self) {
        self.loaded = None;
    }

    /// Returns the cached catalog, reloading when the file changed on disk or
    /// its modification time cannot be read. A failed reload leaves the cache
    /// empty.
    pub fn get(&mut self) -> Result<&Catalog, CatalogLoadError> {
        let modified = modified_time(&self.path);
        let fresh = modified.is_some()
            && self
                .loaded
                .as_ref()
                .is_some_and(|entry| entry.modified == modified);

        let entry = match self.loaded.take() {
            Some(entry) if fresh => entry,
            _ => CachedCatalog {
                modified,
                catalog: Catalog::from_path(&self.path)?,
            },
        };
        Ok(&self.loaded.insert(entry).catalog)
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .ok()
}
