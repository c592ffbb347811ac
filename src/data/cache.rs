use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::LoadError;
use super::loader::load_file;
use super::model::EmployeeDataset;

// ---------------------------------------------------------------------------
// Load-once dataset cache
// ---------------------------------------------------------------------------

/// Memoizes loaded datasets by path for the lifetime of the process.
///
/// Entries are keyed by canonical path, so `data.csv`, `./data.csv` and an
/// absolute spelling of the same file share one entry. Every spelling seen
/// is remembered, which keeps hits working after the file is removed.
///
/// Datasets are immutable once loaded and handed out as `Arc`s, so any
/// number of sessions can share one without locking. Failed loads are not
/// cached.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<EmployeeDataset>>,
    /// Requested path -> canonical key in `entries`.
    aliases: HashMap<PathBuf, PathBuf>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, reading the file on first use.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<EmployeeDataset>, LoadError> {
        if let Some(dataset) = self.cached(path) {
            log::debug!("Dataset cache hit for {}", path.display());
            return Ok(dataset);
        }

        // A path that cannot be resolved is kept as given; loading it will
        // report the error.
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if let Some(dataset) = self.entries.get(&key).cloned() {
            log::debug!(
                "Dataset cache hit for {} (as {})",
                path.display(),
                key.display()
            );
            self.aliases.insert(path.to_path_buf(), key);
            return Ok(dataset);
        }

        let dataset = Arc::new(load_file(path)?);
        self.entries.insert(key.clone(), Arc::clone(&dataset));
        self.aliases.insert(path.to_path_buf(), key);
        Ok(dataset)
    }

    fn cached(&self, path: &Path) -> Option<Arc<EmployeeDataset>> {
        let key = self.aliases.get(path)?;
        self.entries.get(key).cloned()
    }

    /// Drop every cached dataset; the next `get_or_load` reads from disk.
    pub fn clear(&mut self) {
        log::info!("Clearing {} cached dataset(s)", self.entries.len());
        self.entries.clear();
        self.aliases.clear();
    }

    /// Whether `path`, as spelled or resolved, has a cached dataset.
    pub fn contains(&self, path: &Path) -> bool {
        self.cached(path).is_some()
            || std::fs::canonicalize(path).is_ok_and(|key| self.entries.contains_key(&key))
    }

    /// Number of distinct files cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
