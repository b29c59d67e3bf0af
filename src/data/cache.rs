//! Table Cache Module
//! Loads the dataset once per process and shares it read-only.

use crate::data::loader::{load_data, LoadedData, LoaderError};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Lazily loaded table keyed by a single fixed path.
///
/// Concurrent callers block on the in-flight load; a failed load is not
/// stored, so the next call tries again.
pub struct DataCache {
    path: PathBuf,
    cell: OnceCell<Arc<LoadedData>>,
}

impl DataCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached table, loading it on first access.
    pub fn get_or_load(&self) -> Result<Arc<LoadedData>, LoaderError> {
        if let Some(data) = self.cell.get() {
            debug!("serving cached dataset");
            return Ok(Arc::clone(data));
        }
        self.cell
            .get_or_try_init(|| load_data(&self.path).map(Arc::new))
            .map(Arc::clone)
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn concurrent_callers_share_one_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "Entity,Code,Year,Total_GW\nNorway,NOR,2020,40\n").unwrap();

        let cache = Arc::new(DataCache::new(&path));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_load().unwrap())
            })
            .collect();
        let tables: Vec<Arc<LoadedData>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for table in &tables[1..] {
            assert!(Arc::ptr_eq(&tables[0], table));
        }
        assert!(Arc::ptr_eq(&tables[0], &cache.get_or_load().unwrap()));
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("late.csv");
        let cache = DataCache::new(&path);

        assert!(cache.get_or_load().is_err());
        assert!(!cache.is_loaded());

        fs::write(&path, "Entity,Code,Year\nNorway,NOR,2020\n").unwrap();
        let loaded = cache.get_or_load().unwrap();
        assert_eq!(loaded.table.len(), 1);
        assert!(cache.is_loaded());
    }
}
