use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader;
use super::model::ListingDataset;
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Source identity
// ---------------------------------------------------------------------------

/// What must stay equal for a cached parse to remain valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceSignature {
    modified: Option<SystemTime>,
    len: u64,
    current_year: i32,
}

impl SourceSignature {
    fn read(path: &Path, current_year: i32) -> Result<Self, DataLoadError> {
        let meta = std::fs::metadata(path).map_err(|e| DataLoadError::from_io(path, e))?;
        Ok(SourceSignature {
            modified: meta.modified().ok(),
            len: meta.len(),
            current_year,
        })
    }
}

struct CacheEntry {
    signature: SourceSignature,
    dataset: Arc<ListingDataset>,
}

// ---------------------------------------------------------------------------
// DatasetCache
// ---------------------------------------------------------------------------

/// Parsed datasets keyed by source file.
///
/// A hit hands out the same `Arc`; a reload always builds a new dataset, so
/// holders of an older `Arc` keep a consistent snapshot.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<Arc<ListingDataset>, DataLoadError> {
        self.load_for_year(path, loader::current_year())
    }

    /// Return the cached dataset for `path` if the file is unchanged, otherwise
    /// parse it again and replace the entry.
    pub fn load_for_year(
        &mut self,
        path: &Path,
        current_year: i32,
    ) -> Result<Arc<ListingDataset>, DataLoadError> {
        let key = cache_key(path);
        let signature = match SourceSignature::read(path, current_year) {
            Ok(sig) => sig,
            Err(e) => {
                self.entries.remove(&key);
                return Err(e);
            }
        };

        if let Some(entry) = self.entries.get(&key) {
            if entry.signature == signature {
                log::debug!("cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.dataset));
            }
            log::debug!("{} changed on disk, reloading", path.display());
        } else {
            log::debug!("cache miss for {}", path.display());
        }

        let dataset = match loader::load_file_for_year(path, current_year) {
            Ok(ds) => Arc::new(ds),
            Err(e) => {
                self.entries.remove(&key);
                return Err(e);
            }
        };
        self.entries.insert(
            key,
            CacheEntry {
                signature,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(&cache_key(path)).is_some()
    }

    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&cache_key(path))
    }

    /// Number of files with a cached parse.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Absolute form of `path`; does not touch the filesystem, so it is stable
/// across deletion of the file.
fn cache_key(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::write_csv;

    const ROW_A: &str = r#""$350,000",3 bd,2 ba,"1,750 sqft","4,000 sqft",1990,30,Sold,Condo,TX,Austin,1 A St,Jane Doe - ABC Realty"#;
    const ROW_B: &str = r#""$725,000",4 bd,3 ba,"2,900 sqft","6,500 sqft",2008,12,For Sale,Single Family,CA,Fresno,2 B St,John Roe - Sunny Homes"#;

    #[test]
    fn unchanged_file_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &[ROW_A]);
        let mut cache = DatasetCache::new();

        let first = cache.load_for_year(&path, 2025).unwrap();
        let second = cache.load_for_year(&path, 2025).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.listings, second.listings);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_file_is_reparsed_and_old_snapshot_survives() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &[ROW_A]);
        let mut cache = DatasetCache::new();

        let before = cache.load_for_year(&path, 2025).unwrap();
        write_csv(dir.path(), "sales.csv", &[ROW_A, ROW_B]);
        let after = cache.load_for_year(&path, 2025).unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(after.listings[1].state(), "CA");
    }

    #[test]
    fn year_change_invalidates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &[ROW_A]);
        let mut cache = DatasetCache::new();

        let a = cache.load_for_year(&path, 2025).unwrap();
        let b = cache.load_for_year(&path, 2026).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.listings[0].building_age, Some(36));
    }

    #[test]
    fn explicit_invalidation_forces_reparse() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &[ROW_A]);
        let mut cache = DatasetCache::new();

        let a = cache.load_for_year(&path, 2025).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.contains(&path));
        assert!(!cache.invalidate(&path));

        let b = cache.load_for_year(&path, 2025).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.listings, b.listings);
    }

    #[test]
    fn deleted_file_errors_and_drops_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &[ROW_A]);
        let mut cache = DatasetCache::new();
        cache.load_for_year(&path, 2025).unwrap();

        let key = cache_key(&path);
        std::fs::remove_file(&path).unwrap();
        let err = cache.load_for_year(&path, 2025).unwrap_err();
        assert!(matches!(err, DataLoadError::NotFound { .. }));
        assert!(!cache.entries.contains_key(&key));
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "Price,State\n$1,TX\n").unwrap();
        let mut cache = DatasetCache::new();

        assert!(matches!(
            cache.load_for_year(&path, 2025),
            Err(DataLoadError::MissingColumns { .. })
        ));
        assert!(cache.is_empty());
    }
}
