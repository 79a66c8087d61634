//! Versioned, shared ownership of the current models.
//!
//! Consumers that render coverage (editors, long-lived reporters) need a
//! stable snapshot while a reload may be swapping in new data. The store
//! hands out [`Arc`] snapshots: readers keep whatever generation they
//! grabbed, and a replace bumps the version so stale snapshots are
//! detectable by comparison.

use std::sync::{Arc, PoisonError, RwLock};

use crate::model::{ModelMap, SourceFile};

/// One immutable generation of classified models.
#[derive(Debug, Default)]
pub struct ModelSet {
    /// Monotonic generation counter; 0 is the initial empty set.
    pub version: u64,
    pub files: ModelMap,
}

impl ModelSet {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SourceFile> {
        self.files.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Shared handle to the current model set.
#[derive(Debug, Default)]
pub struct ModelStore {
    current: RwLock<Arc<ModelSet>>,
}

impl ModelStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current generation.
    #[must_use]
    pub fn get(&self) -> Arc<ModelSet> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new set of models, returning the new generation.
    pub fn replace(&self, files: ModelMap) -> Arc<ModelSet> {
        self.swap(files)
    }

    /// Drop all models, returning the new empty generation.
    pub fn clear(&self) -> Arc<ModelSet> {
        self.swap(ModelMap::new())
    }

    fn swap(&self, files: ModelMap) -> Arc<ModelSet> {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(ModelSet {
            version: current.version + 1,
            files,
        });
        *current = next.clone();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resultset::FileCoverage;

    fn models(names: &[&str]) -> ModelMap {
        names
            .iter()
            .map(|name| {
                let file = SourceFile::build(name, &FileCoverage::empty()).unwrap();
                (name.to_string(), file)
            })
            .collect()
    }

    #[test]
    fn test_starts_empty_at_version_zero() {
        let store = ModelStore::new();
        let set = store.get();
        assert_eq!(set.version, 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_get_is_stable_between_replacements() {
        let store = ModelStore::new();
        store.replace(models(&["/a.rb"]));
        assert!(Arc::ptr_eq(&store.get(), &store.get()));
    }

    #[test]
    fn test_replace_bumps_version() {
        let store = ModelStore::new();
        let first = store.replace(models(&["/a.rb"]));
        assert_eq!(first.version, 1);
        assert_eq!(first.len(), 1);

        let second = store.replace(models(&["/a.rb", "/b.rb"]));
        assert_eq!(second.version, 2);
        assert_eq!(second.len(), 2);
        assert_eq!(store.get().version, 2);
    }

    #[test]
    fn test_old_snapshots_survive_replace() {
        let store = ModelStore::new();
        store.replace(models(&["/a.rb"]));
        let old = store.get();
        store.replace(models(&["/b.rb"]));

        assert_eq!(old.version, 1);
        assert!(old.get("/a.rb").is_some());
        assert!(store.get().get("/a.rb").is_none());
    }

    #[test]
    fn test_clear_is_a_new_generation() {
        let store = ModelStore::new();
        store.replace(models(&["/a.rb"]));
        let cleared = store.clear();
        assert_eq!(cleared.version, 2);
        assert!(cleared.is_empty());
    }
}
