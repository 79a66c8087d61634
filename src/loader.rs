//! Locating and loading resultsets from disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{CovsetError, Result};
use crate::merge;
use crate::model::{ModelMap, SourceFile};
use crate::resultset::Resultset;
use crate::store::{ModelSet, ModelStore};

/// File names probed inside the coverage directory, in order of
/// preference. `coverage.json` wins when both exist.
pub const RESULTSET_NAMES: [&str; 2] = ["coverage.json", ".resultset.json"];

/// The resultset file inside `coverage_dir`, if one exists.
#[must_use]
pub fn find_resultset(coverage_dir: &Path) -> Option<PathBuf> {
    RESULTSET_NAMES
        .iter()
        .map(|name| coverage_dir.join(name))
        .find(|path| path.is_file())
}

/// Read and parse the resultset in `coverage_dir`.
pub fn read_resultset(coverage_dir: &Path) -> Result<Resultset> {
    let path = find_resultset(coverage_dir)
        .ok_or_else(|| CovsetError::ResultsetNotFound(coverage_dir.to_path_buf()))?;
    let bytes = fs::read(path)?;
    Resultset::from_json_slice(&bytes)
}

/// Build classified models from an already-parsed resultset.
pub fn build_models(resultset: &Resultset) -> Result<ModelMap> {
    let merged = merge::merge(resultset);
    let mut models = ModelMap::new();
    for (name, coverage) in &merged {
        models.insert(name.clone(), SourceFile::build(name, coverage)?);
    }
    Ok(models)
}

/// Read, merge, and classify the resultset in `coverage_dir`.
pub fn load_models(coverage_dir: &Path) -> Result<ModelMap> {
    let resultset = read_resultset(coverage_dir)?;
    build_models(&resultset)
}

/// Reload `coverage_dir` into `store`.
///
/// The store is only touched once loading has fully succeeded; on any
/// error the previous generation stays current.
pub fn refresh(store: &ModelStore, coverage_dir: &Path) -> Result<Arc<ModelSet>> {
    let models = load_models(coverage_dir)?;
    Ok(store.replace(models))
}
