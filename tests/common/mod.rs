#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

use covset::loader;
use covset::model::ModelMap;
use covset::resultset::Resultset;

/// Sample resultset with two runs (RSpec and Minitest) covering four files,
/// including shared files, branch coverage, and an uninstrumented tail.
pub const SAMPLE: &[u8] = include_bytes!("../fixtures/sample.resultset.json");

/// Write `contents` as `.resultset.json` inside a fresh coverage directory,
/// returning the tempdir handle and the directory path.
/// The caller must hold onto `TempDir` to keep the temp directory alive.
pub fn setup_coverage_dir(contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let coverage_dir = dir.path().join("coverage");
    std::fs::create_dir(&coverage_dir).unwrap();
    std::fs::write(coverage_dir.join(".resultset.json"), contents).unwrap();
    (dir, coverage_dir)
}

/// Classified models built straight from the sample fixture.
pub fn sample_models() -> ModelMap {
    let resultset = Resultset::from_json_slice(SAMPLE).unwrap();
    loader::build_models(&resultset).unwrap()
}
