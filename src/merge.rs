//! Merging coverage across test runs.
//!
//! A resultset can hold several runs (RSpec and Minitest recording into
//! the same file is the common case), and a file's true coverage is the
//! sum over all of them. Line merging is positional and must respect the
//! not-instrumented sentinel:
//!
//! | left    | right   | merged  |
//! |---------|---------|---------|
//! | 5       | 2       | 7       |
//! | 5       | null    | 5       |
//! | 0       | null    | null    |
//! | 0       | 0       | 0       |
//! | null    | null    | null    |
//!
//! A zero only survives when both runs actually instrumented the line;
//! zero-plus-sentinel stays sentinel so a line one run could never see
//! is not misreported as a miss.

use crate::resultset::{BranchData, FileCoverage, FileCoverageMap, Resultset};

/// Merge two per-file coverage records, either of which may be absent.
#[must_use]
pub fn combine(a: Option<&FileCoverage>, b: Option<&FileCoverage>) -> FileCoverage {
    match (a, b) {
        (Some(a), Some(b)) => FileCoverage {
            lines: merge_lines(&a.lines, &b.lines),
            branches: merge_branches(&a.branches, &b.branches),
        },
        (Some(a), None) => a.clone(),
        (None, Some(b)) => b.clone(),
        (None, None) => FileCoverage::empty(),
    }
}

/// Merge two line vectors position by position.
///
/// The result is as long as the longer input; the shorter one is padded
/// with the sentinel.
#[must_use]
pub fn merge_lines(a: &[Option<u64>], b: &[Option<u64>]) -> Vec<Option<u64>> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let left = a.get(i).copied().flatten();
            let right = b.get(i).copied().flatten();
            let sum = left.unwrap_or(0) + right.unwrap_or(0);
            if sum == 0 && (left.is_none() || right.is_none()) {
                None
            } else {
                Some(sum)
            }
        })
        .collect()
}

/// Merge two branch maps: union of conditions, union of arms, hit counts
/// summed where both sides recorded the same arm.
#[must_use]
pub fn merge_branches(a: &BranchData, b: &BranchData) -> BranchData {
    let mut merged = a.clone();
    for (condition, arms) in b {
        match merged.get_mut(condition) {
            Some(existing) => {
                for (arm, hit_count) in arms {
                    *existing.entry(arm.clone()).or_insert(0) += hit_count;
                }
            }
            None => {
                merged.insert(condition.clone(), arms.clone());
            }
        }
    }
    merged
}

/// Collapse every run in a resultset into one coverage map, folding runs
/// in document order.
#[must_use]
pub fn merge(resultset: &Resultset) -> FileCoverageMap {
    let mut merged = FileCoverageMap::new();
    for run in resultset.runs.values() {
        for (file, coverage) in &run.coverage {
            let combined = combine(merged.get(file.as_str()), Some(coverage));
            merged.insert(file.clone(), combined);
        }
    }
    merged
}
