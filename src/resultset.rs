//! Deserialization of SimpleCov `.resultset.json` documents.
//!
//! A resultset maps each recorded test run (keyed by the suite name that
//! produced it) to its coverage payload and a Unix timestamp:
//!
//! ```json
//! {
//!   "RSpec": {
//!     "coverage": {
//!       "/app/models/user.rb": {
//!         "lines": [1, 1, null, 0],
//!         "branches": {
//!           "[:if, 0, 3, 4, 7, 7]": {
//!             "[:then, 1, 4, 6, 4, 10]": 2,
//!             "[:else, 2, 6, 6, 6, 14]": 0
//!           }
//!         }
//!       }
//!     },
//!     "timestamp": 1693140561
//!   }
//! }
//! ```
//!
//! Line entries are hit counts, with `null` marking lines the tracer never
//! instrumented (comments, blank lines, `end` keywords). That sentinel is
//! semantically distinct from an explicit `0` and survives merging, so the
//! types here keep it as `Option<u64>` rather than collapsing it.
//!
//! Key order in the `branches` maps is meaningful to older emitters, so
//! those maps deserialize into [`IndexMap`] to preserve document order.

use std::collections::BTreeMap;
use std::io::Read;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Result;

/// Branch coverage for one file: condition key -> arm key -> hit count.
pub type BranchData = IndexMap<String, IndexMap<String, u64>>;

/// Raw coverage for a single source file, exactly as recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileCoverage {
    /// Per-line hit counts, index 0 = line 1. `None` is the
    /// not-instrumented sentinel.
    pub lines: Vec<Option<u64>>,
    /// Branch hit counts; absent entirely when branch tracking was off.
    #[serde(default)]
    pub branches: BranchData,
}

impl FileCoverage {
    /// Coverage with no lines and no branches.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Coverage payloads keyed by absolute file path.
pub type FileCoverageMap = BTreeMap<String, FileCoverage>;

/// One recorded test run.
#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub coverage: FileCoverageMap,
    /// Unix timestamp of when the run was recorded.
    pub timestamp: i64,
}

/// A full resultset document: every run it contains, in document order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Resultset {
    pub runs: IndexMap<String, Run>,
}

impl Resultset {
    /// Parse a resultset from raw JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse a resultset from a reader.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
