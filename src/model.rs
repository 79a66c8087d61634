//! Classified coverage models.
//!
//! This is where raw resultset data becomes something reportable: each
//! file's line vector and branch maps are combined into per-line statuses
//! and whole-file statistics. Branches are resolved first because an
//! uncovered branch arm downgrades the line it reports on, even when the
//! line itself was executed.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::keys::{BranchKey, ConditionKey};
use crate::resultset::FileCoverage;

/// Classification of a single line or branch arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    /// Executed at least once, with no uncovered branch arm attached.
    Covered,
    /// Relevant but never executed, or carrying an unexecuted branch arm.
    Uncovered,
    /// Not instrumented by the tracer; irrelevant to statistics.
    Never,
    /// Excluded from coverage by directive. Reserved for emitters that
    /// mark skipped regions; plain resultsets never produce it.
    Skipped,
}

impl LineStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStatus::Covered => "covered",
            LineStatus::Uncovered => "uncovered",
            LineStatus::Never => "never",
            LineStatus::Skipped => "skipped",
        }
    }
}

/// One classified branch arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub start_line: u32,
    pub end_line: u32,
    pub hit_count: u64,
    /// Whether the arm starts on the same line as its condition.
    pub inline: bool,
    /// Arm label from the key, e.g. `then`, `else`, `when`.
    pub kind: String,
    /// The line this arm's result is attributed to. Inline arms report on
    /// their own start line; block arms report on the line above, where
    /// the guarding expression sits.
    pub report_line: u32,
    pub status: LineStatus,
}

impl Branch {
    /// Classify one branch arm against the condition it belongs to.
    #[must_use]
    pub fn classify(arm: &BranchKey, hit_count: u64, condition_line: u32) -> Self {
        let inline = arm.start_line == condition_line;
        let report_line = if inline {
            arm.start_line
        } else {
            arm.start_line.saturating_sub(1)
        };
        let status = if hit_count > 0 {
            LineStatus::Covered
        } else {
            LineStatus::Uncovered
        };
        Self {
            start_line: arm.start_line,
            end_line: arm.end_line,
            hit_count,
            inline,
            kind: arm.kind.clone(),
            report_line,
            status,
        }
    }
}

/// A branch arm as attached to the line it reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSummary {
    pub kind: String,
    pub hit_count: u64,
}

/// One classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: u32,
    /// Raw hit count; `None` for uninstrumented lines.
    pub hit_count: Option<u64>,
    pub status: LineStatus,
    /// Branch arms reporting on this line, in document order.
    pub branches: Vec<BranchSummary>,
}

/// Whole-file coverage statistics over relevant lines.
///
/// Lines with status [`LineStatus::Never`] are irrelevant and excluded
/// from every figure here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageStatistics {
    pub total_lines: u64,
    pub covered_lines: u64,
    pub uncovered_lines: u64,
    /// Mean hit count across relevant lines; 0 when there are none.
    pub strength: f64,
    /// Percent of relevant lines covered. A file with nothing uncovered
    /// reports 100, including the degenerate no-relevant-lines case.
    pub percentage: f64,
}

impl CoverageStatistics {
    #[must_use]
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut covered: u64 = 0;
        let mut uncovered: u64 = 0;
        let mut hits: u64 = 0;
        for line in lines {
            match line.status {
                LineStatus::Covered => covered += 1,
                LineStatus::Uncovered => uncovered += 1,
                LineStatus::Never | LineStatus::Skipped => continue,
            }
            hits += line.hit_count.unwrap_or(0);
        }

        let total = covered + uncovered;
        let strength = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        let percentage = if uncovered == 0 {
            100.0
        } else {
            covered as f64 * 100.0 / total as f64
        };

        Self {
            total_lines: total,
            covered_lines: covered,
            uncovered_lines: uncovered,
            strength,
            percentage,
        }
    }
}

/// A fully classified source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Absolute path as recorded in the resultset.
    pub name: String,
    pub lines: Vec<Line>,
    pub statistics: CoverageStatistics,
}

impl SourceFile {
    /// Build the classified model for one file from its raw coverage.
    pub fn build(name: &str, coverage: &FileCoverage) -> Result<Self> {
        let branches = classify_branches(coverage)?;
        let by_report_line = index_by_report_line(&branches);
        let lines = classify_lines(&coverage.lines, &by_report_line);
        let statistics = CoverageStatistics::from_lines(&lines);
        Ok(Self {
            name: name.to_string(),
            lines,
            statistics,
        })
    }

    /// Lines with status [`LineStatus::Uncovered`], in order.
    #[must_use]
    pub fn uncovered_lines(&self) -> Vec<u32> {
        self.lines
            .iter()
            .filter(|line| line.status == LineStatus::Uncovered)
            .map(|line| line.number)
            .collect()
    }
}

/// All classified files, keyed by path.
pub type ModelMap = BTreeMap<String, SourceFile>;

fn classify_branches(coverage: &FileCoverage) -> Result<Vec<Branch>> {
    let mut branches = Vec::new();
    for (condition_key, arms) in &coverage.branches {
        let condition = ConditionKey::parse(condition_key)?;
        for (arm_key, hit_count) in arms {
            let arm = BranchKey::parse(arm_key)?;
            branches.push(Branch::classify(&arm, *hit_count, condition.start_line));
        }
    }
    Ok(branches)
}

fn index_by_report_line(branches: &[Branch]) -> BTreeMap<u32, Vec<BranchSummary>> {
    let mut by_line: BTreeMap<u32, Vec<BranchSummary>> = BTreeMap::new();
    for branch in branches {
        by_line
            .entry(branch.report_line)
            .or_default()
            .push(BranchSummary {
                kind: branch.kind.clone(),
                hit_count: branch.hit_count,
            });
    }
    by_line
}

fn classify_lines(
    raw: &[Option<u64>],
    branches: &BTreeMap<u32, Vec<BranchSummary>>,
) -> Vec<Line> {
    raw.iter()
        .enumerate()
        .map(|(index, hit_count)| {
            let number = index as u32 + 1;
            let attached = branches.get(&number).cloned().unwrap_or_default();
            let has_uncovered_branch = attached.iter().any(|arm| arm.hit_count == 0);
            let status = if has_uncovered_branch {
                LineStatus::Uncovered
            } else {
                match hit_count {
                    None => LineStatus::Never,
                    Some(0) => LineStatus::Uncovered,
                    Some(_) => LineStatus::Covered,
                }
            };
            Line {
                number,
                hit_count: *hit_count,
                status,
                branches: attached,
            }
        })
        .collect()
}
