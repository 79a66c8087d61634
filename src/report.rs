//! Plain-text rendering helpers shared by the CLI commands.

use crate::model::{BranchSummary, CoverageStatistics, LineStatus};

/// Single-character marker for a line status, suitable for gutters.
#[must_use]
pub fn status_marker(status: LineStatus) -> &'static str {
    match status {
        LineStatus::Covered => "✓",
        LineStatus::Uncovered => "✗",
        LineStatus::Never => " ",
        LineStatus::Skipped => "-",
    }
}

/// One-line summary for a set of statistics, e.g.
/// `14 relevant lines. 12 covered, 2 missed.`
#[must_use]
pub fn summary_line(stats: &CoverageStatistics) -> String {
    format!(
        "{} relevant lines. {} covered, {} missed.",
        stats.total_lines, stats.covered_lines, stats.uncovered_lines
    )
}

/// Collapse sorted line numbers into a compact range list, e.g.
/// `[3, 4, 5, 9, 12, 13]` becomes `3-5, 9, 12-13`.
#[must_use]
pub fn format_line_ranges(lines: &[u32]) -> String {
    let Some((&first, rest)) = lines.split_first() else {
        return String::new();
    };

    let mut ranges = Vec::new();
    let mut start = first;
    let mut end = first;
    for &line in rest {
        if line == end + 1 {
            end = line;
        } else {
            ranges.push(render_range(start, end));
            start = line;
            end = line;
        }
    }
    ranges.push(render_range(start, end));
    ranges.join(", ")
}

fn render_range(start: u32, end: u32) -> String {
    if start == end {
        format!("{start}")
    } else {
        format!("{start}-{end}")
    }
}

/// Render the branch arms attached to a line, e.g. `then: 1, else: 0`
/// with counts or `then, else` without.
#[must_use]
pub fn format_branches(branches: &[BranchSummary], counts: bool) -> String {
    branches
        .iter()
        .map(|arm| {
            if counts {
                format!("{}: {}", arm.kind, arm.hit_count)
            } else {
                arm.kind.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_marker() {
        assert_eq!(status_marker(LineStatus::Covered), "✓");
        assert_eq!(status_marker(LineStatus::Uncovered), "✗");
        assert_eq!(status_marker(LineStatus::Never), " ");
    }

    #[test]
    fn test_summary_line() {
        let stats = CoverageStatistics {
            total_lines: 14,
            covered_lines: 12,
            uncovered_lines: 2,
            strength: 3.5,
            percentage: 85.71,
        };
        assert_eq!(
            summary_line(&stats),
            "14 relevant lines. 12 covered, 2 missed."
        );
    }

    #[test]
    fn test_format_line_ranges() {
        assert_eq!(format_line_ranges(&[]), "");
        assert_eq!(format_line_ranges(&[7]), "7");
        assert_eq!(format_line_ranges(&[3, 4, 5]), "3-5");
        assert_eq!(format_line_ranges(&[3, 4, 5, 9, 12, 13]), "3-5, 9, 12-13");
        assert_eq!(format_line_ranges(&[1, 3, 5]), "1, 3, 5");
    }

    #[test]
    fn test_format_branches() {
        let branches = vec![
            BranchSummary {
                kind: "then".to_string(),
                hit_count: 1,
            },
            BranchSummary {
                kind: "else".to_string(),
                hit_count: 0,
            },
        ];
        assert_eq!(format_branches(&branches, true), "then: 1, else: 0");
        assert_eq!(format_branches(&branches, false), "then, else");
        assert_eq!(format_branches(&[], true), "");
    }
}
