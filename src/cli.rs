//! Command handler functions for the covset CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;

use anyhow::{bail, Result};
use chrono::DateTime;

use crate::model::{LineStatus, ModelMap, SourceFile};
use crate::report;
use crate::resultset::Resultset;

pub fn cmd_summary(models: &ModelMap, file: Option<&str>) -> Result<String> {
    if let Some(name) = file {
        let Some(model) = models.get(name) else {
            bail!("No coverage data for '{}'", name);
        };
        let mut out = String::new();
        writeln!(out, "{}", model.name).unwrap();
        writeln!(out, "  {}", report::summary_line(&model.statistics)).unwrap();
        writeln!(
            out,
            "  Coverage: {:.1}%   Strength: {:.1}",
            model.statistics.percentage, model.statistics.strength
        )
        .unwrap();
        return Ok(out);
    }

    let mut covered: u64 = 0;
    let mut uncovered: u64 = 0;
    let mut hits: u64 = 0;
    for model in models.values() {
        covered += model.statistics.covered_lines;
        uncovered += model.statistics.uncovered_lines;
        for line in &model.lines {
            if matches!(line.status, LineStatus::Covered | LineStatus::Uncovered) {
                hits += line.hit_count.unwrap_or(0);
            }
        }
    }
    let total = covered + uncovered;
    let percentage = if uncovered == 0 {
        100.0
    } else {
        covered as f64 * 100.0 / total as f64
    };
    let strength = if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    };

    let mut out = String::new();
    writeln!(out, "Files:      {}", models.len()).unwrap();
    writeln!(out, "Lines:      {}/{} ({:.1}%)", covered, total, percentage).unwrap();
    writeln!(out, "Strength:   {:.1}", strength).unwrap();
    Ok(out)
}

pub fn cmd_files(models: &ModelMap, sort_by_coverage: bool) -> Result<String> {
    if models.is_empty() {
        return Ok("No coverage data loaded.\n".to_string());
    }

    let mut files: Vec<&SourceFile> = models.values().collect();
    if sort_by_coverage {
        files.sort_by(|a, b| {
            a.statistics
                .percentage
                .total_cmp(&b.statistics.percentage)
        });
    }

    let mut out = String::new();
    writeln!(
        out,
        "{:<60} {:>8} {:>8} {:>8} {:>9} {:>9}",
        "FILE", "LINES", "COVERED", "MISSED", "PCT", "STRENGTH"
    )
    .unwrap();
    writeln!(out, "{}", "-".repeat(107)).unwrap();

    for file in &files {
        writeln!(
            out,
            "{:<60} {:>8} {:>8} {:>8} {:>8.1}% {:>9.1}",
            file.name,
            file.statistics.total_lines,
            file.statistics.covered_lines,
            file.statistics.uncovered_lines,
            file.statistics.percentage,
            file.statistics.strength
        )
        .unwrap();
    }

    Ok(out)
}

pub fn cmd_lines(models: &ModelMap, file: &str, counts: bool) -> Result<String> {
    let Some(model) = models.get(file) else {
        bail!("No coverage data for '{}'", file);
    };

    let mut out = String::new();
    if counts {
        writeln!(out, "{:>6}  {:>10}  STATUS", "LINE", "HITS").unwrap();
        writeln!(out, "{}", "-".repeat(26)).unwrap();
    } else {
        writeln!(out, "{:>6}  STATUS", "LINE").unwrap();
        writeln!(out, "{}", "-".repeat(14)).unwrap();
    }

    for line in &model.lines {
        let marker = report::status_marker(line.status);
        let branches = report::format_branches(&line.branches, counts);
        let suffix = if branches.is_empty() {
            String::new()
        } else {
            format!("  {}", branches)
        };
        if counts {
            let hits = match line.hit_count {
                Some(count) => count.to_string(),
                None => "-".to_string(),
            };
            writeln!(out, "{:>6}  {:>10}  {}{}", line.number, hits, marker, suffix).unwrap();
        } else {
            writeln!(out, "{:>6}  {}{}", line.number, marker, suffix).unwrap();
        }
    }
    Ok(out)
}

pub fn cmd_uncovered(models: &ModelMap, file: &str) -> Result<String> {
    let Some(model) = models.get(file) else {
        bail!("No coverage data for '{}'", file);
    };

    let uncovered = model.uncovered_lines();
    if uncovered.is_empty() {
        return Ok(format!("All relevant lines are covered in '{}'\n", file));
    }

    let mut out = String::new();
    writeln!(out, "Uncovered lines in '{}':", file).unwrap();
    writeln!(out, "  {}", report::format_line_ranges(&uncovered)).unwrap();
    writeln!(out, "  ({} lines)", uncovered.len()).unwrap();
    Ok(out)
}

pub fn cmd_runs(resultset: &Resultset) -> Result<String> {
    if resultset.runs.is_empty() {
        return Ok("No runs in resultset.\n".to_string());
    }

    let mut out = String::new();
    writeln!(out, "{:<24} {:<20} FILES", "RUN", "RECORDED").unwrap();
    writeln!(out, "{}", "-".repeat(52)).unwrap();
    for (name, run) in &resultset.runs {
        writeln!(
            out,
            "{:<24} {:<20} {:>5}",
            name,
            format_timestamp(run.timestamp),
            run.coverage.len()
        )
        .unwrap();
    }
    Ok(out)
}

fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(when) => when.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}
