use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use covset::cli::{cmd_files, cmd_lines, cmd_runs, cmd_summary, cmd_uncovered};
use covset::loader;
use covset::model::ModelMap;

/// covset — SimpleCov resultset ingestion, merging, and line/branch
/// coverage classification.
#[derive(Parser)]
#[command(name = "covset", version, about)]
struct Cli {
    /// Directory containing the resultset (default: ./coverage)
    #[arg(long, global = true, default_value = "coverage")]
    coverage_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a coverage summary for the whole set or a single file.
    Summary {
        /// Source file path (as recorded in the resultset).
        #[arg(long)]
        file: Option<String>,
    },

    /// List per-file coverage.
    Files {
        /// Sort by coverage percentage ascending (show worst files first).
        #[arg(long)]
        sort_by_coverage: bool,
    },

    /// Show line-level coverage for a source file.
    Lines {
        /// The source file path (as recorded in the resultset).
        file: String,

        /// Show hit counts next to each line and branch arm.
        #[arg(long)]
        counts: bool,
    },

    /// Show only uncovered lines for a source file.
    Uncovered {
        /// The source file path.
        file: String,
    },

    /// List the test runs recorded in the resultset.
    Runs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Summary { file } => {
            cmd_summary(&load(&cli.coverage_dir)?, file.as_deref())?
        }
        Commands::Files { sort_by_coverage } => {
            cmd_files(&load(&cli.coverage_dir)?, sort_by_coverage)?
        }
        Commands::Lines { file, counts } => {
            cmd_lines(&load(&cli.coverage_dir)?, &file, counts)?
        }
        Commands::Uncovered { file } => cmd_uncovered(&load(&cli.coverage_dir)?, &file)?,
        Commands::Runs => {
            let resultset = loader::read_resultset(&cli.coverage_dir)
                .context("Failed to read resultset")?;
            cmd_runs(&resultset)?
        }
    };

    print!("{}", output);
    Ok(())
}

fn load(coverage_dir: &Path) -> Result<ModelMap> {
    loader::load_models(coverage_dir).context("Failed to load coverage models")
}
