//! casefold - safe batch filename-case normalizer.
//!
//! Usage:
//!   casefold <ROOT>                          Lowercase all target filenames
//!   casefold <ROOT> --exclude a,b            Skip directories during the run
//!   casefold <ROOT> --revert a,b             Best-effort restore of original casing
//!   casefold --help                          Show help

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use casefold_core::{NormalizeConfig, NormalizeError, RunReport};
use casefold_ops::{apply_plan, revert_entry, RenameOutcome, RevertOutcome};
use casefold_walk::Walker;

#[derive(Parser)]
#[command(
    name = "casefold",
    version,
    about = "Rename files to canonical lowercase, safely",
    long_about = "casefold renames the target files under a directory tree to their \
                  lowercase form, tolerating case-insensitive filesystems and never \
                  losing data on name collisions.\n\n\
                  Reversal (--revert) reconstructs a plausible original \
                  capitalization when no record of it exists; it is best-effort \
                  by design."
)]
struct Cli {
    /// Root directory to process
    root: PathBuf,

    /// Directory prefixes to exclude from normalization
    #[arg(long, value_delimiter = ',', value_name = "DIR")]
    exclude: Vec<PathBuf>,

    /// Directories to revert instead of normalizing
    #[arg(long, value_delimiter = ',', value_name = "DIR")]
    revert: Vec<PathBuf>,

    /// Target file extensions
    #[arg(
        long = "ext",
        value_delimiter = ',',
        value_name = "EXT",
        default_values = ["cpp", "hpp"]
    )]
    extensions: Vec<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();

    // The only fatal error: anything after this point is per-file.
    if !cli.root.is_dir() {
        return Err(NormalizeError::NotADirectory {
            path: cli.root.clone(),
        }
        .into());
    }

    // Default to excluding <root>/lib when nothing else was asked for.
    if cli.exclude.is_empty() && cli.revert.is_empty() {
        let lib = cli.root.join("lib");
        if lib.is_dir() {
            println!("Note: Automatically excluding {}", lib.display());
            cli.exclude.push(lib);
        }
    }

    let config = NormalizeConfig::builder()
        .root(cli.root)
        .exclude(cli.exclude)
        .revert(cli.revert)
        .extensions(cli.extensions)
        .build()
        .map_err(|e| NormalizeError::InvalidConfig {
            message: e.to_string(),
        })?;

    let ext_list = config.extensions.join(", ");
    if config.revert.is_empty() {
        println!(
            "Converting {} filenames to lowercase in {}",
            ext_list,
            config.root.display()
        );
        if !config.exclude.is_empty() {
            let dirs: Vec<String> = config
                .exclude
                .iter()
                .map(|d| d.display().to_string())
                .collect();
            println!("Excluding directories: {}", dirs.join(", "));
        }
    } else {
        let dirs: Vec<String> = config
            .revert
            .iter()
            .map(|d| d.display().to_string())
            .collect();
        println!(
            "Reverting {} filename conversions in: {}",
            ext_list,
            dirs.join(", ")
        );
    }
    println!("{}", "=".repeat(80));

    let report = run(&config)?;

    println!("\n{}", report.render());
    Ok(())
}

/// Execute one run: reversal directories first, then the forward pass.
fn run(config: &NormalizeConfig) -> Result<RunReport> {
    let mut report = RunReport::new();
    let walker = Walker::new(config.clone());

    for dir in &config.revert {
        println!("Reverting changes in {}...", dir.display());
        for entry in walker.revert_candidates(dir) {
            match revert_entry(&entry) {
                RevertOutcome::Reverted {
                    destination,
                    best_guess,
                } => {
                    let note = if best_guess { " (best guess)" } else { "" };
                    println!(
                        "Reverted: {} -> {}{}",
                        entry.path.display(),
                        destination.display(),
                        note
                    );
                    report.record_reverted(entry.path, destination);
                }
                RevertOutcome::NoCandidate => {
                    report.record_skipped(entry.path, "no reversal candidate");
                }
            }
        }
    }

    // Snapshot the plans before mutating so the walk never observes its
    // own renames.
    let plans: Vec<_> = walker.plan()?.collect();
    for plan in plans {
        match apply_plan(&plan) {
            RenameOutcome::Applied {
                destination,
                duplicate_discarded,
            } => {
                let note = if duplicate_discarded {
                    " (identical to existing file)"
                } else {
                    ""
                };
                println!(
                    "Renamed: {} -> {}{}",
                    plan.source.display(),
                    destination.display(),
                    note
                );
                report.record_renamed(plan.source, destination);
            }
            RenameOutcome::Conflicted {
                destination,
                kept_as,
            } => {
                println!(
                    "Renamed: {} -> {} (kept existing as {})",
                    plan.source.display(),
                    destination.display(),
                    kept_as.display()
                );
                report.record_renamed(plan.source, destination);
            }
            RenameOutcome::Failed { reason } => {
                println!(
                    "ERROR: Failed to rename {}: {}",
                    plan.source.display(),
                    reason
                );
                report.record_skipped(plan.source, reason);
            }
        }
    }

    Ok(report)
}
