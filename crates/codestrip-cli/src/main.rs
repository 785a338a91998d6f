//! Codestrip CLI
//!
//! Applies an exclusion configuration to one or more source trees.

use anyhow::{Context, Result};
use clap::Parser;
use codestrip_core::{guard_root, ExclusionConfig, MatchMode, StripOptions};
use codestrip_engine::{Orchestrator, RunReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "codestrip")]
#[command(author, version, about = "Strip excluded features out of a source tree", long_about = None)]
struct Cli {
    /// Exclusion configuration (YAML)
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Source roots to operate on
    #[arg(value_name = "ROOT", default_value = ".")]
    roots: Vec<String>,

    /// Only match markers that open a line, on an identifier boundary,
    /// outside comments
    #[arg(long)]
    strict: bool,

    /// Process the files of each pass in parallel
    #[arg(long)]
    parallel: bool,

    /// Descend into symlinked directories
    #[arg(long)]
    follow_symlinks: bool,

    /// Report what would change without writing or deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Log every file touched
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();

    let outcome = run(&cli);
    match &outcome {
        Ok(report) => {
            for failure in &report.failures {
                error!("{}: {}", failure.path.display(), failure.error);
            }
        }
        Err(err) => error!("{:#}", err),
    }
    ExitCode::from(exit_code(&outcome))
}

/// 0 on success, 1 when the run finished with per-file failures, 2 when it
/// was refused before touching anything
fn exit_code(outcome: &Result<RunReport>) -> u8 {
    match outcome {
        Ok(report) if report.is_success() => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

fn run(cli: &Cli) -> Result<RunReport> {
    // Nothing may be touched before every root has passed the guard
    for root in &cli.roots {
        guard_root(root)?;
        if !PathBuf::from(root.trim()).is_dir() {
            anyhow::bail!("{} is not a directory", root);
        }
    }

    let config = ExclusionConfig::load_yaml(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    let options = StripOptions {
        match_mode: if cli.strict {
            MatchMode::Directive
        } else {
            MatchMode::Substring
        },
        parallel: cli.parallel,
        follow_symlinks: cli.follow_symlinks,
        dry_run: cli.dry_run,
    };
    let orchestrator = Orchestrator::new(config, options)?;

    let mut report = RunReport::default();
    for root in &cli.roots {
        report.merge(orchestrator.run(&PathBuf::from(root.trim())));
    }

    if orchestrator.options().dry_run {
        info!("Dry run: {}", report);
    } else {
        info!("Done: {}", report);
    }
    Ok(report)
}
