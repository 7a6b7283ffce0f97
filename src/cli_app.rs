//! Top-level CLI definition and dispatch.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell as CompletionShell, generate};
use colored::Colorize;
use colored::control;
use serde_json::{Value, json};
use thiserror::Error;

use distclean::core::config::Config;
use distclean::core::errors::DistcleanError;
use distclean::core::paths::resolve_absolute_path;
use distclean::sweep::{SweepConfig, SweepEvent, SweepReport, Sweeper};

/// distclean — sweeps files with forbidden name fragments out of dist trees.
#[derive(Debug, Parser)]
#[command(
    name = "distclean",
    author,
    version,
    about = "Remove files with forbidden name fragments from the dist folder",
    long_about = None
)]
pub struct Cli {
    /// Directory to sweep. Defaults to ./dist; the nested pass covers its esm child.
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// Override config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report what would be removed without deleting anything.
    #[arg(long)]
    dry_run: bool,

    /// Force JSON output mode.
    #[arg(long)]
    json: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,

    /// Add scan diagnostics to the output.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress confirmations and the summary; deletion errors still print.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Generate shell completions and exit.
    #[arg(long, value_name = "SHELL")]
    completions: Option<CompletionShell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
///
/// A sweep itself never produces one of these: missing roots and failed
/// deletions are reported in the output and exit 0. Errors here come from
/// the surface around the sweep (flags, config, output serialization).
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input or configuration.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// Internal bug or invariant violation.
    #[error("{0}")]
    Internal(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Internal(_) | Self::Json(_) => 3,
        }
    }
}

/// Dispatch the parsed invocation.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        let binary_name = command.get_name().to_string();
        generate(shell, &mut command, binary_name, &mut io::stdout());
        return Ok(());
    }

    run_clean(cli)
}

fn run_clean(cli: &Cli) -> Result<(), CliError> {
    let mut config = Config::load(cli.config.as_deref()).map_err(config_error)?;

    if let Some(root) = &cli.root {
        config.cleaner.root_dir = root.clone();
    }
    if cli.dry_run {
        config.cleaner.dry_run = true;
    }

    let mode = output_mode(cli);
    let dry_run = config.cleaner.dry_run;

    if cli.verbose && mode == OutputMode::Human {
        let hash = config.stable_hash().map_err(config_error)?;
        println!(
            "{}",
            format!("distclean {} (config {hash})", env!("CARGO_PKG_VERSION")).dimmed()
        );
        println!(
            "{}",
            format!(
                "root: {}",
                resolve_absolute_path(&config.cleaner.root_dir).display()
            )
            .dimmed()
        );
        println!(
            "{}",
            format!("needles: {}", config.patterns.forbidden.join(", ")).dimmed()
        );
    }

    let sweeper = Sweeper::new(SweepConfig::from_config(&config));

    let report = match mode {
        OutputMode::Human => {
            let mut on_event =
                |event: &SweepEvent| print_event(event, dry_run, cli.quiet, cli.verbose);
            sweeper.clean(Some(&mut on_event))
        }
        OutputMode::Json => sweeper.clean(None),
    };

    match mode {
        OutputMode::Human => {
            // A missing root ends at the not-found notice; no summary.
            if report.root_found && !cli.quiet {
                println!();
                let total = report.total_removed();
                if dry_run {
                    println!("Would clean {total} files from dist folder");
                } else {
                    println!("Cleaned {total} files from dist folder");
                }
                if cli.verbose {
                    println!(
                        "{}",
                        format!(
                            "scanned {} files, {} failures, took {:?}",
                            report.files_scanned,
                            report.failures.len(),
                            report.duration
                        )
                        .dimmed()
                    );
                }
            }
        }
        OutputMode::Json => {
            write_json_line(&clean_payload(&report))?;
        }
    }

    Ok(())
}

fn print_event(event: &SweepEvent, dry_run: bool, quiet: bool, verbose: bool) {
    match event {
        SweepEvent::RootMissing { .. } => {
            if !quiet {
                println!("Dist folder not found");
            }
        }
        SweepEvent::PassStarted { root } => {
            if verbose {
                println!("{}", format!("Sweeping {}", root.display()).dimmed());
            }
        }
        SweepEvent::Removed { path, needle } => {
            if quiet {
                return;
            }
            if dry_run {
                println!("Would remove: {}", path.display());
            } else {
                println!("Removed: {}", path.display());
            }
            if verbose {
                println!("{}", format!("  matched needle: {needle}").dimmed());
            }
        }
        // Deletion errors print even under --quiet, and to stdout with the
        // rest of the output.
        SweepEvent::Failed { path, error } => {
            println!("Error removing {}: {error}", path.display());
        }
    }
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn clean_payload(report: &SweepReport) -> Value {
    let removed: Vec<String> = report
        .removed
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    let failures: Vec<Value> = report
        .failures
        .iter()
        .map(|failure| {
            json!({
                "path": failure.path.display().to_string(),
                "error": failure.error,
            })
        })
        .collect();

    json!({
        "command": "clean",
        "root": resolve_absolute_path(&report.root).display().to_string(),
        "root_found": report.root_found,
        "dry_run": report.dry_run,
        "removed": removed,
        "failures": failures,
        "files_scanned": report.files_scanned,
        "total_removed": report.total_removed(),
        "duration_ms": u64::try_from(report.duration.as_millis()).unwrap_or(u64::MAX),
    })
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("DISTCLEAN_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    // No tty sniffing: scripted callers rely on the plain human lines, so
    // JSON is strictly opt-in.
    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        _ => OutputMode::Human,
    }
}

fn config_error(error: DistcleanError) -> CliError {
    match error {
        DistcleanError::InvalidConfig { .. }
        | DistcleanError::MissingConfig { .. }
        | DistcleanError::ConfigParse { .. } => CliError::User(error.to_string()),
        DistcleanError::Io { .. } => CliError::Runtime(error.to_string()),
        DistcleanError::Serialization { .. } => CliError::Internal(error.to_string()),
    }
}
