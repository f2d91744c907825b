//! frame-probe
//!
//! Screenshot analysis from the command line:
//! - `analyze` prints metrics (and issues) for a PNG or a directory of PNGs
//! - `compare` prints signed differences between two PNGs
//! - `serve` exposes the same operations as MCP tools over stdio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use frame_probe_analysis::{AnalysisConfig, PathAnalysis, analyze_path, compare};
use frame_probe_server::FrameProbeServer;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod output;

#[derive(Debug, Parser)]
#[command(name = "frame-probe", version, about = "PNG screenshot analysis")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file with diagnosis thresholds and worker count
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a PNG file or every PNG in a directory
    Analyze {
        path: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Include issues in JSON output
        #[arg(long)]
        diagnose: bool,
    },
    /// Compare two PNG files (differences are B - A)
    Compare {
        a: PathBuf,
        b: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the MCP server on stdio
    Serve,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AnalysisConfig> {
    let config = match path {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?
            .with_overrides(|key| std::env::var(key).ok()),
        None => AnalysisConfig::from_env(),
    };
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Analyze {
            path,
            json,
            diagnose,
        } => {
            match analyze_path(&path, config.workers).await? {
                PathAnalysis::Directory(outcome) => {
                    info!(
                        "Analyzed {} files, skipped {}",
                        outcome.metrics.len(),
                        outcome.skipped.len()
                    );
                    if json {
                        let reports = output::reports_json(&outcome.metrics, diagnose, &config);
                        println!("{}", serde_json::to_string_pretty(&reports)?);
                    } else {
                        print!("{}", output::directory_text(&outcome.metrics, &config));
                    }
                }
                PathAnalysis::File(metrics) => {
                    if json {
                        let report = output::report_json(&metrics, diagnose, &config);
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    } else {
                        print!("{}", output::metrics_text(&metrics, &config));
                    }
                }
            }
        }
        Command::Compare { a, b, json } => {
            let result = compare(&a, &b)?;
            if json {
                let report = frame_probe_core::ComparisonReport::from(&result);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", output::comparison_text(&result));
            }
        }
        Command::Serve => {
            FrameProbeServer::new(config).run_stdio().await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
