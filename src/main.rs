//! Command-line entry point for the perfgraph report generator.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use perfgraph::{run, Config};

/// Render box-plot PDF reports from a gzip-compressed measurement log.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Comma-separated category paths to include, e.g. "firefox/cold,firefox/warm".
    /// An empty string selects every measurement in each run.
    categories: String,

    /// Path of the gzip-compressed JSON measurement log.
    input: PathBuf,

    /// Directory the five PDF reports are written into.
    output: PathBuf,

    /// Upper bound of the y axis on the duration and navigation charts,
    /// in milliseconds. 0 lets each chart scale to its own data.
    ylimit: f64,

    /// Any value above 0 drops samples more than two standard deviations
    /// from the mean of their event series.
    outlier: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config {
        categories: Config::parse_categories(&cli.categories),
        input: cli.input,
        output: cli.output,
        y_limit: cli.ylimit,
        outlier: cli.outlier,
    };
    config.validate().map_err(|reason| anyhow::anyhow!(reason))?;

    let summary = run(&config)
        .with_context(|| format!("generating reports from {}", config.input.display()))?;

    info!(
        runs = summary.runs,
        events = summary.events,
        milestones = summary.milestones,
        reports = summary.files.len(),
        "done"
    );
    Ok(())
}
