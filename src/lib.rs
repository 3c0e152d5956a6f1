//! # perfgraph
//!
//! Box-plot PDF reports from browser performance measurement logs.
//!
//! A measurement log is a gzip-compressed JSON document produced by a
//! browser test harness: a map from run timestamps to trees of named
//! categories, each carrying resource measurements (name, start time,
//! end time) and optionally one Navigation Timing capture per run. This
//! crate pools those samples across runs, ranks events by median, and
//! renders five PDF files into an output directory:
//!
//! - `beginning.pdf` - box plots of event start times
//! - `end.pdf` - box plots of event end times
//! - `duration.pdf` - box plots of event durations
//! - `navigation.pdf` - box plots of Navigation Timing milestone deltas
//! - `legend.pdf` - the id-to-event-name table behind the chart ids
//!
//! ## Quick Start
//!
//! ```ignore
//! use perfgraph::{run, Config};
//!
//! let config = Config {
//!     categories: Config::parse_categories("firefox/cold"),
//!     input: "measurements.json.gz".into(),
//!     output: "reports".into(),
//!     y_limit: 0.0,
//!     outlier: 1,
//! };
//! let summary = run(&config)?;
//! println!("{} events across {} runs", summary.events, summary.runs);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod data;
pub mod output;
pub mod statistics;

pub use analysis::UnknownCategory;
pub use config::Config;
pub use data::DataError;
pub use output::OutputError;

use std::path::PathBuf;

use tracing::info;

/// Any failure of the report pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or decoding the measurement log failed.
    #[error(transparent)]
    Data(#[from] DataError),
    /// A requested category path does not exist.
    #[error(transparent)]
    Category(#[from] UnknownCategory),
    /// Writing a report file failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Runs found in the log.
    pub runs: usize,
    /// Distinct events charted.
    pub events: usize,
    /// Distinct navigation milestones charted.
    pub milestones: usize,
    /// Paths of the written report files, in write order.
    pub files: Vec<PathBuf>,
}

/// Execute the whole pipeline: load, aggregate, rank, filter, render.
///
/// Outlier rejection, when enabled, runs after the legends are built, so
/// legend order always reflects the unfiltered medians; it applies to
/// the three event series only, never to navigation deltas.
pub fn run(config: &Config) -> Result<Summary, Error> {
    let log = data::load_log(&config.input)?;
    info!(runs = log.len(), input = %config.input.display(), "loaded measurement log");

    let (events, navigation) = analysis::aggregate_log(&log, &config.categories)?;
    let (legend, mut ranked) = analysis::build_event_legend(events);
    let (navigation_legend, navigation_ranked) = analysis::build_navigation_legend(navigation);
    info!(
        events = legend.len(),
        milestones = navigation_legend.len(),
        "aggregated samples"
    );

    if let Some(sigma) = config.outlier_sigma() {
        ranked.reject_outliers(sigma);
        info!(sigma, "rejected outliers");
    }

    let files = output::render_reports(
        &config.output,
        &ranked,
        &legend,
        &navigation_ranked,
        &navigation_legend,
        config.y_bound(),
    )?;

    Ok(Summary {
        runs: log.len(),
        events: legend.len(),
        milestones: navigation_legend.len(),
        files,
    })
}
