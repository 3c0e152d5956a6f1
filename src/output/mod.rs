//! Report emission.
//!
//! This module renders the five PDF report files:
//! - Box-plot charts: event starts, event ends, event durations, and
//!   navigation timing deltas
//! - The legend table mapping chart ids back to event names
//!
//! File names are fixed; only the target directory varies.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::analysis::{Legend, RankedNavigation, RankedSeries};

mod boxplot;
mod pdf;
mod table;

use boxplot::{Figure, TickLabels};

/// File name of the event start-times chart.
pub const BEGINNING_FILE: &str = "beginning.pdf";
/// File name of the event end-times chart.
pub const END_FILE: &str = "end.pdf";
/// File name of the event durations chart.
pub const DURATION_FILE: &str = "duration.pdf";
/// File name of the navigation-timing chart.
pub const NAVIGATION_FILE: &str = "navigation.pdf";
/// File name of the legend table.
pub const LEGEND_FILE: &str = "legend.pdf";

/// The five report files, in the order they are written.
pub const REPORT_FILES: [&str; 5] = [
    BEGINNING_FILE,
    END_FILE,
    DURATION_FILE,
    NAVIGATION_FILE,
    LEGEND_FILE,
];

const Y_AXIS_LABEL: &str = "Time (msec)";
const EVENT_AXIS_LABEL: &str = "Event ID (see legend)";

/// Errors produced while writing report files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A report file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path of the file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Write the five report PDFs into `directory` and return their paths in
/// write order.
///
/// The y limit applies to the duration and navigation charts only; the
/// start and end charts always autoscale (their values sit on the page
/// timeline, far from the duration scale).
pub fn render_reports(
    directory: &Path,
    events: &RankedSeries,
    legend: &Legend,
    navigation: &RankedNavigation,
    navigation_legend: &Legend,
    y_limit: Option<f64>,
) -> Result<Vec<PathBuf>, OutputError> {
    let charts: [(&str, Figure<'_>, &[Vec<f64>]); 4] = [
        (
            BEGINNING_FILE,
            Figure {
                title: "Beginning of Events",
                x_label: EVENT_AXIS_LABEL,
                y_label: Y_AXIS_LABEL,
                y_limit: None,
                ticks: TickLabels::Position,
            },
            &events.start,
        ),
        (
            END_FILE,
            Figure {
                title: "End of Events",
                x_label: EVENT_AXIS_LABEL,
                y_label: Y_AXIS_LABEL,
                y_limit: None,
                ticks: TickLabels::Position,
            },
            &events.end,
        ),
        (
            DURATION_FILE,
            Figure {
                title: "Duration of Events",
                x_label: EVENT_AXIS_LABEL,
                y_label: Y_AXIS_LABEL,
                y_limit,
                ticks: TickLabels::Position,
            },
            &events.duration,
        ),
        (
            NAVIGATION_FILE,
            Figure {
                title: "Navigation Timing API",
                x_label: "Event",
                y_label: Y_AXIS_LABEL,
                y_limit,
                ticks: TickLabels::Names(navigation_legend.names()),
            },
            navigation,
        ),
    ];

    let mut written = Vec::with_capacity(REPORT_FILES.len());
    for (file, figure, series) in &charts {
        written.push(write_report(directory, file, &boxplot::render(figure, series))?);
    }
    written.push(write_report(directory, LEGEND_FILE, &table::render(legend))?);

    info!(
        directory = %directory.display(),
        files = written.len(),
        "wrote report files"
    );
    Ok(written)
}

fn write_report(directory: &Path, file: &str, bytes: &[u8]) -> Result<PathBuf, OutputError> {
    let path = directory.join(file);
    fs::write(&path, bytes).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn writes_all_five_files() {
        let dir = TempDir::new().expect("create temp dir");
        let events = RankedSeries {
            start: vec![vec![1.0, 2.0]],
            end: vec![vec![3.0, 4.0]],
            duration: vec![vec![2.0, 2.0]],
        };
        let legend = Legend::new(0, vec!["app.js".to_owned()]);
        let navigation = vec![vec![80.0, 90.0]];
        let navigation_legend = Legend::new(1, vec!["responseStart".to_owned()]);

        let written = render_reports(
            dir.path(),
            &events,
            &legend,
            &navigation,
            &navigation_legend,
            Some(400.0),
        )
        .expect("reports should render");

        assert_eq!(written.len(), 5);
        for (path, name) in written.iter().zip(REPORT_FILES) {
            assert_eq!(path, &dir.path().join(name));
            let bytes = fs::read(path).expect("report file exists");
            assert!(bytes.starts_with(b"%PDF-"), "{name} is not a PDF");
        }
    }

    #[test]
    fn empty_input_still_produces_reports() {
        let dir = TempDir::new().expect("create temp dir");
        let written = render_reports(
            dir.path(),
            &RankedSeries::default(),
            &Legend::new(0, Vec::new()),
            &Vec::new(),
            &Legend::new(1, Vec::new()),
            None,
        )
        .expect("reports should render");
        assert_eq!(written.len(), 5);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = TempDir::new().expect("create temp dir");
        let gone = dir.path().join("missing");
        let err = render_reports(
            &gone,
            &RankedSeries::default(),
            &Legend::new(0, Vec::new()),
            &Vec::new(),
            &Legend::new(1, Vec::new()),
            None,
        )
        .unwrap_err();
        let OutputError::Io { path, .. } = err;
        assert_eq!(path, gone.join(BEGINNING_FILE));
    }
}
