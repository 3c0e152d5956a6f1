//! Measurement-log schema and loading.
//!
//! A measurement log is a gzip-compressed JSON document produced by the
//! browser test harness: a map from run identifiers (epoch-millisecond
//! strings) to measurement trees. Every tree node carries a map of named
//! child categories and a list of resource measurements; run roots may
//! additionally carry one Navigation Timing capture.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

mod load;

pub use load::load_log;

/// Key of the Navigation Timing milestone every capture is rebased
/// against.
pub const NAVIGATION_START: &str = "navigationStart";

/// Errors produced while reading a measurement log.
#[derive(Debug, Error)]
pub enum DataError {
    /// The log file could not be opened or read.
    #[error("failed to read measurement log: {0}")]
    Io(#[from] std::io::Error),

    /// The log was not gzip-compressed JSON of the expected shape.
    #[error("malformed measurement log: {0}")]
    Json(#[from] serde_json::Error),

    /// A run's Navigation Timing capture lacks the `navigationStart`
    /// baseline, so its milestones cannot be rebased.
    #[error("run {run}: navigation timing capture has no navigationStart baseline")]
    MissingNavigationStart {
        /// Identifier of the offending run.
        run: String,
    },
}

/// One resource measurement: an event name with its observed start and
/// end times in milliseconds on the page's monotonic timeline.
///
/// Producers serialize the full Resource Timing entry; the extra fields
/// (entry type, initiator, DNS/TCP/TLS milestones and so on) are accepted
/// and ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Event name, usually the resource URL.
    pub name: String,
    /// When the event began.
    pub start_time: f64,
    /// When the event finished (the response-end milestone).
    pub response_end: f64,
}

/// One node of a measurement tree.
///
/// Producers always serialize both `categories` and `measurements`, but
/// either may be missing or empty in hand-written fixtures; both default
/// to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementNode {
    /// Named child categories.
    #[serde(default)]
    pub categories: BTreeMap<String, MeasurementNode>,
    /// Measurements recorded directly on this node.
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    /// Navigation Timing capture: raw milestone values in epoch
    /// milliseconds, zero when a milestone did not occur. Serialized as
    /// `null` on nodes without one; only run roots ever carry a capture
    /// in practice.
    #[serde(default)]
    pub navigation: Option<BTreeMap<String, f64>>,
}

/// A full measurement log: every run of the harness, keyed by the run's
/// epoch-millisecond identifier (kept as serialized, so iteration order
/// is the string order of the keys).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MeasurementLog {
    /// The runs of the log.
    pub runs: BTreeMap<String, MeasurementNode>,
}

impl MeasurementLog {
    /// Number of runs in the log.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether the log contains no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Check the invariants the pipeline relies on.
    ///
    /// Currently one: a run that carries a Navigation Timing capture must
    /// include the `navigationStart` baseline. `load_log` calls this, so
    /// a loaded log is always valid.
    pub fn validate(&self) -> Result<(), DataError> {
        for (run, root) in &self.runs {
            if let Some(navigation) = &root.navigation {
                if !navigation.contains_key(NAVIGATION_START) {
                    return Err(DataError::MissingNavigationStart { run: run.clone() });
                }
            }
        }
        Ok(())
    }
}
