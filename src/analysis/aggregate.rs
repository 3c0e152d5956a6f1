//! Sample accumulation across runs.

use std::collections::BTreeMap;

use tracing::trace;

use crate::data::{Measurement, MeasurementLog, NAVIGATION_START};

use super::select::{resolve_path, visit_measurements, UnknownCategory};

/// Per-event start/end/duration samples pooled across every run.
///
/// The three maps always carry the same key set, and for any one key the
/// three vectors have the same length: `record` appends to all of them at
/// once.
#[derive(Debug, Clone, Default)]
pub struct EventSamples {
    /// Start times keyed by event name.
    pub start: BTreeMap<String, Vec<f64>>,
    /// End times keyed by event name.
    pub end: BTreeMap<String, Vec<f64>>,
    /// Durations (end minus start) keyed by event name.
    pub duration: BTreeMap<String, Vec<f64>>,
}

impl EventSamples {
    /// Record one observation of the event `name`.
    pub fn record(&mut self, name: &str, start: f64, end: f64) {
        self.start.entry(name.to_owned()).or_default().push(start);
        self.end.entry(name.to_owned()).or_default().push(end);
        self.duration
            .entry(name.to_owned())
            .or_default()
            .push(end - start);
    }

    /// Record a batch of measurements.
    pub fn add_measurements(&mut self, measurements: &[Measurement]) {
        for m in measurements {
            self.record(&m.name, m.start_time, m.response_end);
        }
    }

    /// Number of distinct event names recorded so far.
    pub fn len(&self) -> usize {
        self.duration.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.duration.is_empty()
    }
}

/// Navigation Timing milestone deltas pooled across runs.
///
/// Milestones are stored relative to their capture's `navigationStart`.
/// The baseline itself is never recorded, and neither are milestones that
/// did not occur (raw value zero or below).
#[derive(Debug, Clone, Default)]
pub struct NavigationSamples {
    /// Milestone deltas in milliseconds, keyed by milestone name.
    pub samples: BTreeMap<String, Vec<f64>>,
}

impl NavigationSamples {
    /// Fold one Navigation Timing capture into the pool.
    ///
    /// A capture without the `navigationStart` baseline records nothing;
    /// [`MeasurementLog::validate`] rejects such captures up front, so
    /// this only matters for hand-built maps.
    pub fn add_navigation(&mut self, capture: &BTreeMap<String, f64>) {
        let Some(&baseline) = capture.get(NAVIGATION_START) else {
            return;
        };
        for (milestone, &raw) in capture {
            if milestone == NAVIGATION_START || raw <= 0.0 {
                continue;
            }
            self.samples
                .entry(milestone.clone())
                .or_default()
                .push(raw - baseline);
        }
    }

    /// Number of distinct milestones recorded so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Pool event and navigation samples from every run of `log`.
///
/// With an empty `categories` list the whole of every run's tree is
/// aggregated. Otherwise each path is resolved from the run root and its
/// subtree aggregated, so one measurement list can contribute twice when
/// paths overlap. Navigation captures are read from run roots only and
/// are not affected by category selection.
pub fn aggregate_log(
    log: &MeasurementLog,
    categories: &[String],
) -> Result<(EventSamples, NavigationSamples), UnknownCategory> {
    let mut events = EventSamples::default();
    let mut navigation = NavigationSamples::default();

    for (run, root) in &log.runs {
        if let Some(capture) = &root.navigation {
            navigation.add_navigation(capture);
        }
        if categories.is_empty() {
            visit_measurements(root, &mut |batch| events.add_measurements(batch));
        } else {
            for path in categories {
                let node = resolve_path(root, path)?;
                visit_measurements(node, &mut |batch| events.add_measurements(batch));
            }
        }
        trace!(%run, events = events.len(), "aggregated run");
    }

    Ok((events, navigation))
}
