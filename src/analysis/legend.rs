//! Median-ranked legends and index-keyed series.
//!
//! Charts plot series at integer positions, not by name; the legend is
//! the mapping back from those positions to event names. Ranking by
//! median keeps the interesting (slow) events at the same end of every
//! chart.

use crate::statistics::{median, reject_outliers};

use super::aggregate::{EventSamples, NavigationSamples};

/// Mapping from chart indices to event names.
///
/// Indices are contiguous from `base`. The event legend starts at 0 and
/// is shifted to 1-based ids when printed (legend table rows and chart x
/// ticks both show `index + 1`); the navigation legend starts at 1, so
/// its indices are the chart positions directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    base: usize,
    names: Vec<String>,
}

impl Legend {
    /// Build a legend over `names`, indexed contiguously from `base`.
    pub fn new(base: usize, names: Vec<String>) -> Self {
        Self { base, names }
    }

    /// First index of the legend.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the legend has no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name behind `index`, if it is in range.
    pub fn name(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(self.base)
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// Names in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate `(index, name)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (self.base + i, name.as_str()))
    }
}

/// The three event sample series re-keyed by legend index.
///
/// Position `i` of each vector holds the samples of the event at legend
/// index `i`; the three vectors always have the legend's length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedSeries {
    /// Start-time samples per legend index.
    pub start: Vec<Vec<f64>>,
    /// End-time samples per legend index.
    pub end: Vec<Vec<f64>>,
    /// Duration samples per legend index.
    pub duration: Vec<Vec<f64>>,
}

impl RankedSeries {
    /// Drop outliers beyond `sigma` standard deviations from every
    /// series.
    ///
    /// Applies [`reject_outliers`] to each start, end, and duration
    /// vector independently. Legend order is untouched, so a chart keeps
    /// its position even if filtering empties the series behind it.
    pub fn reject_outliers(&mut self, sigma: f64) {
        for series in self
            .start
            .iter_mut()
            .chain(self.end.iter_mut())
            .chain(self.duration.iter_mut())
        {
            *series = reject_outliers(series, sigma);
        }
    }
}

/// Navigation milestone series re-keyed by legend index. The legend base
/// is 1, so position `i` holds the samples of index `i + 1`.
pub type RankedNavigation = Vec<Vec<f64>>;

/// Order names by their median sample, ascending, ties broken by name.
fn rank_by_median<'a>(
    series: impl Iterator<Item = (&'a String, &'a Vec<f64>)>,
) -> Vec<String> {
    let mut order: Vec<(f64, &String)> = series
        .map(|(name, samples)| (median(samples), name))
        .collect();
    order.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    order.into_iter().map(|(_, name)| name.clone()).collect()
}

/// Rank events by median duration and re-key their samples.
///
/// Events are sorted by ascending median duration (never by the filtered
/// data: ranking happens before any outlier rejection) and assigned
/// contiguous indices from 0.
pub fn build_event_legend(samples: EventSamples) -> (Legend, RankedSeries) {
    let EventSamples {
        mut start,
        mut end,
        mut duration,
    } = samples;

    let names = rank_by_median(duration.iter());

    let mut ranked = RankedSeries::default();
    for name in &names {
        ranked.start.push(start.remove(name).unwrap_or_default());
        ranked.end.push(end.remove(name).unwrap_or_default());
        ranked
            .duration
            .push(duration.remove(name).unwrap_or_default());
    }

    (Legend::new(0, names), ranked)
}

/// Rank navigation milestones by median delta and re-key their samples.
///
/// Same ordering rules as the event legend, but indices start at 1.
pub fn build_navigation_legend(samples: NavigationSamples) -> (Legend, RankedNavigation) {
    let mut pool = samples.samples;

    let names = rank_by_median(pool.iter());

    let ranked = names
        .iter()
        .map(|name| pool.remove(name).unwrap_or_default())
        .collect();

    (Legend::new(1, names), ranked)
}
