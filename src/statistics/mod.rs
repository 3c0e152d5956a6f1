//! Scalar statistics over timing samples.
//!
//! Everything here operates on plain `f64` sample vectors. Quantiles use
//! linear interpolation between order statistics (estimator R-7 in
//! Hyndman & Fan 1996, the default of the charting stacks these reports
//! get compared against), and standard deviations are population standard
//! deviations (the `n` denominator, not `n - 1`).
//!
//! # Reference
//!
//! Hyndman, R. J. & Fan, Y. (1996). "Sample quantiles in statistical
//! packages." The American Statistician 50(4):361–365.

mod outlier;

pub use outlier::{reject_outliers, DEFAULT_SIGMA};

/// Arithmetic mean of `samples`.
///
/// # Panics
///
/// Panics if `samples` is empty.
pub fn mean(samples: &[f64]) -> f64 {
    assert!(!samples.is_empty(), "Cannot compute mean of empty slice");
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation of `samples`.
///
/// Uses the `n` denominator, so the deviation of a single sample is zero.
///
/// # Panics
///
/// Panics if `samples` is empty.
pub fn std_dev(samples: &[f64]) -> f64 {
    assert!(
        !samples.is_empty(),
        "Cannot compute standard deviation of empty slice"
    );
    let center = mean(samples);
    let variance = samples
        .iter()
        .map(|x| {
            let d = x - center;
            d * d
        })
        .sum::<f64>()
        / samples.len() as f64;
    variance.sqrt()
}

/// Compute a quantile of a pre-sorted sample by linear interpolation.
///
/// Uses the R-7 definition (for sorted sample x of size n at probability p):
/// ```text
/// h = (n - 1) * p
/// q = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
/// ```
///
/// # Arguments
///
/// * `sorted` - Sample values, sorted ascending (not verified)
/// * `p` - Quantile probability in [0, 1]
///
/// # Panics
///
/// Panics if `sorted` is empty or if `p` is outside [0, 1].
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Median of `samples` (R-7, so the average of the two middle order
/// statistics when the count is even).
///
/// # Panics
///
/// Panics if `samples` is empty.
pub fn median(samples: &[f64]) -> f64 {
    assert!(!samples.is_empty(), "Cannot compute median of empty slice");
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    quantile_sorted(&sorted, 0.5)
}

/// Box-plot summary of one sample vector.
///
/// The whisker fields follow the conventional reach rule: with reach `r`,
/// each whisker sits on the farthest sample still within `r` interquartile
/// ranges of its box edge, and everything beyond the whiskers is a flier.
/// A reach of zero pins both whiskers to the quartiles, so every sample
/// outside the box becomes a flier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    /// First quartile (box bottom).
    pub q1: f64,
    /// Median (the line across the box).
    pub median: f64,
    /// Third quartile (box top).
    pub q3: f64,
    /// Lowest sample at or above `q1 - reach * iqr`.
    pub whisker_low: f64,
    /// Highest sample at or below `q3 + reach * iqr`.
    pub whisker_high: f64,
    /// Samples outside the whisker bounds, ascending.
    pub fliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarize `samples` with the given whisker reach.
    ///
    /// Returns `None` for an empty sample vector (an aggressively filtered
    /// series can end up empty; its chart position stays blank).
    ///
    /// # Panics
    ///
    /// Panics if `reach` is negative.
    pub fn from_samples(samples: &[f64], reach: f64) -> Option<Self> {
        assert!(reach >= 0.0, "Whisker reach must not be negative");
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable_by(|a, b| a.total_cmp(b));

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_bound = q1 - reach * iqr;
        let high_bound = q3 + reach * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|v| *v >= low_bound)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_bound)
            .unwrap_or(q3);
        let fliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_bound || *v > high_bound)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_small_sample() {
        let samples = vec![1.0, 2.0, 3.0, 4.0];
        assert!((mean(&samples) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn std_dev_is_population() {
        // Classic textbook sample: population sigma is exactly 2,
        // the n-1 estimator would give ~2.138.
        let samples = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_dev(&samples) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn std_dev_of_single_sample_is_zero() {
        assert_eq!(std_dev(&[42.0]), 0.0);
    }

    #[test]
    fn median_odd_picks_middle() {
        assert!((median(&[5.0, 1.0, 3.0]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn median_even_averages_middles() {
        // R-7 at p = 0.5 with n = 4: h = 1.5, so (x[1] + x[2]) / 2.
        assert!((median(&[4.0, 1.0, 3.0, 2.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        // n = 4: h = 3 * 0.25 = 0.75, so q1 = 1 + 0.75 * (2 - 1) = 1.75.
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert!((quantile_sorted(&sorted, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.75) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn quantile_extremes_hit_min_and_max() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&sorted, 0.0), 1.0);
        assert_eq!(quantile_sorted(&sorted, 1.0), 5.0);
    }

    #[test]
    fn quantile_single_sample() {
        assert_eq!(quantile_sorted(&[7.5], 0.3), 7.5);
    }

    #[test]
    #[should_panic(expected = "Cannot compute median of empty slice")]
    fn median_of_empty_panics() {
        median(&[]);
    }

    #[test]
    #[should_panic(expected = "Quantile probability must be in [0, 1]")]
    fn quantile_rejects_bad_probability() {
        quantile_sorted(&[1.0], 1.5);
    }

    #[test]
    fn box_summary_zero_reach_pins_whiskers() {
        // Quartiles of 1..=5 under R-7: q1 = 2, median = 3, q3 = 4.
        let summary = BoxSummary::from_samples(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.0).unwrap();
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.whisker_low, 2.0);
        assert_eq!(summary.whisker_high, 4.0);
        assert_eq!(summary.fliers, vec![1.0, 5.0]);
    }

    #[test]
    fn box_summary_wide_reach_keeps_near_samples() {
        let summary = BoxSummary::from_samples(&[1.0, 2.0, 3.0, 4.0, 100.0], 1.5).unwrap();
        // With q3 = 4 and a 1.5-iqr reach, the high bound stays far below
        // 100, so it remains a flier while 1 is now inside the whisker.
        assert_eq!(summary.fliers, vec![100.0]);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 4.0);

        let summary = BoxSummary::from_samples(&[1.0, 2.0, 3.0, 4.0, 5.0], 10.0).unwrap();
        assert!(summary.fliers.is_empty());
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 5.0);
    }

    #[test]
    fn box_summary_empty_is_none() {
        assert!(BoxSummary::from_samples(&[], 0.0).is_none());
    }

    #[test]
    fn box_summary_constant_sample_is_degenerate() {
        let summary = BoxSummary::from_samples(&[3.0; 8], 0.0).unwrap();
        assert_eq!(summary.q1, 3.0);
        assert_eq!(summary.q3, 3.0);
        assert!(summary.fliers.is_empty());
    }
}
