//! Standard-deviation outlier rejection.

use super::{mean, std_dev};

/// Threshold the report pipeline always filters at, in population
/// standard deviations.
///
/// The CLI's outlier argument only switches filtering on or off; the
/// threshold itself is this constant, not the argument's value.
pub const DEFAULT_SIGMA: f64 = 2.0;

/// Keep the samples strictly within `sigma` standard deviations of the
/// mean.
///
/// The bound uses the population standard deviation of `samples` and a
/// strict inequality, so a sample exactly on the boundary is dropped.
/// When every sample is identical the deviation is zero and nothing
/// survives the strict bound; the result is empty. An empty input stays
/// empty.
pub fn reject_outliers(samples: &[f64], sigma: f64) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }
    let center = mean(samples);
    let bound = sigma * std_dev(samples);
    samples
        .iter()
        .copied()
        .filter(|v| (v - center).abs() < bound)
        .collect()
}
