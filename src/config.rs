//! Runtime configuration for a report run.

use std::path::PathBuf;

use crate::statistics::DEFAULT_SIGMA;

/// Fully resolved settings for one report run.
///
/// The binary builds this from its positional arguments; library callers
/// can fill it directly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Category paths to aggregate. Each path descends the category tree
    /// with `/` separators, e.g. `firefox/cold`. An empty list selects
    /// every measurement in every run.
    pub categories: Vec<String>,

    /// Path of the gzip-compressed JSON measurement log to read.
    pub input: PathBuf,

    /// Directory that receives the five report files. Must already
    /// exist; files with the fixed report names are overwritten.
    pub output: PathBuf,

    /// Upper bound of the duration and navigation y axes, in
    /// milliseconds. Zero disables the bound (the axes autoscale).
    pub y_limit: f64,

    /// Outlier rejection switch. Any positive value enables rejection at
    /// the fixed [`DEFAULT_SIGMA`] threshold; the magnitude is *not*
    /// used as the threshold. Zero keeps every sample.
    pub outlier: u32,
}

impl Config {
    /// Split a comma-separated category argument into paths.
    ///
    /// The empty string selects the whole tree, so it yields no paths.
    pub fn parse_categories(raw: &str) -> Vec<String> {
        if raw.is_empty() {
            Vec::new()
        } else {
            raw.split(',').map(str::to_owned).collect()
        }
    }

    /// The rejection threshold to apply, if any.
    ///
    /// Always `Some(DEFAULT_SIGMA)` when `outlier` is positive; the
    /// `outlier` value itself never becomes the threshold.
    pub fn outlier_sigma(&self) -> Option<f64> {
        (self.outlier > 0).then_some(DEFAULT_SIGMA)
    }

    /// The y-axis bound to apply, if any.
    pub fn y_bound(&self) -> Option<f64> {
        (self.y_limit > 0.0).then_some(self.y_limit)
    }

    /// Check the settings for values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if !self.y_limit.is_finite() {
            return Err(format!("y limit must be finite, got {}", self.y_limit));
        }
        if self.y_limit < 0.0 {
            return Err(format!("y limit must not be negative, got {}", self.y_limit));
        }
        if self.categories.iter().any(String::is_empty) {
            return Err("category paths must not be empty".to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            categories: Vec::new(),
            input: PathBuf::from("measurements.json.gz"),
            output: PathBuf::from("reports"),
            y_limit: 0.0,
            outlier: 0,
        }
    }

    #[test]
    fn empty_category_argument_selects_everything() {
        assert!(Config::parse_categories("").is_empty());
    }

    #[test]
    fn category_argument_splits_on_commas() {
        assert_eq!(
            Config::parse_categories("firefox/cold,chrome"),
            vec!["firefox/cold".to_owned(), "chrome".to_owned()]
        );
    }

    #[test]
    fn outlier_magnitude_is_only_a_switch() {
        let mut config = config();
        assert_eq!(config.outlier_sigma(), None);
        config.outlier = 1;
        assert_eq!(config.outlier_sigma(), Some(DEFAULT_SIGMA));
        // A larger value still selects the same fixed threshold.
        config.outlier = 7;
        assert_eq!(config.outlier_sigma(), Some(DEFAULT_SIGMA));
    }

    #[test]
    fn zero_y_limit_means_autoscale() {
        let mut config = config();
        assert_eq!(config.y_bound(), None);
        config.y_limit = 400.0;
        assert_eq!(config.y_bound(), Some(400.0));
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_y_limit() {
        let mut config = config();
        config.y_limit = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_finite_y_limit() {
        let mut config = config();
        config.y_limit = f64::NAN;
        assert!(config.validate().is_err());
        config.y_limit = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_category_path() {
        let mut config = config();
        config.categories = Config::parse_categories("firefox,,chrome");
        assert!(config.validate().is_err());
    }
}
