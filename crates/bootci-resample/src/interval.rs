//! Percentile confidence intervals.

use serde::{Deserialize, Serialize};

use crate::{InvalidProbabilityError, distribution::BootstrapDistribution, quantile};

/// A percentile bootstrap confidence interval.
///
/// For a confidence `level`, the bounds are the `(1 − level) / 2` and
/// `(1 + level) / 2` quantiles of the bootstrap distribution, and `median` is its 0.5
/// quantile. All three are NaN when the distribution is empty.
///
/// # Examples
///
/// ```
/// use bootci_resample::{distribution::BootstrapDistribution, interval::PercentileInterval};
///
/// let mut distribution = BootstrapDistribution::new();
/// distribution.extend((0..=100).map(f64::from));
///
/// let interval = PercentileInterval::from_distribution(&distribution, 0.5).unwrap();
/// assert_eq!(interval.lower, 25.0);
/// assert_eq!(interval.median, 50.0);
/// assert_eq!(interval.upper, 75.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileInterval {
    /// Confidence level in `[0.0, 1.0]`.
    pub level: f64,
    pub lower: f64,
    pub median: f64,
    pub upper: f64,
}

impl PercentileInterval {
    /// Reads the interval at `level` from a distribution.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidProbabilityError`] if `level` is outside `[0.0, 1.0]` or NaN.
    pub fn from_distribution(
        distribution: &BootstrapDistribution,
        level: f64,
    ) -> Result<Self, InvalidProbabilityError> {
        let level = quantile::validate_probability(level)?;
        let tail = (1.0 - level) / 2.0;
        Ok(Self {
            level,
            lower: distribution.quantile(tail)?,
            median: distribution.quantile(0.5)?,
            upper: distribution.quantile(1.0 - tail)?,
        })
    }

    /// Returns `upper − lower`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns `true` if `value` lies within the bounds (inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distribution(values: impl IntoIterator<Item = f64>) -> BootstrapDistribution {
        let mut d = BootstrapDistribution::new();
        d.extend(values);
        d
    }

    #[test]
    fn test_full_level_spans_extremes() {
        let d = distribution([4.0, -2.0, 9.0, 1.0]);
        let interval = PercentileInterval::from_distribution(&d, 1.0).unwrap();
        assert_eq!(interval.lower, -2.0);
        assert_eq!(interval.upper, 9.0);
        assert_eq!(interval.width(), 11.0);
    }

    #[test]
    fn test_zero_level_collapses_to_median() {
        let d = distribution((0..=10).map(f64::from));
        let interval = PercentileInterval::from_distribution(&d, 0.0).unwrap();
        assert_eq!(interval.lower, 5.0);
        assert_eq!(interval.median, 5.0);
        assert_eq!(interval.upper, 5.0);
    }

    #[test]
    fn test_empty_distribution_is_nan() {
        let interval =
            PercentileInterval::from_distribution(&BootstrapDistribution::new(), 0.95).unwrap();
        assert!(interval.lower.is_nan());
        assert!(interval.median.is_nan());
        assert!(interval.upper.is_nan());
        assert!(!interval.contains(0.0));
    }

    #[test]
    fn test_invalid_level_rejected() {
        let d = distribution([1.0]);
        assert!(PercentileInterval::from_distribution(&d, 1.5).is_err());
        assert!(PercentileInterval::from_distribution(&d, -0.1).is_err());
    }

    #[test]
    fn test_contains() {
        let d = distribution((0..=100).map(f64::from));
        let interval = PercentileInterval::from_distribution(&d, 0.5).unwrap();
        assert!(interval.contains(50.0));
        assert!(interval.contains(interval.lower));
        assert!(!interval.contains(100.0));
    }

    #[test]
    fn test_serialize_field_names() {
        let d = distribution([1.0, 2.0, 3.0]);
        let interval = PercentileInterval::from_distribution(&d, 1.0).unwrap();
        let json = serde_json::to_value(interval).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "level": 1.0, "lower": 1.0, "median": 2.0, "upper": 3.0 })
        );
    }
}
