//! Aggregators: statistics that reduce a sequence of numbers to one number.
//!
//! An [`Aggregator`] is the statistic whose sampling distribution a resampler
//! estimates. The crate ships three variants:
//!
//! - [`Sum`] - naive left-to-right sum (`0.0` for empty input)
//! - [`Average`] - arithmetic mean (`0.0` for empty input)
//! - [`Quantile`] - nearest-rank quantile (`NaN` for empty input)
//!
//! User-defined statistics plug in by implementing the trait, or by wrapping a
//! closure in [`FnAggregator`].
//!
//! # Input mutation
//!
//! [`Aggregator::aggregate`] takes `&mut [f64]`. Order-based aggregators such as
//! [`Quantile`] sort their input in place instead of copying it, so callers must pass
//! a slice they are willing to have reordered. The resamplers only ever pass their own
//! scratch buffers.
//!
//! # Linearity
//!
//! [`Aggregator::is_linear`] reports whether the statistic depends only on the sum of
//! the (multiset of) input values, up to a constant factor. Only linear aggregators can
//! be used with [`PresampledResampler`](crate::resampler::PresampledResampler), which
//! scales values by draw counts instead of replicating them.

use std::fmt;

use crate::{InvalidProbabilityError, quantile};

/// A statistic computed over a sequence of values.
///
/// Implementations must not depend on state mutated across calls: the same input
/// always yields the same result.
pub trait Aggregator {
    /// Reduces `values` to a single number.
    ///
    /// Must not fail for any input, including an empty slice. Implementations may
    /// reorder `values`.
    fn aggregate(&self, values: &mut [f64]) -> f64;

    /// Returns `true` if scaling each value by its draw count yields the same result
    /// as replicating it that many times.
    ///
    /// Defaults to `false`.
    fn is_linear(&self) -> bool {
        false
    }
}

impl<A> Aggregator for &A
where
    A: Aggregator + ?Sized,
{
    fn aggregate(&self, values: &mut [f64]) -> f64 {
        (**self).aggregate(values)
    }

    fn is_linear(&self) -> bool {
        (**self).is_linear()
    }
}

impl<A> Aggregator for Box<A>
where
    A: Aggregator + ?Sized,
{
    fn aggregate(&self, values: &mut [f64]) -> f64 {
        (**self).aggregate(values)
    }

    fn is_linear(&self) -> bool {
        (**self).is_linear()
    }
}

/// A dynamically dispatched aggregator.
pub type BoxedAggregator = Box<dyn Aggregator + Send + Sync>;

/// Sum of all values.
///
/// Values are added left to right with plain floating-point addition, so the result
/// is bit-for-bit reproducible. Empty input sums to `0.0`.
///
/// # Examples
///
/// ```
/// use bootci_resample::aggregator::{Aggregator as _, Sum};
///
/// assert_eq!(Sum.aggregate(&mut [0.0, 1.0, 2.0, 3.0, 4.0]), 10.0);
/// assert_eq!(Sum.aggregate(&mut []), 0.0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sum;

impl Aggregator for Sum {
    #[inline]
    fn aggregate(&self, values: &mut [f64]) -> f64 {
        naive_sum(values)
    }

    fn is_linear(&self) -> bool {
        true
    }
}

/// Arithmetic mean of all values.
///
/// Empty input averages to `0.0` rather than NaN.
///
/// # Examples
///
/// ```
/// use bootci_resample::aggregator::{Aggregator as _, Average};
///
/// assert_eq!(Average.aggregate(&mut [0.0, 1.0, 2.0, 3.0, 4.0]), 2.0);
/// assert_eq!(Average.aggregate(&mut []), 0.0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Average;

impl Aggregator for Average {
    #[expect(clippy::cast_precision_loss)]
    #[inline]
    fn aggregate(&self, values: &mut [f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        naive_sum(values) / values.len() as f64
    }

    fn is_linear(&self) -> bool {
        true
    }
}

/// Nearest-rank quantile of the values.
///
/// Sorts its input in place (NaNs first), then returns the element at
/// `floor(q × (n − 1))`. Empty input yields `NaN`.
///
/// # Examples
///
/// ```
/// use bootci_resample::aggregator::{Aggregator as _, Quantile};
///
/// let median = Quantile::new(0.5).unwrap();
/// let mut values = [30.0, 10.0, 20.0];
/// assert_eq!(median.aggregate(&mut values), 20.0);
/// assert_eq!(values, [10.0, 20.0, 30.0]); // sorted in place
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantile {
    q: f64,
}

impl Quantile {
    /// Creates a quantile aggregator for probability `q`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidProbabilityError`] if `q` is outside `[0.0, 1.0]` or NaN.
    pub fn new(q: f64) -> Result<Self, InvalidProbabilityError> {
        let q = quantile::validate_probability(q)?;
        Ok(Self { q })
    }

    /// Returns the median aggregator.
    #[must_use]
    pub const fn median() -> Self {
        Self { q: 0.5 }
    }

    /// Returns the probability this aggregator extracts.
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.q
    }
}

impl Aggregator for Quantile {
    fn aggregate(&self, values: &mut [f64]) -> f64 {
        quantile::sort_ascending(values);
        // `q` is validated on construction
        quantile::quantile(values, self.q).unwrap_or(f64::NAN)
    }
}

/// Adapts a closure into an [`Aggregator`].
///
/// The wrapped aggregator is non-linear unless constructed with
/// [`FnAggregator::linear`].
///
/// # Examples
///
/// ```
/// use bootci_resample::aggregator::{Aggregator as _, FnAggregator};
///
/// // Mean of the values after dropping the smallest and the largest one.
/// let trimmed_mean = FnAggregator::new(|values: &mut [f64]| {
///     values.sort_by(f64::total_cmp);
///     let inner = &values[1..values.len() - 1];
///     inner.iter().sum::<f64>() / inner.len() as f64
/// });
/// assert_eq!(trimmed_mean.aggregate(&mut [100.0, 2.0, 3.0, 4.0, -50.0]), 3.0);
/// ```
#[derive(Clone, Copy)]
pub struct FnAggregator<F> {
    f: F,
    linear: bool,
}

impl<F> fmt::Debug for FnAggregator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAggregator")
            .field("linear", &self.linear)
            .finish_non_exhaustive()
    }
}

impl<F> FnAggregator<F>
where
    F: Fn(&mut [f64]) -> f64,
{
    /// Wraps a closure as a non-linear aggregator.
    pub const fn new(f: F) -> Self {
        Self { f, linear: false }
    }

    /// Wraps a closure the caller asserts is linear in the sense of
    /// [`Aggregator::is_linear`].
    pub const fn linear(f: F) -> Self {
        Self { f, linear: true }
    }
}

impl<F> Aggregator for FnAggregator<F>
where
    F: Fn(&mut [f64]) -> f64,
{
    fn aggregate(&self, values: &mut [f64]) -> f64 {
        (self.f)(values)
    }

    fn is_linear(&self) -> bool {
        self.linear
    }
}

fn naive_sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, &v| acc + v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        assert_eq!(Sum.aggregate(&mut [0.0, 1.0, 2.0, 3.0, 4.0]), 10.0);
        assert_eq!(Sum.aggregate(&mut []), 0.0);
    }

    #[test]
    fn test_sum_matches_left_fold_bit_for_bit() {
        let mut values = [0.1, 0.2, 0.3, 1e16, -1e16, 0.7];
        let expected: f64 = 0.0 + 0.1 + 0.2 + 0.3 + 1e16 + -1e16 + 0.7;
        assert_eq!(Sum.aggregate(&mut values).to_bits(), expected.to_bits());
    }

    #[test]
    fn test_average() {
        assert_eq!(Average.aggregate(&mut [0.0, 1.0, 2.0, 3.0, 4.0]), 2.0);
        assert_eq!(Average.aggregate(&mut []), 0.0);
    }

    #[test]
    fn test_sum_and_average_do_not_reorder() {
        let mut values = [3.0, 1.0, 2.0];
        Sum.aggregate(&mut values);
        Average.aggregate(&mut values);
        assert_eq!(values, [3.0, 1.0, 2.0]);
    }

    mod quantile_aggregator {
        use super::*;

        #[test]
        fn test_sorts_input_in_place() {
            let mut values = [4.0, 0.0, 3.0, 1.0, 2.0];
            assert_eq!(Quantile::median().aggregate(&mut values), 2.0);
            assert_eq!(values, [0.0, 1.0, 2.0, 3.0, 4.0]);
        }

        #[test]
        fn test_extremes() {
            let min = Quantile::new(0.0).unwrap();
            let max = Quantile::new(1.0).unwrap();
            assert_eq!(min.aggregate(&mut [5.0, -2.0, 8.0]), -2.0);
            assert_eq!(max.aggregate(&mut [5.0, -2.0, 8.0]), 8.0);
        }

        #[test]
        fn test_nan_input_sorts_first() {
            let min = Quantile::new(0.0).unwrap();
            assert!(min.aggregate(&mut [3.0, f64::NAN, 1.0]).is_nan());
            let max = Quantile::new(1.0).unwrap();
            assert_eq!(max.aggregate(&mut [3.0, f64::NAN, 1.0]), 3.0);
        }

        #[test]
        fn test_empty_is_nan() {
            assert!(Quantile::median().aggregate(&mut []).is_nan());
        }

        #[test]
        fn test_rejects_invalid_probability() {
            assert!(Quantile::new(-0.5).is_err());
            assert!(Quantile::new(1.01).is_err());
            assert!(Quantile::new(f64::NAN).is_err());
            assert_eq!(Quantile::new(0.9).unwrap().probability(), 0.9);
        }

        #[test]
        fn test_is_not_linear() {
            assert!(!Quantile::median().is_linear());
        }
    }

    #[test]
    fn test_linearity_flags() {
        assert!(Sum.is_linear());
        assert!(Average.is_linear());
        assert!(!FnAggregator::new(|_: &mut [f64]| 0.0).is_linear());
        assert!(FnAggregator::linear(|v: &mut [f64]| v.iter().sum()).is_linear());
    }

    #[test]
    fn test_boxed_and_borrowed_aggregators_delegate() {
        let boxed: BoxedAggregator = Box::new(Average);
        assert_eq!(boxed.aggregate(&mut [1.0, 3.0]), 2.0);
        assert!(boxed.is_linear());

        let borrowed = &Quantile::median();
        assert_eq!(borrowed.aggregate(&mut [3.0, 1.0, 2.0]), 2.0);
        assert!(!borrowed.is_linear());
    }
}
