//! Bootstrap resampling of aggregate statistics.
//!
//! This crate estimates the sampling distribution of a statistic (sum, average,
//! quantile, or any user-defined aggregate) by repeatedly drawing same-sized samples
//! with replacement from a set of observations and recomputing the statistic on each
//! draw. Quantiles of the resulting distribution give percentile confidence intervals.
//!
//! # Modules
//!
//! - [`aggregator`]: The [`Aggregator`](aggregator::Aggregator) capability and its
//!   built-in variants (sum, average, quantile)
//! - [`quantile`]: The nearest-rank quantile lookup shared by every component
//! - [`distribution`]: Sorted accumulation of per-iteration statistics
//! - [`resampler`]: Direct and presampled bootstrap resamplers
//! - [`seed`]: Deterministic seeds for the resampling RNG
//! - [`interval`]: Percentile confidence intervals
//!
//! # Choosing a resampler
//!
//! - [`DirectResampler`](resampler::DirectResampler) draws fresh indices on every
//!   call. It works with any aggregator and any input length.
//! - [`PresampledResampler`](resampler::PresampledResampler) draws a table of
//!   per-position draw counts once and reuses it. It avoids RNG work on repeated calls,
//!   but requires a fixed input length and a linear aggregator.
//!
//! # Examples
//!
//! ```
//! use bootci_resample::{
//!     aggregator::Sum,
//!     resampler::{DirectResampler, Resampler as _},
//! };
//!
//! let mut resampler = DirectResampler::new(Sum, 2000);
//! resampler.resample(&[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
//!
//! assert_eq!(resampler.quantile(0.0).unwrap(), 0.0);
//! assert_eq!(resampler.quantile(0.5).unwrap(), 10.0);
//! assert_eq!(resampler.quantile(1.0).unwrap(), 20.0);
//!
//! resampler.reset();
//! assert!(resampler.quantile(0.5).unwrap().is_nan());
//! ```

pub mod aggregator;
pub mod distribution;
pub mod interval;
pub mod quantile;
pub mod resampler;
pub mod seed;

/// A probability outside `[0.0, 1.0]` (or NaN) was passed to a quantile lookup.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("probability must be within [0.0, 1.0], got {probability}")]
pub struct InvalidProbabilityError {
    pub probability: f64,
}

/// Errors raised by resampler construction and resampling.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ResampleError {
    #[display("cannot resample an empty set of values")]
    EmptyValues,
    #[display("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[display("cannot presample draws for {actual} values")]
    TooManyValues { actual: usize },
    #[display("presampled resampling requires a linear aggregator")]
    NonLinearAggregator,
    #[display("{_0}")]
    InvalidProbability(InvalidProbabilityError),
}

impl From<InvalidProbabilityError> for ResampleError {
    fn from(err: InvalidProbabilityError) -> Self {
        Self::InvalidProbability(err)
    }
}
