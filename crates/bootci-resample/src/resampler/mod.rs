//! Bootstrap resamplers.
//!
//! A resampler repeatedly builds a bootstrap replicate of the observed values,
//! aggregates it, and appends the result to its [`BootstrapDistribution`]:
//!
//! - [`DirectResampler`] - draws fresh indices from its RNG on every call
//! - [`PresampledResampler`] - draws a [`DrawCounts`] table once at construction and
//!   scales values by it on every call
//!
//! Both implement [`Resampler`], so callers can choose the strategy at runtime.
//!
//! # Lifecycle
//!
//! A resampler starts empty. Each [`Resampler::resample`] call appends one statistic
//! per iteration and keeps the distribution sorted; calls accumulate until
//! [`Resampler::reset`] empties it again. [`Resampler::quantile`] may be read at any
//! point and returns NaN while the distribution is empty.
//!
//! Resamplers are not meant to be shared between threads while resampling. To spread
//! work over threads, run one resampler per thread (with distinct seeds) and combine
//! their distributions with [`BootstrapDistribution::merged`].

use rand::RngCore;

use crate::{
    InvalidProbabilityError, ResampleError, distribution::BootstrapDistribution,
    interval::PercentileInterval,
};

pub use self::{direct::*, presampled::*};

mod direct;
mod presampled;

/// A bootstrap resampling strategy.
pub trait Resampler {
    /// Resamples `values` once per iteration and adds the aggregates to the
    /// distribution.
    fn resample(&mut self, values: &[f64]) -> Result<(), ResampleError>;

    /// Returns the distribution accumulated since creation or the last reset.
    fn distribution(&self) -> &BootstrapDistribution;

    /// Discards the accumulated distribution.
    fn reset(&mut self);

    /// Returns the `q` quantile of the accumulated distribution.
    ///
    /// Returns NaN if nothing has been resampled yet.
    fn quantile(&self, q: f64) -> Result<f64, InvalidProbabilityError> {
        self.distribution().quantile(q)
    }

    /// Returns the percentile confidence interval at `level` (e.g. `0.95`).
    fn interval(&self, level: f64) -> Result<PercentileInterval, InvalidProbabilityError> {
        PercentileInterval::from_distribution(self.distribution(), level)
    }
}

/// A dynamically dispatched resampler.
pub type BoxedResampler<'a> = Box<dyn Resampler + Send + 'a>;

/// Draws an index uniformly from `0..len`.
///
/// Plain modulo reduction of a 64-bit draw; the bias is negligible for any realistic
/// sample size. `len` must be non-zero.
#[expect(clippy::cast_possible_truncation)]
fn draw_index<R>(rng: &mut R, len: usize) -> usize
where
    R: RngCore + ?Sized,
{
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}
