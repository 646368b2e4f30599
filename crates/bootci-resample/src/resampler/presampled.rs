use std::iter;

use rand::RngCore;
use rand_pcg::Pcg32;

use super::{Resampler, draw_index};
use crate::{
    ResampleError, aggregator::Aggregator, distribution::BootstrapDistribution,
    seed::ResampleSeed,
};

/// Precomputed bootstrap draws: how often each input position is drawn per iteration.
///
/// The table has one row per iteration and one column per input position. Each row is
/// built from `num_values` uniform draws in `0..num_values`, each incrementing the
/// drawn column, so every row sums to `num_values`. The table depends only on the
/// generator and the dimensions, never on the values being resampled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCounts {
    iterations: usize,
    num_values: usize,
    // row-major, `iterations * num_values` entries
    counts: Vec<u32>,
}

impl DrawCounts {
    /// Draws a table of `iterations` rows for inputs of length `num_values`.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::EmptyValues`] if `num_values` is zero, and
    /// [`ResampleError::TooManyValues`] if a count could overflow `u32`.
    pub fn generate<R>(
        rng: &mut R,
        iterations: usize,
        num_values: usize,
    ) -> Result<Self, ResampleError>
    where
        R: RngCore + ?Sized,
    {
        if num_values == 0 {
            return Err(ResampleError::EmptyValues);
        }
        if u32::try_from(num_values).is_err() {
            return Err(ResampleError::TooManyValues { actual: num_values });
        }

        let mut counts = vec![0; iterations * num_values];
        for row in counts.chunks_exact_mut(num_values) {
            for _ in 0..num_values {
                row[draw_index(rng, num_values)] += 1;
            }
        }
        Ok(Self {
            iterations,
            num_values,
            counts,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the number of columns, i.e. the required input length.
    #[must_use]
    pub fn num_values(&self) -> usize {
        self.num_values
    }

    /// Returns the draw counts of one iteration.
    #[must_use]
    pub fn row(&self, iteration: usize) -> Option<&[u32]> {
        self.rows().nth(iteration)
    }

    /// Returns an iterator over the rows, one per iteration.
    #[must_use]
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        self.counts.chunks_exact(self.num_values)
    }
}

/// Bootstrap resampler that reuses a precomputed [`DrawCounts`] table.
///
/// The table is drawn once at construction. Each iteration then scales every input
/// value by the number of times its position was drawn (`scratch[j] = values[j] ×
/// counts[i][j]`) and aggregates the scaled buffer. No random numbers are generated
/// after construction, which makes repeated resampling of same-sized inputs cheap.
///
/// # Linearity
///
/// Scaling keeps each value at its own position with a multiplied magnitude; it does
/// not replicate values. The result matches a true bootstrap replicate only for
/// aggregators that are linear in the drawn values, such as [`Sum`] and [`Average`].
/// Order statistics like [`Quantile`] would see the scaled values (and zeros for
/// undrawn positions) and produce meaningless results, so constructors reject any
/// aggregator whose [`Aggregator::is_linear`] is `false`.
///
/// [`Sum`]: crate::aggregator::Sum
/// [`Average`]: crate::aggregator::Average
/// [`Quantile`]: crate::aggregator::Quantile
///
/// # Examples
///
/// ```
/// use bootci_resample::{
///     aggregator::Sum,
///     resampler::{PresampledResampler, Resampler as _},
/// };
///
/// let mut resampler = PresampledResampler::new(Sum, 2000, 5).unwrap();
/// resampler.resample(&[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(resampler.quantile(0.5).unwrap(), 10.0);
///
/// // The input length is fixed by the table.
/// assert!(resampler.resample(&[1.0, 2.0]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PresampledResampler<A> {
    aggregator: A,
    distribution: BootstrapDistribution,
    draw_counts: DrawCounts,
}

impl<A> PresampledResampler<A>
where
    A: Aggregator,
{
    /// Creates a resampler whose table is drawn from [`ResampleSeed::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::NonLinearAggregator`] if the aggregator is not linear,
    /// and [`ResampleError::EmptyValues`] if `num_values` is zero.
    pub fn new(aggregator: A, iterations: usize, num_values: usize) -> Result<Self, ResampleError> {
        Self::with_seed(aggregator, iterations, num_values, ResampleSeed::DEFAULT)
    }

    /// Like [`Self::new`], but with a specific seed.
    pub fn with_seed(
        aggregator: A,
        iterations: usize,
        num_values: usize,
        seed: ResampleSeed,
    ) -> Result<Self, ResampleError> {
        let mut rng: Pcg32 = seed.to_rng();
        Self::with_rng(aggregator, iterations, num_values, &mut rng)
    }

    /// Creates a resampler whose table is drawn from the given generator.
    ///
    /// The generator is only used during construction.
    pub fn with_rng<R>(
        aggregator: A,
        iterations: usize,
        num_values: usize,
        rng: &mut R,
    ) -> Result<Self, ResampleError>
    where
        R: RngCore + ?Sized,
    {
        if !aggregator.is_linear() {
            return Err(ResampleError::NonLinearAggregator);
        }
        let draw_counts = DrawCounts::generate(rng, iterations, num_values)?;
        Ok(Self {
            aggregator,
            distribution: BootstrapDistribution::with_capacity(iterations),
            draw_counts,
        })
    }

    /// Returns the aggregator.
    pub fn aggregator(&self) -> &A {
        &self.aggregator
    }

    /// Returns the number of statistics appended per [`resample`](Resampler::resample)
    /// call.
    pub fn iterations(&self) -> usize {
        self.draw_counts.iterations()
    }

    /// Returns the input length this resampler accepts.
    pub fn num_values(&self) -> usize {
        self.draw_counts.num_values()
    }

    /// Returns the precomputed draw table.
    pub fn draw_counts(&self) -> &DrawCounts {
        &self.draw_counts
    }
}

impl<A> Resampler for PresampledResampler<A>
where
    A: Aggregator,
{
    fn resample(&mut self, values: &[f64]) -> Result<(), ResampleError> {
        if values.len() != self.draw_counts.num_values() {
            return Err(ResampleError::LengthMismatch {
                expected: self.draw_counts.num_values(),
                actual: values.len(),
            });
        }

        let Self {
            aggregator,
            distribution,
            draw_counts,
        } = self;
        let mut scratch = vec![0.0; values.len()];
        distribution.extend(draw_counts.rows().map(|counts| {
            for (slot, (value, count)) in iter::zip(&mut scratch, iter::zip(values, counts)) {
                *slot = value * f64::from(*count);
            }
            aggregator.aggregate(&mut scratch)
        }));
        Ok(())
    }

    fn distribution(&self) -> &BootstrapDistribution {
        &self.distribution
    }

    fn reset(&mut self) {
        self.distribution.clear();
    }
}
