use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use super::{Resampler, draw_index};
use crate::{
    ResampleError, aggregator::Aggregator, distribution::BootstrapDistribution,
    seed::ResampleSeed,
};

/// Bootstrap resampler that draws fresh indices on every iteration.
///
/// For each iteration, every position of a scratch buffer is filled with a value picked
/// uniformly (with replacement) from the input, and the buffer is aggregated. This is
/// the classic bootstrap and works with any [`Aggregator`] and any input length.
///
/// The RNG is owned by the resampler. It starts from [`ResampleSeed::DEFAULT`] unless
/// another seed or generator is supplied, and it is **not** rewound by
/// [`reset`](Resampler::reset): later calls continue the random stream.
///
/// # Examples
///
/// ```
/// use bootci_resample::{
///     aggregator::Average,
///     resampler::{DirectResampler, Resampler as _},
/// };
///
/// let mut resampler = DirectResampler::new(Average, 1000);
/// resampler.resample(&[2.0, 4.0, 4.0, 5.0, 7.0, 9.0]).unwrap();
///
/// let interval = resampler.interval(0.95).unwrap();
/// assert!(interval.lower < 5.1 && 5.1 < interval.upper);
/// ```
#[derive(Debug, Clone)]
pub struct DirectResampler<A, R = Pcg32> {
    aggregator: A,
    iterations: usize,
    distribution: BootstrapDistribution,
    rng: R,
}

impl<A> DirectResampler<A>
where
    A: Aggregator,
{
    /// Creates a resampler seeded with [`ResampleSeed::DEFAULT`].
    #[must_use]
    pub fn new(aggregator: A, iterations: usize) -> Self {
        Self::with_seed(aggregator, iterations, ResampleSeed::DEFAULT)
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(aggregator: A, iterations: usize, seed: ResampleSeed) -> Self {
        Self::with_rng(aggregator, iterations, seed.to_rng())
    }
}

impl<A, R> DirectResampler<A, R>
where
    A: Aggregator,
    R: RngCore,
{
    /// Creates a resampler drawing indices from the given generator.
    pub fn with_rng(aggregator: A, iterations: usize, rng: R) -> Self {
        Self {
            aggregator,
            iterations,
            distribution: BootstrapDistribution::with_capacity(iterations),
            rng,
        }
    }

    /// Returns the aggregator.
    pub fn aggregator(&self) -> &A {
        &self.aggregator
    }

    /// Returns the number of statistics appended per [`resample`](Resampler::resample)
    /// call.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl<A, R> DirectResampler<A, R>
where
    R: SeedableRng<Seed = [u8; 16]>,
{
    /// Restarts the random stream from `seed`.
    ///
    /// The accumulated distribution is kept.
    pub fn reseed(&mut self, seed: ResampleSeed) {
        self.rng = seed.to_rng();
    }
}

impl<A, R> Resampler for DirectResampler<A, R>
where
    A: Aggregator,
    R: RngCore,
{
    fn resample(&mut self, values: &[f64]) -> Result<(), ResampleError> {
        if values.is_empty() {
            return Err(ResampleError::EmptyValues);
        }

        let Self {
            aggregator,
            iterations,
            distribution,
            rng,
        } = self;
        let mut scratch = vec![0.0; values.len()];
        distribution.extend((0..*iterations).map(|_| {
            for slot in &mut scratch {
                *slot = values[draw_index(rng, values.len())];
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
