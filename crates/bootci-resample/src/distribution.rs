//! The bootstrap distribution: per-iteration statistics kept in sorted order.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use crate::{InvalidProbabilityError, quantile};

/// Sorted collection of aggregate values, one per bootstrap iteration.
///
/// Values are appended in batches with [`extend`](Self::extend); the collection is
/// re-sorted after every batch, so it is always in ascending order (NaNs first) when read.
/// Nothing is dropped until [`clear`](Self::clear) is called: repeated batches
/// accumulate.
///
/// # Examples
///
/// ```
/// use bootci_resample::distribution::BootstrapDistribution;
///
/// let mut distribution = BootstrapDistribution::new();
/// assert!(distribution.quantile(0.5).unwrap().is_nan());
///
/// distribution.extend([3.0, 1.0, 2.0]);
/// assert_eq!(distribution.as_slice(), &[1.0, 2.0, 3.0]);
/// assert_eq!(distribution.quantile(0.5).unwrap(), 2.0);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BootstrapDistribution {
    sorted: Vec<f64>,
}

impl BootstrapDistribution {
    /// Creates an empty distribution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty distribution with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sorted: Vec::with_capacity(capacity),
        }
    }

    /// Appends a batch of values and restores ascending order.
    pub fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        self.sorted.extend(values);
        quantile::sort_ascending(&mut self.sorted);
    }

    /// Returns the `q` quantile of the distribution, or NaN if it is empty.
    ///
    /// See [`quantile::quantile`] for the index formula.
    pub fn quantile(&self, q: f64) -> Result<f64, InvalidProbabilityError> {
        quantile::quantile(&self.sorted, q)
    }

    /// Removes all values, keeping the allocation.
    pub fn clear(&mut self) {
        self.sorted.clear();
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Returns `true` if no values have been added since creation or the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Returns the values in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.sorted
    }

    /// Merges another distribution into this one.
    ///
    /// Both sides are already sorted, so this is a linear merge rather than a re-sort.
    pub fn merge(&mut self, other: &Self) {
        let merged = Self::merged([&*self, other]);
        *self = merged;
    }

    /// Combines distributions produced independently (e.g. by resamplers running on
    /// separate threads, each with its own share of the iterations) into one.
    ///
    /// Performs a heap-based k-way merge of the sorted inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use bootci_resample::distribution::BootstrapDistribution;
    ///
    /// let mut a = BootstrapDistribution::new();
    /// a.extend([1.0, 4.0]);
    /// let mut b = BootstrapDistribution::new();
    /// b.extend([2.0, 3.0, 5.0]);
    ///
    /// let merged = BootstrapDistribution::merged([&a, &b]);
    /// assert_eq!(merged.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    pub fn merged<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut heads = parts
            .into_iter()
            .map(|part| part.sorted.as_slice())
            .filter(|part| !part.is_empty())
            .map(|part| Reverse(Head(part)))
            .collect::<BinaryHeap<_>>();
        let total = heads.iter().map(|Reverse(Head(part))| part.len()).sum();
        let mut sorted = Vec::with_capacity(total);

        while let Some(Reverse(Head(part))) = heads.pop() {
            sorted.push(part[0]);
            if part.len() > 1 {
                heads.push(Reverse(Head(&part[1..])));
            }
        }

        Self { sorted }
    }
}

/// Non-empty sorted run, ordered by its first value.
struct Head<'a>(&'a [f64]);

impl Ord for Head<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        quantile::ascending_cmp(self.0[0], other.0[0])
    }
}

impl PartialOrd for Head<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Head<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Head<'_> {}
