//! Nearest-rank quantile lookup.
//!
//! Every quantile in this crate (the standalone helper, the
//! [`Quantile`](crate::aggregator::Quantile) aggregator, and the resamplers'
//! distributions) goes through [`quantile`], so they all agree on the index formula
//! `floor(q × (n − 1))`. The result is always an element of the input; there is no
//! interpolation between neighbors.

use std::cmp::Ordering;

use crate::InvalidProbabilityError;

/// Checks that `q` is a probability in `[0.0, 1.0]`.
///
/// NaN is rejected.
///
/// # Examples
///
/// ```
/// use bootci_resample::quantile::validate_probability;
///
/// assert_eq!(validate_probability(0.25), Ok(0.25));
/// assert!(validate_probability(1.5).is_err());
/// assert!(validate_probability(f64::NAN).is_err());
/// ```
pub fn validate_probability(q: f64) -> Result<f64, InvalidProbabilityError> {
    if (0.0..=1.0).contains(&q) {
        Ok(q)
    } else {
        Err(InvalidProbabilityError { probability: q })
    }
}

/// Returns the `q` quantile of values sorted in ascending order.
///
/// The element at index `floor(q × (n − 1))` is returned. An empty input yields
/// `f64::NAN`, which signals "no data" and cannot be mistaken for a real statistic.
///
/// The input is assumed to be sorted; this is checked only in debug builds.
///
/// # Errors
///
/// Returns [`InvalidProbabilityError`] if `q` is outside `[0.0, 1.0]` or NaN. The
/// probability is validated before the emptiness check.
///
/// # Examples
///
/// ```
/// use bootci_resample::quantile::quantile;
///
/// assert_eq!(quantile(&[10.0, 20.0, 30.0], 0.5).unwrap(), 20.0);
/// assert!(quantile(&[], 0.5).unwrap().is_nan());
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
pub fn quantile(sorted_values: &[f64], q: f64) -> Result<f64, InvalidProbabilityError> {
    let q = validate_probability(q)?;
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| ascending_cmp(*a, *b).is_le()),
        "values must be sorted in ascending order"
    );

    if sorted_values.is_empty() {
        return Ok(f64::NAN);
    }
    let idx = (q * (sorted_values.len() - 1) as f64) as usize;
    Ok(sorted_values[idx])
}

/// Orders values ascending, with every NaN before every number.
///
/// Numbers follow the IEEE 754 total order, so `-0.0` sorts before `0.0`.
pub(crate) fn ascending_cmp(a: f64, b: f64) -> Ordering {
    b.is_nan().cmp(&a.is_nan()).then_with(|| a.total_cmp(&b))
}

/// Sorts values in ascending order, NaNs first.
pub(crate) fn sort_ascending(values: &mut [f64]) {
    values.sort_by(|a, b| ascending_cmp(*a, *b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_nan_for_any_probability() {
        for q in [0.0, 0.25, 0.5, 1.0] {
            assert!(quantile(&[], q).unwrap().is_nan());
        }
    }

    #[test]
    fn test_index_formula_floors() {
        let values = [10.0, 20.0, 30.0];
        assert_eq!(quantile(&values, 0.0).unwrap(), 10.0);
        assert_eq!(quantile(&values, 0.5).unwrap(), 20.0);
        // floor(0.99 * 2) = 1
        assert_eq!(quantile(&values, 0.99).unwrap(), 20.0);
        assert_eq!(quantile(&values, 1.0).unwrap(), 30.0);
    }

    #[test]
    fn test_single_value() {
        for q in [0.0, 0.3, 1.0] {
            assert_eq!(quantile(&[42.0], q).unwrap(), 42.0);
        }
    }

    #[test]
    fn test_out_of_range_probability_is_rejected() {
        let values = [1.0, 2.0, 3.0];
        for q in [-0.1, 1.1, f64::NAN, f64::INFINITY] {
            let err = quantile(&values, q).unwrap_err();
            assert_eq!(err.probability.to_bits(), q.to_bits());
        }
        assert!(quantile(&[], 2.0).is_err());
    }

    #[test]
    fn test_error_message_names_probability() {
        let err = quantile(&[1.0], 1.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "probability must be within [0.0, 1.0], got 1.5"
        );
    }

    #[test]
    fn test_sort_ascending_places_nan_first() {
        let mut values = [3.0, f64::NAN, -1.0, -f64::NAN, 2.0];
        sort_ascending(&mut values);
        assert!(values[0].is_nan());
        assert!(values[1].is_nan());
        assert_eq!(&values[2..], &[-1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_nan_is_lowest_quantile() {
        let mut values = [3.0, f64::NAN, 1.0];
        sort_ascending(&mut values);
        assert!(quantile(&values, 0.0).unwrap().is_nan());
        assert_eq!(quantile(&values, 1.0).unwrap(), 3.0);
    }
}
