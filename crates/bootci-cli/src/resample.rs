use std::path::PathBuf;

use bootci_resample::{
    ResampleError,
    aggregator::{Aggregator, Average, BoxedAggregator, Quantile, Sum},
    resampler::{BoxedResampler, DirectResampler, PresampledResampler},
    seed::ResampleSeed,
};
use serde::{Deserialize, Serialize};

#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AggregatorKind {
    Sum,
    #[default]
    Average,
    Quantile,
}

#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Direct,
    Presampled,
}

/// Options shared by every command that resamples.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ResampleArg {
    /// Observed values: a JSON array, or numbers separated by whitespace
    pub input: PathBuf,
    /// Statistic to estimate (sum, average, quantile)
    #[arg(long, default_value = "average")]
    pub aggregator: AggregatorKind,
    /// Probability extracted by the quantile aggregator
    #[arg(long, default_value_t = 0.5)]
    pub aggregator_quantile: f64,
    /// Number of bootstrap iterations
    #[arg(long, default_value_t = 2000)]
    pub iterations: usize,
    /// Resampling seed (32 hex digits)
    #[arg(long, default_value_t = ResampleSeed::DEFAULT)]
    pub seed: ResampleSeed,
    /// Confidence level of the reported interval
    #[arg(long, default_value_t = 0.95)]
    pub level: f64,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl ResampleArg {
    pub(crate) fn build_aggregator(&self) -> anyhow::Result<BoxedAggregator> {
        let aggregator: BoxedAggregator = match self.aggregator {
            AggregatorKind::Sum => Box::new(Sum),
            AggregatorKind::Average => Box::new(Average),
            AggregatorKind::Quantile => Box::new(Quantile::new(self.aggregator_quantile)?),
        };
        Ok(aggregator)
    }

    /// The quantile probability, if the quantile aggregator is selected.
    pub(crate) fn aggregator_quantile(&self) -> Option<f64> {
        (self.aggregator == AggregatorKind::Quantile).then_some(self.aggregator_quantile)
    }
}

/// Fails early if `aggregator` cannot run under `strategy`.
pub(crate) fn check_strategy(
    strategy: Strategy,
    aggregator: &dyn Aggregator,
) -> Result<(), ResampleError> {
    match strategy {
        Strategy::Presampled if !aggregator.is_linear() => Err(ResampleError::NonLinearAggregator),
        Strategy::Direct | Strategy::Presampled => Ok(()),
    }
}

pub(crate) fn build_resampler(
    strategy: Strategy,
    aggregator: BoxedAggregator,
    iterations: usize,
    num_values: usize,
    seed: ResampleSeed,
) -> Result<BoxedResampler<'static>, ResampleError> {
    let resampler: BoxedResampler = match strategy {
        Strategy::Direct => Box::new(DirectResampler::with_seed(aggregator, iterations, seed)),
        Strategy::Presampled => Box::new(PresampledResampler::with_seed(
            aggregator, iterations, num_values, seed,
        )?),
    };
    Ok(resampler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds_case_insensitive() {
        assert_eq!("sum".parse::<AggregatorKind>().unwrap(), AggregatorKind::Sum);
        assert_eq!(
            "Quantile".parse::<AggregatorKind>().unwrap(),
            AggregatorKind::Quantile
        );
        assert_eq!(
            "presampled".parse::<Strategy>().unwrap(),
            Strategy::Presampled
        );
        assert!("median".parse::<AggregatorKind>().is_err());
    }

    #[test]
    fn test_presampled_rejects_quantile() {
        let aggregator: BoxedAggregator = Box::new(Quantile::median());
        let result = build_resampler(Strategy::Presampled, aggregator, 10, 3, ResampleSeed::DEFAULT);
        assert_eq!(result.err(), Some(ResampleError::NonLinearAggregator));
    }

    #[test]
    fn test_check_strategy() {
        let median = Quantile::median();
        assert_eq!(
            check_strategy(Strategy::Presampled, &median),
            Err(ResampleError::NonLinearAggregator)
        );
        assert_eq!(check_strategy(Strategy::Direct, &median), Ok(()));
        assert_eq!(check_strategy(Strategy::Presampled, &Sum), Ok(()));

        let boxed: BoxedAggregator = Box::new(Quantile::median());
        assert!(check_strategy(Strategy::Presampled, &*boxed).is_err());
    }

    #[test]
    fn test_direct_accepts_quantile() {
        let aggregator: BoxedAggregator = Box::new(Quantile::median());
        let mut resampler =
            build_resampler(Strategy::Direct, aggregator, 10, 3, ResampleSeed::DEFAULT).unwrap();
        resampler.resample(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(resampler.distribution().len(), 10);
    }
}
