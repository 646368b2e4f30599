use bootci_resample::{interval::PercentileInterval, seed::ResampleSeed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resample::{AggregatorKind, Strategy};

/// Effective resampling settings, echoed into every report.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResampleConfig {
    pub aggregator: AggregatorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregator_quantile: Option<f64>,
    pub iterations: usize,
    pub seed: ResampleSeed,
    pub level: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimateReport {
    pub created_at: DateTime<Utc>,
    pub input: String,
    pub num_values: usize,
    pub strategy: Strategy,
    pub config: ResampleConfig,
    /// The statistic computed on the observed values themselves.
    pub observed: f64,
    pub num_samples: usize,
    pub interval: PercentileInterval,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompareReport {
    pub created_at: DateTime<Utc>,
    pub input: String,
    pub num_values: usize,
    pub config: ResampleConfig,
    pub observed: f64,
    pub direct: PercentileInterval,
    pub presampled: PercentileInterval,
    /// `presampled - direct` for each bound.
    pub difference: IntervalDifference,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct IntervalDifference {
    pub lower: f64,
    pub median: f64,
    pub upper: f64,
}

impl IntervalDifference {
    pub fn between(direct: &PercentileInterval, presampled: &PercentileInterval) -> Self {
        Self {
            lower: presampled.lower - direct.lower,
            median: presampled.median - direct.median,
            upper: presampled.upper - direct.upper,
        }
    }
}
