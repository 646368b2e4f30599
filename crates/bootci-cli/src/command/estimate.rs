use bootci_resample::aggregator::Aggregator as _;
use chrono::Utc;

use crate::{
    resample::{self, ResampleArg, Strategy},
    schema::report::{EstimateReport, ResampleConfig},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EstimateArg {
    #[clap(flatten)]
    resample: ResampleArg,
    /// Resampling strategy (direct, presampled)
    #[arg(long, default_value = "direct")]
    strategy: Strategy,
    /// Resample the same values this many times, accumulating the distribution
    #[arg(long, default_value_t = 1)]
    rounds: usize,
}

pub(crate) fn run(arg: &EstimateArg) -> anyhow::Result<()> {
    let EstimateArg {
        resample,
        strategy,
        rounds,
    } = arg;

    eprintln!("Loading values from {}...", resample.input.display());
    let values = util::read_values_file(&resample.input)?;
    eprintln!("Loaded {} values", values.len());

    let observed = resample.build_aggregator()?.aggregate(&mut values.clone());
    let mut resampler = resample::build_resampler(
        *strategy,
        resample.build_aggregator()?,
        resample.iterations,
        values.len(),
        resample.seed,
    )?;

    for round in 0..*rounds {
        eprintln!(
            "Round #{round}: {:?} resampling, {} iterations...",
            strategy, resample.iterations
        );
        resampler.resample(&values)?;
    }
    let interval = resampler.interval(resample.level)?;

    let report = EstimateReport {
        created_at: Utc::now(),
        input: resample.input.display().to_string(),
        num_values: values.len(),
        strategy: *strategy,
        config: ResampleConfig {
            aggregator: resample.aggregator,
            aggregator_quantile: resample.aggregator_quantile(),
            iterations: resample.iterations,
            seed: resample.seed,
            level: resample.level,
        },
        observed,
        num_samples: resampler.distribution().len(),
        interval,
    };
    Output::save_json(&report, resample.output.clone())?;

    eprintln!();
    eprintln!("Estimate completed");
    if let Some(path) = &resample.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Observed: {:.6}", report.observed);
    eprintln!(
        "  {:.1}% interval: [{:.6}, {:.6}] (median {:.6})",
        report.interval.level * 100.0,
        report.interval.lower,
        report.interval.upper,
        report.interval.median
    );

    Ok(())
}
