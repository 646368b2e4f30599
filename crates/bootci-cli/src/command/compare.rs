use bootci_resample::{aggregator::Aggregator as _, interval::PercentileInterval};
use chrono::Utc;

use crate::{
    resample::{self, ResampleArg, Strategy},
    schema::report::{CompareReport, IntervalDifference, ResampleConfig},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    resample: ResampleArg,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let CompareArg { resample } = arg;

    let aggregator = resample.build_aggregator()?;
    for strategy in [Strategy::Direct, Strategy::Presampled] {
        resample::check_strategy(strategy, &*aggregator)?;
    }

    eprintln!("Loading values from {}...", resample.input.display());
    let values = util::read_values_file(&resample.input)?;
    eprintln!("Loaded {} values", values.len());

    let observed = aggregator.aggregate(&mut values.clone());
    let direct = interval_for(resample, Strategy::Direct, &values)?;
    let presampled = interval_for(resample, Strategy::Presampled, &values)?;

    let report = CompareReport {
        created_at: Utc::now(),
        input: resample.input.display().to_string(),
        num_values: values.len(),
        config: ResampleConfig {
            aggregator: resample.aggregator,
            aggregator_quantile: resample.aggregator_quantile(),
            iterations: resample.iterations,
            seed: resample.seed,
            level: resample.level,
        },
        observed,
        direct,
        presampled,
        difference: IntervalDifference::between(&direct, &presampled),
    };
    Output::save_json(&report, resample.output.clone())?;

    eprintln!();
    eprintln!("Comparison completed");
    eprintln!(
        "  Direct:     [{:.6}, {:.6}]",
        report.direct.lower, report.direct.upper
    );
    eprintln!(
        "  Presampled: [{:.6}, {:.6}]",
        report.presampled.lower, report.presampled.upper
    );

    Ok(())
}

fn interval_for(
    resample: &ResampleArg,
    strategy: Strategy,
    values: &[f64],
) -> anyhow::Result<PercentileInterval> {
    eprintln!(
        "{strategy:?} resampling, {} iterations...",
        resample.iterations
    );
    let mut resampler = resample::build_resampler(
        strategy,
        resample.build_aggregator()?,
        resample.iterations,
        values.len(),
        resample.seed,
    )?;
    resampler.resample(values)?;
    Ok(resampler.interval(resample.level)?)
}
