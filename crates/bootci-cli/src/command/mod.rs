use clap::{Parser, Subcommand};

use self::{compare::CompareArg, estimate::EstimateArg};

mod compare;
mod estimate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Estimate a bootstrap confidence interval for a statistic
    Estimate(#[clap(flatten)] EstimateArg),
    /// Run the direct and presampled strategies side by side
    Compare(#[clap(flatten)] CompareArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Estimate(arg) => estimate::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
    }
    Ok(())
}
