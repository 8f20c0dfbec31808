use clap::{Parser, Subcommand};

use self::{
    dispatch::DispatchArg,
    generate::{CombinationArg, GenerateRandomArg},
    refresh_analytics::RefreshAnalyticsArg,
};

mod dispatch;
mod generate;
mod refresh_analytics;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Enumerate and enrich every combination of a population
    GenerateAll(#[clap(flatten)] CombinationArg),
    /// Draw and enrich random combinations (repeats allowed)
    GenerateRandom(#[clap(flatten)] GenerateRandomArg),
    /// Draw and enrich distinct random combinations
    GenerateRandomUnique(#[clap(flatten)] GenerateRandomArg),
    /// Compute member re-occurrence analytics over stored records
    RefreshAnalytics(#[clap(flatten)] RefreshAnalyticsArg),
    /// Handle a JSON request body against the blob store
    Dispatch(#[clap(flatten)] DispatchArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::GenerateAll(arg) => generate::run_all(&arg)?,
        Mode::GenerateRandom(arg) => generate::run_random(&arg)?,
        Mode::GenerateRandomUnique(arg) => generate::run_random_unique(&arg)?,
        Mode::RefreshAnalytics(arg) => refresh_analytics::run(&arg)?,
        Mode::Dispatch(arg) => dispatch::run(&arg)?,
    }
    Ok(())
}
