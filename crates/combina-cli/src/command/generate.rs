use std::path::PathBuf;

use combina_engine::{CombinationSampler, Population, SampleSeed};
use combina_properties::{
    enricher::DEFAULT_START_INDEX,
    property::{DEFAULT_POPULATION_SIZE, PropertyConfig},
};

use crate::{operation, util::Output};

#[derive(Debug, Clone, clap::Args)]
#[group(required = true, multiple = false)]
pub(crate) struct PopulationArg {
    /// Population members, comma separated
    #[arg(long, value_delimiter = ',')]
    population: Option<Vec<u32>>,
    /// Use the population 1..=N
    #[arg(long, value_name = "N")]
    population_max: Option<u32>,
}

impl PopulationArg {
    fn to_population(&self) -> Population {
        match (&self.population, self.population_max) {
            (Some(members), _) => Population::new(members.clone()),
            (None, max) => Population::range(max.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CombinationArg {
    #[clap(flatten)]
    population: PopulationArg,
    /// Number of members per combination
    #[arg(long)]
    size: usize,
    /// Upper bound of the level bands used by `level_key` and `level_members`
    #[arg(long, default_value_t = DEFAULT_POPULATION_SIZE)]
    population_size: u32,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl CombinationArg {
    fn config(&self) -> PropertyConfig {
        PropertyConfig {
            population_size: self.population_size,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateRandomArg {
    #[clap(flatten)]
    combination: CombinationArg,
    /// Number of combinations to draw
    #[arg(long, default_value_t = 1)]
    amount: usize,
    /// Index of the first generated record
    #[arg(long, default_value_t = DEFAULT_START_INDEX)]
    start_index: u64,
    /// Seed for reproducible sampling (32 hex digits)
    #[arg(long)]
    seed: Option<SampleSeed>,
}

impl GenerateRandomArg {
    fn sampler(&self) -> CombinationSampler {
        self.seed
            .map_or_else(CombinationSampler::new, CombinationSampler::with_seed)
    }
}

pub(crate) fn run_all(arg: &CombinationArg) -> anyhow::Result<()> {
    let population = arg.population.to_population();
    let records = operation::generate_all(&population, arg.size, &arg.config())?;
    Output::save_json(&records, arg.output.as_deref())
}

pub(crate) fn run_random(arg: &GenerateRandomArg) -> anyhow::Result<()> {
    let GenerateRandomArg {
        combination,
        amount,
        start_index,
        seed: _,
    } = arg;
    let population = combination.population.to_population();
    let records = operation::generate_random(
        &population,
        combination.size,
        *amount,
        *start_index,
        &combination.config(),
        &mut arg.sampler(),
    )?;
    Output::save_json(&records, combination.output.as_deref())
}

pub(crate) fn run_random_unique(arg: &GenerateRandomArg) -> anyhow::Result<()> {
    let GenerateRandomArg {
        combination,
        amount,
        start_index,
        seed: _,
    } = arg;
    let population = combination.population.to_population();
    let records = operation::generate_random_unique(
        &population,
        combination.size,
        *amount,
        *start_index,
        &combination.config(),
        &mut arg.sampler(),
    )?;
    Output::save_json(&records, combination.output.as_deref())
}
