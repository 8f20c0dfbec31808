//! Core operations shared by the subcommands and the request dispatcher.

use combina_analysis::{AnalyticsError, report::AnalyticsReport};
use combina_engine::{CombinationGenerator, CombinationSampler, GenerateError, Population};
use combina_properties::{
    enricher::{DEFAULT_START_INDEX, EnrichError, Enricher},
    property::PropertyConfig,
    record::CombinationRecord,
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum OperationError {
    #[display("{_0}")]
    Generate(GenerateError),
    #[display("{_0}")]
    Enrich(EnrichError),
    #[display("{_0}")]
    Analytics(AnalyticsError),
}

impl OperationError {
    /// Whether the caller supplied unusable parameters, as opposed to a failure
    /// while computing.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Enrich(_))
    }
}

/// Enumerates and enriches every combination, indexed from 1.
pub fn generate_all(
    population: &Population,
    size: usize,
    config: &PropertyConfig,
) -> Result<Vec<CombinationRecord>, OperationError> {
    let generator = CombinationGenerator::new(population, size)?;
    let records = Enricher::standard(config).enrich(generator.all(), DEFAULT_START_INDEX)?;
    log::info!(
        "Generated all {} combinations of size {size} from {} members",
        records.len(),
        population.len()
    );
    Ok(records)
}

/// Draws `amount` combinations (repeats allowed) and enriches them from `start_index`.
pub fn generate_random(
    population: &Population,
    size: usize,
    amount: usize,
    start_index: u64,
    config: &PropertyConfig,
    sampler: &mut CombinationSampler,
) -> Result<Vec<CombinationRecord>, OperationError> {
    let generator = CombinationGenerator::new(population, size)?;
    log::info!("Sampling {amount} combinations with seed {}", sampler.seed());
    let combinations = generator.random(sampler, amount);
    let records = Enricher::standard(config).enrich(combinations, start_index)?;
    Ok(records)
}

/// Draws `amount` distinct combinations and enriches them from `start_index`.
pub fn generate_random_unique(
    population: &Population,
    size: usize,
    amount: usize,
    start_index: u64,
    config: &PropertyConfig,
    sampler: &mut CombinationSampler,
) -> Result<Vec<CombinationRecord>, OperationError> {
    let generator = CombinationGenerator::new(population, size)?;
    log::info!(
        "Sampling {amount} distinct combinations with seed {}",
        sampler.seed()
    );
    let combinations = generator.random_unique(sampler, amount)?;
    let records = Enricher::standard(config).enrich(combinations, start_index)?;
    Ok(records)
}

pub fn refresh_analytics<M, F>(
    records: &[CombinationRecord],
    key_members: &[M],
    filters: &[F],
) -> Result<AnalyticsReport, OperationError>
where
    M: AsRef<str>,
    F: AsRef<str>,
{
    let report = combina_analysis::refresh_analytics(records, key_members, filters)?;
    log::info!(
        "Refreshed analytics for {} key members over {} filters and {} records",
        report.len(),
        filters.len(),
        records.len()
    );
    Ok(report)
}
