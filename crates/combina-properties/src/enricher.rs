use combina_engine::Combination;

use crate::{
    pipeline::{PropertyFailure, PropertyPipeline},
    property::{PropertyConfig, PropertyInput},
    record::CombinationRecord,
};

/// Default index of the first record in a new collection.
pub const DEFAULT_START_INDEX: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("failed to enrich record {index}: {source}")]
pub struct EnrichError {
    pub index: u64,
    pub source: PropertyFailure,
}

/// Turns raw combinations into indexed, enriched records.
#[derive(Debug, Clone, Default)]
pub struct Enricher {
    pipeline: PropertyPipeline,
}

impl Enricher {
    #[must_use]
    pub fn new(pipeline: PropertyPipeline) -> Self {
        Self { pipeline }
    }

    /// Enricher running the standard property pipeline.
    #[must_use]
    pub fn standard(config: &PropertyConfig) -> Self {
        Self::new(PropertyPipeline::standard(config))
    }

    /// Builds the record for a single combination at `index`.
    pub fn enrich_one(
        &self,
        combination: &Combination,
        index: u64,
    ) -> Result<CombinationRecord, EnrichError> {
        let numbers = combination.numbers();
        let properties = self
            .pipeline
            .compute(&PropertyInput { index, numbers })
            .map_err(|source| EnrichError { index, source })?;
        Ok(CombinationRecord {
            index,
            numbers: numbers.to_vec(),
            properties,
        })
    }

    /// Enriches a batch, assigning indices `start_index, start_index + 1, ...` in
    /// input order.
    ///
    /// The batch fails as a whole: if any record fails, no records are returned.
    pub fn enrich<I>(
        &self,
        combinations: I,
        start_index: u64,
    ) -> Result<Vec<CombinationRecord>, EnrichError>
    where
        I: IntoIterator<Item = Combination>,
    {
        let records = combinations
            .into_iter()
            .zip(start_index..)
            .map(|(combination, index)| self.enrich_one(&combination, index))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "enriched {} records starting at index {start_index}",
            records.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use combina_engine::{CombinationGenerator, Population};

    use super::*;
    use crate::property::PropertyValue;

    #[test]
    fn test_indices_are_contiguous_from_start_index() {
        let population = Population::range(8);
        let generator = CombinationGenerator::new(&population, 3).unwrap();
        let records = Enricher::default().enrich(generator.all(), 41).unwrap();
        assert_eq!(records.len(), 56);
        let indices = records.iter().map(|r| r.index).collect::<Vec<_>>();
        assert_eq!(indices, (41..97).collect::<Vec<_>>());
    }

    #[test]
    fn test_record_carries_sorted_numbers_and_standard_properties() {
        let enricher = Enricher::standard(&PropertyConfig::default());
        let record = enricher
            .enrich_one(&Combination::new(vec![22, 14, 1, 11, 8, 27]), 1)
            .unwrap();
        assert_eq!(record.numbers, [1, 8, 11, 14, 22, 27]);
        assert_eq!(record.rendered_property("level_key").unwrap(), "2-2-2");
        assert_eq!(record.rendered_property("sequence_key").unwrap(), "1-1-1-1-1-1");
        assert_eq!(record.rendered_property("prime_count").unwrap(), "1");
        assert!(matches!(record.property("boxes"), Some(PropertyValue::Boxes(b)) if b.len() == 3));
        assert!(matches!(record.property("level_members"), Some(PropertyValue::Members(m)) if m.len() == 3));
    }

    #[test]
    fn test_enrichment_is_deterministic() {
        let enricher = Enricher::default();
        let combination = Combination::new(vec![3, 5, 6, 19, 20, 28]);
        assert_eq!(
            enricher.enrich_one(&combination, 12).unwrap(),
            enricher.enrich_one(&combination, 12).unwrap()
        );
    }

    #[test]
    fn test_failure_aborts_whole_batch() {
        let combinations = vec![Combination::new(vec![1, 2]), Combination::new(vec![3, 4])];
        let err = Enricher::default().enrich(combinations, 0).unwrap_err();
        assert_eq!(err.index, 0);
        assert_eq!(err.source.property, "boxes");
    }

    #[test]
    fn test_empty_batch() {
        let records = Enricher::default()
            .enrich(Vec::new(), DEFAULT_START_INDEX)
            .unwrap();
        assert!(records.is_empty());
    }
}
