use std::collections::{BTreeMap, HashSet};

use crate::property::{
    BoxedCombinationProperty, CombinationProperty as _, PropertyConfig, PropertyError,
    PropertyInput, PropertyValue, standard_properties,
};

/// Keys every record carries outside its property map.
pub const RESERVED_KEYS: [&str; 2] = ["index", "numbers"];

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PipelineError {
    #[display("property key '{key}' is produced by more than one property function")]
    DuplicateKey { key: String },
    #[display("property key '{key}' is reserved for the record itself")]
    ReservedKey { key: String },
}

/// Failure of one property function, tagged with the property that raised it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("property '{property}' failed: {source}")]
pub struct PropertyFailure {
    pub property: String,
    pub source: PropertyError,
}

/// An ordered list of property functions with distinct output keys.
///
/// Functions run in list order and each writes its own key, so no property can
/// overwrite another. Key uniqueness is checked once, when the pipeline is built.
#[derive(Debug, Clone)]
pub struct PropertyPipeline {
    properties: Vec<BoxedCombinationProperty>,
}

impl PropertyPipeline {
    pub fn new(properties: Vec<BoxedCombinationProperty>) -> Result<Self, PipelineError> {
        {
            let mut seen = HashSet::new();
            for property in &properties {
                let key = property.id();
                if RESERVED_KEYS.contains(&key) {
                    return Err(PipelineError::ReservedKey {
                        key: key.to_owned(),
                    });
                }
                if !seen.insert(key) {
                    return Err(PipelineError::DuplicateKey {
                        key: key.to_owned(),
                    });
                }
            }
        }
        Ok(Self { properties })
    }

    /// The standard pipeline: `level_key`, `level_members`, `sequence_key`,
    /// `prime_count`, `boxes`.
    ///
    /// # Panics
    ///
    /// Panics if the standard properties ever share an output key.
    #[must_use]
    pub fn standard(config: &PropertyConfig) -> Self {
        Self::new(standard_properties(config)).expect("standard properties have distinct keys")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.iter().map(|p| p.id())
    }

    /// Runs every property function in order and collects the values by key.
    pub fn compute(
        &self,
        input: &PropertyInput<'_>,
    ) -> Result<BTreeMap<String, PropertyValue>, PropertyFailure> {
        self.properties
            .iter()
            .map(|property| {
                property
                    .compute(input)
                    .map(|value| (property.id().to_owned(), value))
                    .map_err(|source| PropertyFailure {
                        property: property.id().to_owned(),
                        source,
                    })
            })
            .collect()
    }
}

impl Default for PropertyPipeline {
    fn default() -> Self {
        Self::standard(&PropertyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::source::{Boxes, LevelKey, PrimeCount, SequenceKey};

    #[derive(Debug, Clone)]
    struct Named(&'static str);

    impl crate::property::CombinationProperty for Named {
        fn id(&self) -> &str {
            self.0
        }
        fn name(&self) -> &str {
            self.0
        }
        fn clone_boxed(&self) -> BoxedCombinationProperty {
            Box::new(self.clone())
        }
        fn compute(&self, _input: &PropertyInput<'_>) -> Result<PropertyValue, PropertyError> {
            Ok(PropertyValue::Integer(0))
        }
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let result = PropertyPipeline::new(vec![
            Box::new(LevelKey::new(28)),
            Box::new(PrimeCount),
            Box::new(LevelKey::new(39)),
        ]);
        assert_eq!(
            result.unwrap_err(),
            PipelineError::DuplicateKey {
                key: "level_key".to_owned()
            }
        );
    }

    #[test]
    fn test_rejects_reserved_keys() {
        let result = PropertyPipeline::new(vec![Box::new(Named("numbers"))]);
        assert_eq!(
            result.unwrap_err(),
            PipelineError::ReservedKey {
                key: "numbers".to_owned()
            }
        );
    }

    #[test]
    fn test_standard_keys_in_order() {
        let pipeline = PropertyPipeline::default();
        assert_eq!(
            pipeline.keys().collect::<Vec<_>>(),
            ["level_key", "level_members", "sequence_key", "prime_count", "boxes"]
        );
    }

    #[test]
    fn test_compute_collects_all_keys() {
        let pipeline =
            PropertyPipeline::new(vec![Box::new(SequenceKey), Box::new(PrimeCount)]).unwrap();
        let values = pipeline
            .compute(&PropertyInput {
                index: 1,
                numbers: &[2, 3, 4],
            })
            .unwrap();
        assert_eq!(values["sequence_key"].render(), "3");
        assert_eq!(values["prime_count"].render(), "2");
    }

    #[test]
    fn test_compute_reports_failing_property() {
        let pipeline = PropertyPipeline::new(vec![
            Box::new(SequenceKey),
            Box::new(Boxes::new(vec![10])),
        ])
        .unwrap();
        let failure = pipeline
            .compute(&PropertyInput {
                index: 0,
                numbers: &[1],
            })
            .unwrap_err();
        assert_eq!(failure.property, "boxes");
        assert_eq!(failure.source, PropertyError::InvalidIndex { index: 0 });
    }
}
