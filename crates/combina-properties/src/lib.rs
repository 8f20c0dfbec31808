//! Property enrichment for combinations.
//!
//! A raw [`Combination`](combina_engine::Combination) carries only its members. This crate
//! derives structural attributes from it and packages both into a persistable
//! [`CombinationRecord`](record::CombinationRecord).
//!
//! # Architecture
//!
//! - [`property`] - the [`CombinationProperty`](property::CombinationProperty) trait and the
//!   standard property functions (`level_key`, `level_members`, `sequence_key`,
//!   `prime_count`, `boxes`)
//! - [`pipeline`] - an ordered list of property functions with distinct output keys
//! - [`record`] - the enriched record and its JSON shape
//! - [`enricher`] - applies a pipeline to a batch of combinations, assigning indices
//!
//! # Example
//!
//! ```
//! use combina_engine::Combination;
//! use combina_properties::{enricher::Enricher, property::PropertyConfig};
//!
//! let enricher = Enricher::standard(&PropertyConfig::default());
//! let records = enricher
//!     .enrich([Combination::new(vec![1, 2, 3, 7, 9, 10])], 1)
//!     .unwrap();
//!
//! let record = &records[0];
//! assert_eq!(record.index, 1);
//! assert_eq!(record.rendered_property("sequence_key").unwrap(), "3-1-2");
//! ```

pub mod enricher;
pub mod pipeline;
pub mod property;
pub mod record;
