//! Combination property functions.
//!
//! Each property function maps a combination (and the index it is being enriched at)
//! to a single value stored under a fixed output key.
//!
//! # Standard Properties
//!
//! [`standard_properties`] returns the fixed pipeline order:
//!
//! - [`source::LevelKey`] - member count per band of 10 (`"2-2-1"`)
//! - [`source::LevelMembers`] - members per non-empty band (`[{"LkM01": "1-8"}]`)
//! - [`source::SequenceKey`] - lengths of runs of consecutive members (`"3-1-2"`)
//! - [`source::PrimeCount`] - number of prime members (`"2"`)
//! - [`source::Boxes`] - index-derived box coordinates at sizes 10, 100 and 1000
//!
//! # Values
//!
//! [`PropertyValue`] covers every shape a property may take in a persisted record. Filter
//! expressions compare against [`PropertyValue::render`].

use std::{borrow::Cow, collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

pub use self::source::{BoxedCombinationProperty, CombinationProperty, standard_properties};

pub mod source;

/// Default upper bound of the population used to band members by level.
pub const DEFAULT_POPULATION_SIZE: u32 = 28;

/// Explicit configuration for the standard property functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyConfig {
    /// Upper bound of the population. There are `population_size / 10 + 1` level bands:
    /// `0..=10`, `11..=20`, ...
    pub population_size: u32,
}

impl Default for PropertyConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
        }
    }
}

/// What a property function sees of the record being enriched.
#[derive(Debug, Clone, Copy)]
pub struct PropertyInput<'a> {
    /// 1-based record index.
    pub index: u64,
    /// Members, sorted ascending.
    pub numbers: &'a [u32],
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PropertyError {
    #[display("record index must be at least 1, got {index}")]
    InvalidIndex { index: u64 },
    #[display("box size must be at least 1")]
    ZeroBoxSize,
}

/// Position of a record inside a box of `size` consecutive indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxPosition {
    pub size: u64,
    pub box_number: u64,
    pub position_in_box: u64,
}

/// A derived property value as stored in a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
    /// Single-key maps, e.g. `[{"LkM01": "1-8"}, {"LkM02": "11-14"}]`.
    Members(Vec<BTreeMap<String, String>>),
    Boxes(Vec<BoxPosition>),
    /// Any other JSON found in a stored record, kept verbatim.
    Other(serde_json::Value),
}

impl PropertyValue {
    /// Renders the value as the string filter clauses compare against.
    ///
    /// Text is returned as is, integers in decimal, anything else as compact JSON.
    #[must_use]
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            _ => Cow::Owned(self.to_string()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            _ => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<String> for PropertyValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_and_integer() {
        assert_eq!(PropertyValue::Text("2-2-1".into()).render(), "2-2-1");
        assert_eq!(PropertyValue::Integer(3).render(), "3");
    }

    #[test]
    fn test_render_members_as_compact_json() {
        let value = PropertyValue::Members(vec![BTreeMap::from([(
            "LkM01".to_owned(),
            "1-8".to_owned(),
        )])]);
        assert_eq!(value.render(), r#"[{"LkM01":"1-8"}]"#);
    }

    #[test]
    fn test_untagged_deserialization_picks_narrowest_shape() {
        let text: PropertyValue = serde_json::from_str(r#""3-1""#).unwrap();
        assert_eq!(text, PropertyValue::Text("3-1".into()));

        let members: PropertyValue = serde_json::from_str(r#"[{"LkM02":"11-14"}]"#).unwrap();
        assert!(matches!(members, PropertyValue::Members(_)));

        let boxes: PropertyValue =
            serde_json::from_str(r#"[{"size":10,"box_number":1,"position_in_box":3}]"#).unwrap();
        assert_eq!(
            boxes,
            PropertyValue::Boxes(vec![BoxPosition {
                size: 10,
                box_number: 1,
                position_in_box: 3
            }])
        );

        let other: PropertyValue = serde_json::from_str("1.5").unwrap();
        assert!(matches!(other, PropertyValue::Other(_)));
    }
}
