//! Enriched combination records.
//!
//! # Serialization
//!
//! A record is a flat JSON object: `index`, `numbers`, and one key per derived property.
//! Property keys are written in sorted order, so decoding a stored collection and
//! encoding it again reproduces the same document.
//!
//! ```json
//! {
//!   "index": 1,
//!   "numbers": [1, 2, 3, 7, 9, 10],
//!   "boxes": [
//!     { "size": 10, "box_number": 1, "position_in_box": 1 },
//!     { "size": 100, "box_number": 1, "position_in_box": 1 },
//!     { "size": 1000, "box_number": 1, "position_in_box": 1 }
//!   ],
//!   "level_key": "6-0-0",
//!   "level_members": [{ "LkM01": "1-2-3-7-9-10" }],
//!   "prime_count": "3",
//!   "sequence_key": "3-1-2"
//! }
//! ```

use std::{borrow::Cow, collections::BTreeMap};

use serde::{Deserialize, Serialize};

use crate::property::PropertyValue;

/// A combination with its index and derived properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationRecord {
    /// 1-based position of the record in its collection.
    pub index: u64,
    /// Members, sorted ascending.
    pub numbers: Vec<u32>,
    #[serde(flatten)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl CombinationRecord {
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Returns the value of `key` rendered for filter comparison.
    ///
    /// `index` resolves to the record index; every other key is looked up in the
    /// property map.
    #[must_use]
    pub fn rendered_property(&self, key: &str) -> Option<Cow<'_, str>> {
        if key == "index" {
            return Some(Cow::Owned(self.index.to_string()));
        }
        self.property(key).map(PropertyValue::render)
    }

    #[must_use]
    pub fn contains(&self, member: u32) -> bool {
        self.numbers.contains(&member)
    }
}
