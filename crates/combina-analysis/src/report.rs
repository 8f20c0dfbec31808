//! Analytics report structures.
//!
//! # Serialization
//!
//! A report is a JSON array with one object per key member. Besides `key`, each object
//! holds one metrics block per filter, under `general` for the `all` filter and
//! `filter_NN` (filter position, two digits) otherwise:
//!
//! ```json
//! [
//!   {
//!     "key": "5",
//!     "general": {
//!       "filter": "all",
//!       "occurrences": 3,
//!       "mean": 2.5,
//!       "min": 2,
//!       "max": 3,
//!       "std_dev": 0.71,
//!       "top3": [2, 3]
//!     },
//!     "filter_01": { "filter": "level_key=2-2-1", "occurrences": 0, "...": "..." }
//!   }
//! ]
//! ```

use std::collections::BTreeMap;

use combina_stats::{
    descriptive::{DescriptiveStats, round_to},
    frequency::most_frequent,
};
use serde::{Deserialize, Serialize};

use crate::filter::FilterExpr;

/// Label of the metrics block produced by the `all` filter.
pub const GENERAL_LABEL: &str = "general";

/// Number of most frequent deltas kept per metrics block.
pub const TOP_DELTAS: usize = 3;

const DECIMALS: i32 = 2;

/// Returns the block label for the filter at `position` in the filter list.
///
/// ```
/// # use combina_analysis::{filter::FilterExpr, report::metrics_label};
/// assert_eq!(metrics_label(0, &FilterExpr::All), "general");
/// assert_eq!(metrics_label(3, &"prime_count=2".parse().unwrap()), "filter_03");
/// ```
#[must_use]
pub fn metrics_label(position: usize, filter: &FilterExpr) -> String {
    if filter.is_all() {
        GENERAL_LABEL.to_owned()
    } else {
        format!("filter_{position:02}")
    }
}

/// Re-occurrence statistics of one key member under one filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBlock {
    /// The filter string this block was computed for.
    pub filter: String,
    /// Number of filtered records containing the member.
    pub occurrences: usize,
    pub mean: f64,
    pub min: u64,
    pub max: u64,
    /// Sample standard deviation; `0` with fewer than two deltas.
    pub std_dev: f64,
    /// Most frequent deltas, ties broken by ascending delta.
    pub top3: Vec<u64>,
}

impl MetricsBlock {
    /// Summarizes the gaps between consecutive dynamic indices.
    ///
    /// `mean` and `std_dev` are rounded to two decimals. Every statistic is zero when
    /// there are no deltas.
    #[expect(clippy::cast_precision_loss)]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_deltas(filter: &str, occurrences: usize, deltas: &[u64]) -> Self {
        let stats = DescriptiveStats::new(deltas.iter().map(|&d| d as f64));
        let (mean, min, max, std_dev) = match stats {
            Some(stats) => (
                round_to(stats.mean, DECIMALS),
                stats.min as u64,
                stats.max as u64,
                stats.std_dev.map_or(0.0, |sd| round_to(sd, DECIMALS)),
            ),
            None => (0.0, 0, 0, 0.0),
        };
        Self {
            filter: filter.to_owned(),
            occurrences,
            mean,
            min,
            max,
            std_dev,
            top3: most_frequent(deltas.iter().copied(), TOP_DELTAS),
        }
    }
}

/// All metrics blocks of one key member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberReport {
    /// The member in decimal form.
    pub key: String,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, MetricsBlock>,
}

impl MemberReport {
    #[must_use]
    pub fn new(key: String) -> Self {
        Self {
            key,
            metrics: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn general(&self) -> Option<&MetricsBlock> {
        self.metrics.get(GENERAL_LABEL)
    }
}

/// Per-member analytics, in key member order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyticsReport {
    pub members: Vec<MemberReport>,
}

impl AnalyticsReport {
    #[must_use]
    pub fn member(&self, key: &str) -> Option<&MemberReport> {
        self.members.iter().find(|m| m.key == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
