//! Re-occurrence analytics over enriched combination records.
//!
//! For every key member and every filter, the engine numbers the records passing the filter
//! and measures the gaps ("deltas") between consecutive records containing the member.
//!
//! - [`filter`] - parsing and evaluation of `all` / `key=value&...` filter expressions
//! - [`analytics`] - the [`AnalyticsEngine`](analytics::AnalyticsEngine) and
//!   [`refresh_analytics`]
//! - [`report`] - per-member metrics blocks and their JSON shape

pub use self::analytics::{AnalyticsEngine, AnalyticsError, refresh_analytics};

pub mod analytics;
pub mod filter;
pub mod report;
