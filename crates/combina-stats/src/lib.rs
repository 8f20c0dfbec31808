//! Statistical utilities for combination analytics.
//!
//! - **Descriptive statistics**: minimum, maximum, mean, sample variance and standard deviation
//! - **Frequency ranking**: most frequent values with deterministic tie-breaking
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`frequency`]: Frequency counting and top-N ranking
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use combina_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([3.0, 2.0]).unwrap();
//! assert_eq!(stats.mean, 2.5);
//! assert_eq!(stats.min, 2.0);
//! ```
//!
//! ## Ranking frequent values
//!
//! ```
//! use combina_stats::frequency::most_frequent;
//!
//! assert_eq!(most_frequent([4, 2, 4, 3, 2], 2), vec![2, 4]);
//! ```

pub mod descriptive;
pub mod frequency;
