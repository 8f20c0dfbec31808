//! Filter expressions over record properties.
//!
//! A filter is either the literal `all`, which matches every record, or a conjunction
//! of `key=value` clauses joined by `&`:
//!
//! ```text
//! level_key=2-2-1&prime_count=2
//! ```
//!
//! Each clause compares the record's property rendered as a string against `value`.
//! A clause naming a property the record does not carry does not match.

use std::{fmt, str::FromStr};

use combina_properties::record::CombinationRecord;

/// The filter string matching every record.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FilterParseError {
    #[display("malformed filter clause '{clause}' in '{filter}': expected key=value")]
    MissingSeparator { filter: String, clause: String },
    #[display("malformed filter clause '{clause}' in '{filter}': empty key")]
    EmptyKey { filter: String, clause: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub key: String,
    pub value: String,
}

/// A parsed filter expression.
///
/// ```
/// # use combina_analysis::filter::FilterExpr;
/// let filter: FilterExpr = "level_key=2-2-1&prime_count=2".parse().unwrap();
/// assert!(!filter.is_all());
///
/// assert!("all".parse::<FilterExpr>().unwrap().is_all());
/// assert!("level_key=2-2-1&bogus".parse::<FilterExpr>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    All,
    Clauses(Vec<FilterClause>),
}

impl FilterExpr {
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub fn matches(&self, record: &CombinationRecord) -> bool {
        match self {
            Self::All => true,
            Self::Clauses(clauses) => clauses.iter().all(|clause| {
                record
                    .rendered_property(&clause.key)
                    .is_some_and(|value| value == clause.value)
            }),
        }
    }
}

impl FromStr for FilterExpr {
    type Err = FilterParseError;

    fn from_str(filter: &str) -> Result<Self, Self::Err> {
        if filter.trim() == ALL {
            return Ok(Self::All);
        }
        filter
            .split('&')
            .map(|clause| {
                let Some((key, value)) = clause.split_once('=') else {
                    return Err(FilterParseError::MissingSeparator {
                        filter: filter.to_owned(),
                        clause: clause.to_owned(),
                    });
                };
                let key = key.trim();
                if key.is_empty() {
                    return Err(FilterParseError::EmptyKey {
                        filter: filter.to_owned(),
                        clause: clause.to_owned(),
                    });
                }
                Ok(FilterClause {
                    key: key.to_owned(),
                    value: value.trim().to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Clauses)
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Clauses(clauses) => {
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        f.write_str("&")?;
                    }
                    write!(f, "{}={}", clause.key, clause.value)?;
                }
                Ok(())
            }
        }
    }
}
