use std::collections::HashSet;

use combina_properties::record::CombinationRecord;

use crate::{
    filter::{FilterExpr, FilterParseError},
    report::{AnalyticsReport, MemberReport, MetricsBlock, metrics_label},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AnalyticsError {
    #[display("{_0}")]
    Filter(FilterParseError),
    #[display("key member '{member}' is not an integer")]
    #[from(ignore)]
    InvalidKeyMember { member: String },
}

/// A member whose re-occurrence rhythm is analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyMember(i64);

impl KeyMember {
    /// Coerces a key member given as text to an integer.
    pub fn parse(member: &str) -> Result<Self, AnalyticsError> {
        member
            .trim()
            .parse()
            .map(Self)
            .map_err(|_| AnalyticsError::InvalidKeyMember {
                member: member.to_owned(),
            })
    }

    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }

    fn is_in(self, record: &CombinationRecord) -> bool {
        u32::try_from(self.0).is_ok_and(|member| record.contains(member))
    }
}

/// Gaps between consecutive dynamic indices at which `member` appears in `filtered`.
///
/// Dynamic indices are 1-based positions inside `filtered`. Returns the number of
/// matching records along with the deltas.
fn member_deltas(filtered: &[&CombinationRecord], member: KeyMember) -> (usize, Vec<u64>) {
    let dynamic_indices = filtered
        .iter()
        .zip(1_u64..)
        .filter(|(record, _)| member.is_in(record))
        .map(|(_, dynamic_index)| dynamic_index)
        .collect::<Vec<_>>();
    let deltas = dynamic_indices.windows(2).map(|w| w[1] - w[0]).collect();
    (dynamic_indices.len(), deltas)
}

/// Computes re-occurrence statistics over a record collection.
///
/// For each filter, the records passing it are numbered 1, 2, ... in collection
/// order. These dynamic indices live only for that filter pass; the records
/// themselves are never modified.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsEngine<'a> {
    records: &'a [CombinationRecord],
}

impl<'a> AnalyticsEngine<'a> {
    #[must_use]
    pub fn new(records: &'a [CombinationRecord]) -> Self {
        Self { records }
    }

    /// Records passing `filter`, in collection order.
    #[must_use]
    pub fn filtered(&self, filter: &FilterExpr) -> Vec<&'a CombinationRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Builds the report for `key_members` under every filter in `filters`.
    ///
    /// All key members and filters are validated before any statistics are
    /// computed, so an invalid input yields no partial report.
    pub fn refresh<M, F>(
        &self,
        key_members: &[M],
        filters: &[F],
    ) -> Result<AnalyticsReport, AnalyticsError>
    where
        M: AsRef<str>,
        F: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut members = vec![];
        for member in key_members {
            let member = KeyMember::parse(member.as_ref())?;
            if seen.insert(member) {
                members.push(member);
            }
        }
        let filters = filters
            .iter()
            .map(|filter| {
                let filter = filter.as_ref();
                filter.parse::<FilterExpr>().map(|expr| (filter, expr))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut reports = members
            .iter()
            .map(|member| MemberReport::new(member.value().to_string()))
            .collect::<Vec<_>>();

        for (position, (filter, expr)) in filters.iter().enumerate() {
            let filtered = self.filtered(expr);
            let label = metrics_label(position, expr);
            log::debug!(
                "filter {label} ({filter}): {} of {} records",
                filtered.len(),
                self.records.len()
            );
            for (member, report) in members.iter().zip(&mut reports) {
                let (occurrences, deltas) = member_deltas(&filtered, *member);
                report.metrics.insert(
                    label.clone(),
                    MetricsBlock::from_deltas(filter, occurrences, &deltas),
                );
            }
        }

        Ok(AnalyticsReport { members: reports })
    }
}

/// Computes the analytics report for `records`.
///
/// See [`AnalyticsEngine::refresh`].
///
/// # Example
///
/// ```
/// use combina_analysis::refresh_analytics;
/// use combina_engine::{CombinationGenerator, Population};
/// use combina_properties::enricher::Enricher;
///
/// let population = Population::range(6);
/// let generator = CombinationGenerator::new(&population, 3).unwrap();
/// let records = Enricher::default().enrich(generator.all(), 1).unwrap();
///
/// let report = refresh_analytics(&records, &["1", "6"], &["all", "sequence_key=3"]).unwrap();
/// let general = report.member("1").unwrap().general().unwrap();
/// assert_eq!(general.occurrences, 10);
/// ```
pub fn refresh_analytics<M, F>(
    records: &[CombinationRecord],
    key_members: &[M],
    filters: &[F],
) -> Result<AnalyticsReport, AnalyticsError>
where
    M: AsRef<str>,
    F: AsRef<str>,
{
    AnalyticsEngine::new(records).refresh(key_members, filters)
}
