use std::collections::BTreeMap;

/// Counts occurrences of each distinct value, keyed in ascending value order.
#[must_use]
pub fn frequencies<I, T>(values: I) -> BTreeMap<T, usize>
where
    I: IntoIterator<Item = T>,
    T: Ord,
{
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Returns up to `n` distinct values ordered by descending frequency.
///
/// Values with equal frequency are ordered by ascending value, so the result is
/// deterministic for any input order.
///
/// ```
/// # use combina_stats::frequency::most_frequent;
/// assert_eq!(most_frequent([3, 1, 3, 2, 1, 5], 3), vec![1, 3, 2]);
/// assert_eq!(most_frequent(Vec::<u32>::new(), 3), Vec::<u32>::new());
/// ```
#[must_use]
pub fn most_frequent<I, T>(values: I, n: usize) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Ord,
{
    let mut ranked = frequencies(values).into_iter().collect::<Vec<_>>();
    // stable sort keeps ascending value order among equal counts
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
    ranked.into_iter().take(n).map(|(value, _)| value).collect()
}
