/// Descriptive statistics summarizing a dataset.
///
/// Dispersion is measured with the *sample* variance (Bessel's correction, `n - 1`
/// denominator), which is undefined for a single value; in that case `variance` and
/// `std_dev` are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The sample variance, if the dataset has at least two values.
    pub variance: Option<f64>,
    /// The sample standard deviation, if the dataset has at least two values.
    pub std_dev: Option<f64>,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from values in any order.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use combina_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.min, 2.0);
    /// assert_eq!(stats.max, 9.0);
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.variance, Some(32.0 / 7.0));
    ///
    /// assert!(DescriptiveStats::new([]).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let first = *values.first()?;
        let (min, max) = values
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)));
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = (count >= 2).then(|| {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64
        });
        let std_dev = variance.map(f64::sqrt);

        Some(Self {
            count,
            min,
            max,
            mean,
            variance,
            std_dev,
        })
    }
}

/// Rounds `value` to `decimals` decimal places (half away from zero).
///
/// ```
/// # use combina_stats::descriptive::round_to;
/// assert_eq!(round_to(0.707_106_78, 2), 0.71);
/// assert_eq!(round_to(2.5, 0), 3.0);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new(Vec::new()).is_none());
    }

    #[test]
    fn test_single_value_has_no_dispersion() {
        let stats = DescriptiveStats::new([4.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 4.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.variance, None);
        assert_eq!(stats.std_dev, None);
    }

    #[test]
    fn test_sample_std_dev_of_two_values() {
        let stats = DescriptiveStats::new([3.0, 2.0]).unwrap();
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.variance, Some(0.5));
        assert_eq!(round_to(stats.std_dev.unwrap(), 2), 0.71);
    }

    #[test]
    fn test_unsorted_input() {
        let stats = DescriptiveStats::new([5.0, 1.0, 3.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.variance, Some(4.0));
        assert_eq!(stats.std_dev, Some(2.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.345_1, 2), 2.35);
        assert_eq!(round_to(2.0, 2), 2.0);
        assert_eq!(round_to(1.0 / 3.0, 2), 0.33);
    }
}
