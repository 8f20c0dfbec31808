use serde::{Deserialize, Serialize};

/// The ordered draw universe combinations are taken from.
///
/// The population keeps members in the order the caller supplied them; that order
/// defines the lexicographic order of exhaustive enumeration. Uniqueness of members
/// is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Population(Vec<u32>);

impl Population {
    #[must_use]
    pub fn new(members: Vec<u32>) -> Self {
        Self(members)
    }

    /// Builds the population `1..=size`.
    ///
    /// ```
    /// # use combina_engine::Population;
    /// assert_eq!(Population::range(4).members(), &[1, 2, 3, 4]);
    /// ```
    #[must_use]
    pub fn range(size: u32) -> Self {
        (1..=size).collect()
    }

    #[must_use]
    pub fn members(&self) -> &[u32] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for Population {
    fn from(members: Vec<u32>) -> Self {
        Self::new(members)
    }
}

impl FromIterator<u32> for Population {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_starts_at_one() {
        let population = Population::range(3);
        assert_eq!(population.members(), &[1, 2, 3]);
        assert_eq!(population.len(), 3);
    }

    #[test]
    fn test_range_zero_is_empty() {
        assert!(Population::range(0).is_empty());
    }

    #[test]
    fn test_keeps_caller_order() {
        let population = Population::new(vec![9, 3, 5]);
        assert_eq!(population.members(), &[9, 3, 5]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let population = Population::new(vec![1, 2, 3]);
        let json = serde_json::to_string(&population).unwrap();
        assert_eq!(json, "[1,2,3]");
    }
}
