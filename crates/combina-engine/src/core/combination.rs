use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed-size selection of population members.
///
/// Members are always stored sorted ascending, so two combinations compare equal
/// exactly when they hold the same members. The JSON form is a plain array of
/// integers; deserialization sorts the array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct Combination(Vec<u32>);

impl Combination {
    /// Creates a combination from members in any order.
    ///
    /// ```
    /// # use combina_engine::Combination;
    /// let combination = Combination::new(vec![7, 1, 3]);
    /// assert_eq!(combination.numbers(), &[1, 3, 7]);
    /// ```
    #[must_use]
    pub fn new(mut members: Vec<u32>) -> Self {
        members.sort_unstable();
        Self(members)
    }

    /// Returns the members in ascending order.
    #[must_use]
    pub fn numbers(&self) -> &[u32] {
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

    #[must_use]
    pub fn contains(&self, member: u32) -> bool {
        self.0.binary_search(&member).is_ok()
    }

    #[must_use]
    pub fn into_numbers(self) -> Vec<u32> {
        self.0
    }
}

impl From<Vec<u32>> for Combination {
    fn from(members: Vec<u32>) -> Self {
        Self::new(members)
    }
}

impl From<Combination> for Vec<u32> {
    fn from(combination: Combination) -> Self {
        combination.0
    }
}

/// Formats the members joined with `-`, e.g. `1-3-7`.
impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_members() {
        let combination = Combination::new(vec![22, 1, 14, 8]);
        assert_eq!(combination.numbers(), &[1, 8, 14, 22]);
    }

    #[test]
    fn test_equality_ignores_input_order() {
        assert_eq!(Combination::new(vec![3, 1, 2]), Combination::new(vec![1, 2, 3]));
    }

    #[test]
    fn test_contains() {
        let combination = Combination::new(vec![5, 10, 15]);
        assert!(combination.contains(10));
        assert!(!combination.contains(11));
    }

    #[test]
    fn test_display_joins_with_dash() {
        let combination = Combination::new(vec![9, 2, 30]);
        assert_eq!(combination.to_string(), "2-9-30");
    }

    #[test]
    fn test_deserialize_sorts() {
        let combination: Combination = serde_json::from_str("[4, 2, 3]").unwrap();
        assert_eq!(combination.numbers(), &[2, 3, 4]);
        assert_eq!(serde_json::to_string(&combination).unwrap(), "[2,3,4]");
    }
}
