use std::collections::HashSet;

use crate::{Combination, CombinationSampler, Combinations, GenerateError, Population};

/// Produces combinations of a fixed size from a population.
///
/// Construction validates `1 <= size <= population.len()`, so every strategy can
/// rely on a feasible size.
///
/// # Example
///
/// ```
/// use combina_engine::{CombinationGenerator, Population};
///
/// let population = Population::new(vec![1, 2, 3, 4]);
/// let generator = CombinationGenerator::new(&population, 2).unwrap();
///
/// let all = generator
///     .all()
///     .map(|c| c.to_string())
///     .collect::<Vec<_>>();
/// assert_eq!(all, ["1-2", "1-3", "1-4", "2-3", "2-4", "3-4"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CombinationGenerator<'a> {
    population: &'a Population,
    size: usize,
}

impl<'a> CombinationGenerator<'a> {
    pub fn new(population: &'a Population, size: usize) -> Result<Self, GenerateError> {
        if population.is_empty() {
            return Err(GenerateError::EmptyPopulation);
        }
        if size == 0 {
            return Err(GenerateError::ZeroSize);
        }
        if size > population.len() {
            return Err(GenerateError::SizeExceedsPopulation {
                size,
                population_len: population.len(),
            });
        }
        Ok(Self { population, size })
    }

    /// Number of distinct combinations, `C(n, size)`.
    ///
    /// Returns `None` if the count does not fit in a `u128`.
    #[must_use]
    pub fn count(&self) -> Option<u128> {
        binomial(self.population.len(), self.size)
    }

    /// Enumerates every combination exactly once, in lexicographic order of
    /// population positions.
    #[must_use]
    pub fn all(&self) -> Combinations<'a> {
        Combinations::new(self.population.members(), self.size)
    }

    /// Draws `amount` independent combinations. The same combination may appear
    /// more than once.
    pub fn random(&self, sampler: &mut CombinationSampler, amount: usize) -> Vec<Combination> {
        (0..amount)
            .map(|_| sampler.draw(self.population.members(), self.size))
            .collect()
    }

    /// Draws `amount` distinct combinations by rejection sampling.
    ///
    /// Combinations are returned in the order they were first drawn.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InfeasibleUniqueAmount`] if `amount` exceeds the number
    /// of distinct combinations, which would otherwise never terminate.
    pub fn random_unique(
        &self,
        sampler: &mut CombinationSampler,
        amount: usize,
    ) -> Result<Vec<Combination>, GenerateError> {
        if let Some(available) = self.count().filter(|&available| amount as u128 > available) {
            return Err(GenerateError::InfeasibleUniqueAmount {
                amount,
                size: self.size,
                population_len: self.population.len(),
                available,
            });
        }

        let mut seen = HashSet::with_capacity(amount);
        let mut combinations = Vec::with_capacity(amount);
        while combinations.len() < amount {
            let combination = sampler.draw(self.population.members(), self.size);
            if seen.insert(combination.clone()) {
                combinations.push(combination);
            }
        }
        Ok(combinations)
    }
}

/// Binomial coefficient `C(n, k)`.
///
/// Returns `Some(0)` when `k > n` and `None` when the result overflows `u128`.
///
/// ```
/// # use combina_engine::binomial;
/// assert_eq!(binomial(28, 6), Some(376_740));
/// assert_eq!(binomial(4, 5), Some(0));
/// ```
#[must_use]
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // C(n, i + 1) = C(n, i) * (n - i) / (i + 1), exact at every step
        result = result.checked_mul((n - i) as u128)? / (i + 1) as u128;
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SampleSeed;

    #[test]
    fn test_new_rejects_invalid_sizes() {
        let population = Population::range(3);
        assert_eq!(
            CombinationGenerator::new(&population, 0).unwrap_err(),
            GenerateError::ZeroSize
        );
        assert_eq!(
            CombinationGenerator::new(&population, 4).unwrap_err(),
            GenerateError::SizeExceedsPopulation {
                size: 4,
                population_len: 3
            }
        );
        assert_eq!(
            CombinationGenerator::new(&Population::default(), 1).unwrap_err(),
            GenerateError::EmptyPopulation
        );
    }

    #[test]
    fn test_all_yields_binomial_count_of_distinct_subsets() {
        let population = Population::range(10);
        let generator = CombinationGenerator::new(&population, 4).unwrap();
        let all = generator.all().collect::<Vec<_>>();
        assert_eq!(all.len() as u128, generator.count().unwrap());
        assert_eq!(all.len(), 210);
        let distinct = all.iter().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), all.len());
        assert!(all.iter().all(|c| c.len() == 4));
    }

    #[test]
    fn test_random_allows_repeats_and_respects_amount() {
        let population = Population::range(3);
        let generator = CombinationGenerator::new(&population, 3).unwrap();
        let mut sampler = CombinationSampler::new();
        let combinations = generator.random(&mut sampler, 5);
        assert_eq!(combinations.len(), 5);
        // Only one 3-subset exists, so every draw is the same.
        assert!(combinations.iter().all(|c| c.numbers() == [1, 2, 3]));
    }

    #[test]
    fn test_random_zero_amount_is_empty() {
        let population = Population::range(5);
        let generator = CombinationGenerator::new(&population, 2).unwrap();
        let mut sampler = CombinationSampler::new();
        assert!(generator.random(&mut sampler, 0).is_empty());
        assert!(generator.random_unique(&mut sampler, 0).unwrap().is_empty());
    }

    #[test]
    fn test_random_unique_exhausts_all_subsets() {
        let population = Population::range(6);
        let generator = CombinationGenerator::new(&population, 3).unwrap();
        let mut sampler = CombinationSampler::new();
        let unique = generator.random_unique(&mut sampler, 20).unwrap();
        let expected = generator.all().collect::<HashSet<_>>();
        let actual = unique.into_iter().collect::<HashSet<_>>();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_random_unique_rejects_infeasible_amount() {
        let population = Population::range(4);
        let generator = CombinationGenerator::new(&population, 2).unwrap();
        let mut sampler = CombinationSampler::new();
        assert_eq!(
            generator.random_unique(&mut sampler, 7).unwrap_err(),
            GenerateError::InfeasibleUniqueAmount {
                amount: 7,
                size: 2,
                population_len: 4,
                available: 6,
            }
        );
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let population = Population::range(28);
        let generator = CombinationGenerator::new(&population, 6).unwrap();
        let seed = SampleSeed::from_bytes([42; 16]);
        let first = generator.random_unique(&mut CombinationSampler::with_seed(seed), 50);
        let second = generator.random_unique(&mut CombinationSampler::with_seed(seed), 50);
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(4, 2), Some(6));
        assert_eq!(binomial(5, 0), Some(1));
        assert_eq!(binomial(5, 5), Some(1));
        assert_eq!(binomial(49, 6), Some(13_983_816));
        assert_eq!(binomial(1000, 500), None);
    }
}
