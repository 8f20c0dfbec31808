//! Combination generation over a numbered population.
//!
//! - [`Population`] - the ordered draw universe
//! - [`Combination`] - a sorted, fixed-size selection from a population
//! - [`CombinationGenerator`] - exhaustive enumeration and random sampling strategies
//! - [`CombinationSampler`] / [`SampleSeed`] - reproducible random source for sampling
//!
//! # Example
//!
//! ```
//! use combina_engine::{CombinationGenerator, CombinationSampler, Population};
//!
//! let population = Population::range(6);
//! let generator = CombinationGenerator::new(&population, 3).unwrap();
//!
//! assert_eq!(generator.all().count(), 20);
//!
//! let mut sampler = CombinationSampler::new();
//! let unique = generator.random_unique(&mut sampler, 20).unwrap();
//! assert_eq!(unique.len(), 20);
//! ```

pub use self::{core::*, generator::*};

pub mod core;
pub mod generator;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerateError {
    #[display("population is empty")]
    EmptyPopulation,
    #[display("combination size must be at least 1")]
    ZeroSize,
    #[display("combination size {size} exceeds population length {population_len}")]
    SizeExceedsPopulation { size: usize, population_len: usize },
    #[display(
        "cannot draw {amount} distinct combinations of size {size} from {population_len} members ({available} possible)"
    )]
    InfeasibleUniqueAmount {
        amount: usize,
        size: usize,
        population_len: usize,
        available: u128,
    },
}
