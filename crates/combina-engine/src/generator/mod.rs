//! Combination generation strategies.
//!
//! - [`CombinationGenerator::all`] - exhaustive, deterministic enumeration
//! - [`CombinationGenerator::random`] - independent random draws, repeats allowed
//! - [`CombinationGenerator::random_unique`] - distinct random draws (rejection sampling)

pub use self::{enumerate::*, sampler::*, strategy::*};

mod enumerate;
mod sampler;
mod strategy;
