use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::index,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Combination;

/// Seed for reproducible combination sampling.
///
/// A 128-bit (16-byte) seed that initializes the random number generator of a
/// [`CombinationSampler`]. Using the same seed with the same population, size and
/// amount produces the same sampled dataset.
///
/// Serialized and parsed as a 32-character hex string.
///
/// ```
/// use combina_engine::SampleSeed;
/// use rand::Rng as _;
///
/// let seed: SampleSeed = rand::rng().random();
/// let parsed: SampleSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSeed([u8; 16]);

impl SampleSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for SampleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for SampleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SampleSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SampleSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `SampleSeed` values with `rng.random()`.
impl Distribution<SampleSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SampleSeed(seed)
    }
}

/// Random source for the sampling strategies of
/// [`CombinationGenerator`](crate::CombinationGenerator).
#[derive(Debug, Clone)]
pub struct CombinationSampler {
    seed: SampleSeed,
    rng: Pcg32,
}

impl Default for CombinationSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl CombinationSampler {
    /// Creates a sampler with a seed drawn from the thread RNG.
    ///
    /// For reproducible output, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: SampleSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Returns the seed this sampler was created with.
    #[must_use]
    pub fn seed(&self) -> SampleSeed {
        self.seed
    }

    /// Draws `size` distinct positions of `members` uniformly and returns them as a
    /// sorted combination.
    ///
    /// # Panics
    ///
    /// Panics if `size > members.len()`.
    pub fn draw(&mut self, members: &[u32], size: usize) -> Combination {
        let picked = index::sample(&mut self.rng, members.len(), size);
        Combination::new(picked.iter().map(|i| members[i]).collect())
    }
}
