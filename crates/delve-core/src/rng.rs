//! Random number generation for the character engine.
//!
//! Uses a seeded ChaCha RNG for reproducibility (save/restore). All rule
//! code draws through the [`RollSource`] trait so tests can substitute a
//! scripted sequence of rolls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Bounded-distribution roll contract consumed by every rule formula.
///
/// `rn2(n)` is uniform over `0..n`; everything else is derived from it.
pub trait RollSource {
    /// Uniform roll in `0..n`. Returns 0 if n is 0.
    fn rn2(&mut self, n: u32) -> u32;

    /// Uniform roll in `1..=n`. Returns 0 if n is 0.
    fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 { 0 } else { self.rn2(n) + 1 }
    }

    /// Roll n dice with m sides and sum them.
    fn dice(&mut self, n: u32, m: u32) -> u32 {
        (0..n).map(|_| self.rnd(m)).sum()
    }

    /// True with probability 1/n.
    fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }

    /// True with probability percent/100.
    fn percent(&mut self, percent: u32) -> bool {
        self.rn2(100) < percent
    }
}

/// Game random number generator.
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// RNG state is not serialized - restored games recreate the stream from
/// the original seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RollSource for GameRng {
    fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Deterministic roll source fed from a fixed script.
///
/// Each `rn2` call pops the next scripted value verbatim; the script author
/// is responsible for keeping values inside the requested bound. Panics
/// when the script runs dry, which in a test pinpoints the draw that was
/// not accounted for.
#[derive(Debug, Default)]
pub struct ScriptedRolls {
    rolls: std::collections::VecDeque<u32>,
}

impl ScriptedRolls {
    pub fn new(rolls: &[u32]) -> Self {
        Self {
            rolls: rolls.iter().copied().collect(),
        }
    }

    /// Queue more rolls onto the end of the script.
    pub fn push(&mut self, rolls: &[u32]) {
        self.rolls.extend(rolls.iter().copied());
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RollSource for ScriptedRolls {
    fn rn2(&mut self, n: u32) -> u32 {
        let value = self
            .rolls
            .pop_front()
            .expect("scripted roll sequence exhausted");
        debug_assert!(n == 0 || value < n, "scripted roll {value} out of range 0..{n}");
        value
    }
}
