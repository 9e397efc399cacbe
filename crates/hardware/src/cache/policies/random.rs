//! Random Replacement Policy.
//!
//! Evicts a uniformly random way once the set is full. Each instance owns a seeded
//! `StdRng`, so two levels built from the same seed make the same choices.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ReplacementPolicy;
use crate::cache::set::{CacheBlock, CacheSet};

/// Random policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a policy whose choices are fixed by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn select_victim(&mut self, set: &mut CacheSet, _now: u64) -> usize {
        if let Some(way) = set.first_invalid() {
            return way;
        }
        self.rng.random_range(0..set.ways())
    }

    /// Access history does not influence random replacement.
    fn on_access(&mut self, _block: &mut CacheBlock, _now: u64, _is_new: bool) {}
}
