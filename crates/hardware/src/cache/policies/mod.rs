//! Cache Replacement Policies.
//!
//! Implements the algorithms that pick a victim block in a full set and the
//! bookkeeping each one performs after every access.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Fifo`: First-In, First-Out.
//! - `Random`: Uniform random selection.
//! - `Lfu`: Least Frequently Used.
//! - `Mru`: Most Recently Used.
//! - `RoundRobin`: Circular pointer.
//! - `SecondChance`: Circular scan with a reference bit.
//! - `Lfru`: Weighted frequency/recency hybrid.
//!
//! Every policy returns the first empty way (in set order) while one exists and only
//! applies its own rule once the set is full.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Weighted frequency/recency replacement policy.
pub mod lfru;

/// Least Frequently Used replacement policy.
pub mod lfu;

/// Least Recently Used replacement policy.
pub mod lru;

/// Most Recently Used replacement policy.
pub mod mru;

/// Random replacement policy.
pub mod random;

/// Round-robin replacement policy.
pub mod round_robin;

/// Second Chance (clock) replacement policy.
pub mod second_chance;

use std::fmt;

pub use fifo::FifoPolicy;
pub use lfru::LfruPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use mru::MruPolicy;
pub use random::RandomPolicy;
pub use round_robin::RoundRobinPolicy;
pub use second_chance::SecondChancePolicy;

use super::set::{CacheBlock, CacheSet};
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// The owning level lends a set or block for the duration of a call; a policy never
/// stores the reference.
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Selects the way to (re)fill in `set` at level time `now`.
    ///
    /// # Returns
    ///
    /// The index of the first empty way if the set has one, otherwise the way chosen
    /// by the policy.
    fn select_victim(&mut self, set: &mut CacheSet, now: u64) -> usize;

    /// Updates per-block state after an access.
    ///
    /// Called exactly once per access: on a hit with `is_new == false`, or after the
    /// victim has been overwritten on a miss with `is_new == true`.
    fn on_access(&mut self, block: &mut CacheBlock, now: u64, is_new: bool);
}

/// Instantiates the policy named by `kind`.
///
/// `seed` initializes the random source of policies that have one.
pub fn build(kind: PolicyType, seed: u64) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Fifo => Box::new(FifoPolicy),
        PolicyType::Random => Box::new(RandomPolicy::new(seed)),
        PolicyType::Lfu => Box::new(LfuPolicy),
        PolicyType::Mru => Box::new(MruPolicy),
        PolicyType::RoundRobin => Box::new(RoundRobinPolicy),
        PolicyType::SecondChance => Box::new(SecondChancePolicy),
        PolicyType::Lfru => Box::new(LfruPolicy),
    }
}
