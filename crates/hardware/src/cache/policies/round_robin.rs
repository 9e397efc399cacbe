//! Round-Robin Replacement Policy.
//!
//! Evicts the way under the set's circular pointer and advances the pointer by one,
//! wrapping at the associativity. Hits do not touch the pointer.
//!
//! # Performance
//!
//! - **Time Complexity:** O(1) for both operations
//! - **Hardware Cost:** Minimal - a single counter per set

use super::ReplacementPolicy;
use crate::cache::set::{CacheBlock, CacheSet};

/// Round-robin policy. The pointer lives in the set.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobinPolicy;

impl ReplacementPolicy for RoundRobinPolicy {
    fn select_victim(&mut self, set: &mut CacheSet, _now: u64) -> usize {
        if let Some(way) = set.first_invalid() {
            return way;
        }
        let victim = set.pointer();
        set.advance_pointer();
        victim
    }

    fn on_access(&mut self, _block: &mut CacheBlock, _now: u64, _is_new: bool) {}
}
