//! Most Recently Used (MRU) Replacement Policy.
//!
//! Evicts the block accessed most recently. While counter-intuitive for standard
//! workloads, MRU suits cyclic access patterns larger than the cache, where the
//! newest block is the one least likely to be needed again soon.

use std::cmp::Reverse;

use super::ReplacementPolicy;
use crate::cache::set::{CacheBlock, CacheSet};

/// MRU policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct MruPolicy;

impl ReplacementPolicy for MruPolicy {
    fn select_victim(&mut self, set: &mut CacheSet, _now: u64) -> usize {
        if let Some(way) = set.first_invalid() {
            return way;
        }
        // `min_by_key` keeps the first of equal keys, so ties resolve to the earliest way.
        set.blocks()
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| Reverse(b.last_access))
            .map_or(0, |(way, _)| way)
    }

    fn on_access(&mut self, block: &mut CacheBlock, now: u64, _is_new: bool) {
        block.last_access = now;
    }
}
