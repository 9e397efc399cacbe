//! Least Frequently Used (LFU) Replacement Policy.
//!
//! Evicts the block with the fewest accesses since installation. Ties go to the
//! earliest way. A newly installed block starts at a count of one.

use super::ReplacementPolicy;
use crate::cache::set::{CacheBlock, CacheSet};

/// LFU policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct LfuPolicy;

impl ReplacementPolicy for LfuPolicy {
    fn select_victim(&mut self, set: &mut CacheSet, _now: u64) -> usize {
        if let Some(way) = set.first_invalid() {
            return way;
        }
        set.blocks()
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| b.access_count)
            .map_or(0, |(way, _)| way)
    }

    fn on_access(&mut self, block: &mut CacheBlock, now: u64, is_new: bool) {
        block.access_count = if is_new { 1 } else { block.access_count + 1 };
        block.last_access = now;
    }
}
