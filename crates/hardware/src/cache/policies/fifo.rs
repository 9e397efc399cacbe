//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! Evicts the block installed earliest, regardless of how recently it was hit.
//! Re-hits never refresh the insertion time.

use super::ReplacementPolicy;
use crate::cache::set::{CacheBlock, CacheSet};

/// FIFO policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn select_victim(&mut self, set: &mut CacheSet, _now: u64) -> usize {
        if let Some(way) = set.first_invalid() {
            return way;
        }
        set.blocks()
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| b.inserted_at)
            .map_or(0, |(way, _)| way)
    }

    fn on_access(&mut self, block: &mut CacheBlock, now: u64, is_new: bool) {
        if is_new {
            block.inserted_at = now;
        }
    }
}
