//! Least Recently Used (LRU) Replacement Policy.
//!
//! Evicts the block whose last access is oldest on the level's logical clock.
//! Ties go to the earliest way.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_access()`: O(1)
//!   - `select_victim()`: O(W) where W is the number of ways
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Loops larger than the set (thrashing)

use super::ReplacementPolicy;
use crate::cache::set::{CacheBlock, CacheSet};

/// LRU policy. Stateless; recency lives in each block's `last_access`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn select_victim(&mut self, set: &mut CacheSet, _now: u64) -> usize {
        if let Some(way) = set.first_invalid() {
            return way;
        }
        set.blocks()
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| b.last_access)
            .map_or(0, |(way, _)| way)
    }

    fn on_access(&mut self, block: &mut CacheBlock, now: u64, _is_new: bool) {
        block.last_access = now;
    }
}
