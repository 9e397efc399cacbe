//! Second Chance (Clock) Replacement Policy.
//!
//! Scans the set circularly from its pointer. A block with the reference bit set has
//! the bit cleared and is skipped; the first block found with a clear bit is evicted
//! and the pointer moves past it. The scan is bounded to `2 * ways` steps, after which
//! the block under the final pointer position is taken.

use super::ReplacementPolicy;
use crate::cache::set::{CacheBlock, CacheSet};

/// Second Chance policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecondChancePolicy;

impl ReplacementPolicy for SecondChancePolicy {
    fn select_victim(&mut self, set: &mut CacheSet, _now: u64) -> usize {
        if let Some(way) = set.first_invalid() {
            return way;
        }
        for _ in 0..set.ways() * 2 {
            let way = set.pointer();
            set.advance_pointer();
            let block = &mut set.blocks_mut()[way];
            if !block.referenced {
                return way;
            }
            block.referenced = false;
        }
        set.pointer()
    }

    fn on_access(&mut self, block: &mut CacheBlock, now: u64, is_new: bool) {
        block.referenced = true;
        block.last_access = now;
        if is_new {
            block.inserted_at = now;
        }
    }
}
