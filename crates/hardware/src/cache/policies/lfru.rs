//! Least Frequently/Recently Used (LFRU) Replacement Policy.
//!
//! Scores every block as
//!
//! ```text
//! freq  = access_count / max_count
//! rec   = 1 - (now - last_access) / max_recency
//! score = 0.6 * freq + 0.4 * rec
//! ```
//!
//! where `max_count` and `max_recency` are the maxima over the set, each floored at 1.
//! The block with the lowest score is evicted; ties go to the earliest way.

use super::ReplacementPolicy;
use crate::cache::set::{CacheBlock, CacheSet};
use crate::common::constants::{LFRU_FREQUENCY_WEIGHT, LFRU_RECENCY_WEIGHT};

/// LFRU policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct LfruPolicy;

impl LfruPolicy {
    /// Score of one block given the set-wide maxima.
    #[inline]
    pub fn score(block: &CacheBlock, now: u64, max_count: u64, max_recency: u64) -> f64 {
        let freq = block.access_count as f64 / max_count as f64;
        let age = now.saturating_sub(block.last_access);
        let rec = 1.0 - age as f64 / max_recency as f64;
        LFRU_FREQUENCY_WEIGHT * freq + LFRU_RECENCY_WEIGHT * rec
    }
}

impl ReplacementPolicy for LfruPolicy {
    fn select_victim(&mut self, set: &mut CacheSet, now: u64) -> usize {
        if let Some(way) = set.first_invalid() {
            return way;
        }
        let blocks = set.blocks();
        let max_count = blocks.iter().map(|b| b.access_count).fold(1, u64::max);
        let max_recency = blocks
            .iter()
            .map(|b| now.saturating_sub(b.last_access))
            .fold(1, u64::max);

        let mut victim = 0;
        let mut best = f64::INFINITY;
        for (way, block) in blocks.iter().enumerate() {
            let score = Self::score(block, now, max_count, max_recency);
            if score < best {
                best = score;
                victim = way;
            }
        }
        victim
    }

    fn on_access(&mut self, block: &mut CacheBlock, now: u64, is_new: bool) {
        block.last_access = now;
        if is_new {
            block.access_count = 1;
            block.inserted_at = now;
        } else {
            block.access_count += 1;
        }
    }
}
