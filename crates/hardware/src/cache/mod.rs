//! Set-Associative Cache Level.
//!
//! This module implements one tier of the hierarchy. A [`CacheLevel`] owns its sets,
//! decodes addresses into set index and tag, counts hits and misses, and keeps a
//! private logical clock that orders accesses for the recency-based policies.
//!
//! Evicting a dirty block is purely a bookkeeping event: no write-back traffic is
//! sent to the next tier.

/// Cache replacement policy implementations.
pub mod policies;

/// Cache blocks and sets.
pub mod set;

use tracing::{debug, trace};

use self::policies::ReplacementPolicy;
use self::set::CacheSet;
use crate::common::{AccessType, ConfigError};
use crate::config::{CacheLevelConfig, ReplacementPolicy as PolicyType};
use crate::stats::LevelStatistics;

/// Decoded form of an address for one level's geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// Index of the set the address maps to.
    pub set_index: usize,
    /// Tag stored in the block.
    pub tag: u64,
}

/// Outcome of one access to a single level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelAccess {
    /// Whether the tag was present.
    pub hit: bool,
    /// Tag displaced by the fill; `None` on a hit or when an empty way was used.
    pub evicted_tag: Option<u64>,
}

/// One set-associative cache tier.
#[derive(Debug)]
pub struct CacheLevel {
    config: CacheLevelConfig,
    /// 1-based position of this level in the hierarchy.
    level: usize,
    sets: Vec<CacheSet>,
    num_sets: u64,
    policy: Box<dyn ReplacementPolicy>,
    time: u64,
    hits: u64,
    misses: u64,
}

impl CacheLevel {
    /// Creates an empty level.
    ///
    /// # Arguments
    ///
    /// * `config` - Geometry and latency of the level.
    /// * `level` - 1-based position in the hierarchy.
    /// * `policy` - Replacement policy selector.
    /// * `seed` - Seed for policies with a random source.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidGeometry`] if the size is not an exact positive multiple
    /// of `block_bytes * ways`.
    pub fn new(
        config: &CacheLevelConfig,
        level: usize,
        policy: PolicyType,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let num_sets = config.num_sets()?;
        let empty_set = CacheSet::new(config.ways, config.block_bytes).ok_or_else(|| {
            ConfigError::InvalidGeometry {
                name: config.name.clone(),
                size_bytes: config.size_bytes,
                block_bytes: config.block_bytes,
                ways: config.ways,
            }
        })?;
        debug!(
            name = %config.name,
            level,
            sets = num_sets,
            ways = config.ways,
            block_bytes = config.block_bytes,
            %policy,
            "building cache level"
        );
        Ok(Self {
            config: config.clone(),
            level,
            sets: vec![empty_set; num_sets],
            num_sets: num_sets as u64,
            policy: policies::build(policy, seed),
            time: 0,
            hits: 0,
            misses: 0,
        })
    }

    /// Configuration this level was built from.
    #[inline]
    pub const fn config(&self) -> &CacheLevelConfig {
        &self.config
    }

    /// Access latency in cycles.
    #[inline]
    pub const fn latency(&self) -> u64 {
        self.config.latency
    }

    /// 1-based position in the hierarchy.
    #[inline]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Number of sets.
    #[inline]
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Current value of the level's logical clock.
    #[inline]
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Hit count since construction or the last reset.
    #[inline]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Miss count since construction or the last reset.
    #[inline]
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Read-only view of a set, for inspection.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Splits `addr` into set index and tag.
    ///
    /// `block = addr / block_bytes`, `set = block % sets`, `tag = block / sets`.
    #[inline]
    pub fn decode(&self, addr: u64) -> DecodedAddress {
        let block_addr = addr / self.config.block_bytes as u64;
        DecodedAddress {
            set_index: (block_addr % self.num_sets) as usize,
            tag: block_addr / self.num_sets,
        }
    }

    /// Whether `addr` currently resides in this level. Does not tick the clock.
    pub fn contains(&self, addr: u64) -> bool {
        let decoded = self.decode(addr);
        self.sets[decoded.set_index].find(decoded.tag).is_some()
    }

    /// Accesses the level for `addr`.
    ///
    /// Ticks the logical clock, then on a hit notifies the policy and marks the block
    /// dirty for writes; on a miss selects a victim, records its old tag, and installs
    /// the new tag (dirty iff the access is a write).
    ///
    /// # Panics
    ///
    /// This function will not panic. `set_index` is reduced modulo the set count and
    /// every policy returns a way below the set's associativity.
    pub fn access(&mut self, addr: u64, kind: AccessType) -> LevelAccess {
        self.time += 1;
        let now = self.time;
        let DecodedAddress { set_index, tag } = self.decode(addr);
        let set = &mut self.sets[set_index];

        if let Some(way) = set.find(tag) {
            self.hits += 1;
            let block = &mut set.blocks_mut()[way];
            self.policy.on_access(block, now, false);
            if kind.is_write() {
                block.dirty = true;
            }
            trace!(level = self.level, addr, set_index, tag, way, "hit");
            return LevelAccess {
                hit: true,
                evicted_tag: None,
            };
        }

        self.misses += 1;
        let way = self.policy.select_victim(set, now);
        let victim = &mut set.blocks_mut()[way];
        let evicted_tag = victim.valid.then_some(victim.tag);
        victim.tag = tag;
        victim.valid = true;
        victim.dirty = kind.is_write();
        self.policy.on_access(victim, now, true);
        trace!(level = self.level, addr, set_index, tag, way, ?evicted_tag, "miss");

        LevelAccess {
            hit: false,
            evicted_tag,
        }
    }

    /// Empties every set and zeroes the clock and counters.
    pub fn reset(&mut self) {
        for set in &mut self.sets {
            set.reset();
        }
        self.time = 0;
        self.hits = 0;
        self.misses = 0;
        debug!(name = %self.config.name, "cache level reset");
    }

    /// Snapshot of this level's counters.
    pub fn statistics(&self) -> LevelStatistics {
        LevelStatistics {
            name: self.config.name.clone(),
            level: self.level,
            hits: self.hits,
            misses: self.misses,
        }
    }
}
