//! Simulator: routes accesses through the cache levels and the backing store.
//!
//! A [`Simulator`] exclusively owns every cache level, both terminal tiers, the
//! running statistics, and the random source used for secondary-storage escalation.
//! Accesses are processed strictly in order; each one depends on the state left by
//! the previous ones.

use std::fmt::Write as _;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::cache::CacheLevel;
use crate::common::constants::{PROGRESS_COMPLETE, PROGRESS_INTERVAL};
use crate::common::{AccessType, ConfigError, MemoryAccess, SimError};
use crate::config::{CacheLevelConfig, Config, MemoryConfig, ReplacementPolicy};
use crate::memory::{BackingStore, MainMemory, SecondaryStorage};
use crate::stats::SimulationStatistics;

/// Outcome of one simulated access. Never mutated after it is returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccessResult {
    /// Accessed address.
    pub address: u64,
    /// Read or write.
    pub kind: AccessType,
    /// Whether some cache level held the block.
    pub hit: bool,
    /// 1-based level that satisfied the access; `None` on a global miss.
    pub hit_level: Option<usize>,
    /// Sum of the latencies of every tier visited, in cycles.
    pub latency: u64,
    /// Human-readable path through the hierarchy.
    pub details: String,
}

/// The multi-level hierarchy simulator.
#[derive(Debug)]
pub struct Simulator {
    levels: Vec<CacheLevel>,
    policy: ReplacementPolicy,
    main_memory: MainMemory,
    storage: SecondaryStorage,
    storage_probability: f64,
    rng: StdRng,
    stats: SimulationStatistics,
}

impl Simulator {
    /// Builds a simulator over the enabled entries of `levels`, nearest first.
    ///
    /// # Arguments
    ///
    /// * `levels` - Level configurations; disabled entries are skipped.
    /// * `policy` - Replacement policy used by every level.
    /// * `memory` - Main-memory and secondary-storage parameters.
    /// * `seed` - Seed for the escalation coin flip and for per-level random policies.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoLevels`] when nothing is enabled,
    /// [`ConfigError::InvalidGeometry`] for a level that does not divide into sets, and
    /// [`ConfigError::InvalidProbability`] for an escalation probability outside `[0, 1]`.
    pub fn new(
        levels: &[CacheLevelConfig],
        policy: ReplacementPolicy,
        memory: &MemoryConfig,
        seed: u64,
    ) -> Result<Self, SimError> {
        memory.validate()?;
        let levels = levels
            .iter()
            .filter(|l| l.enabled)
            .enumerate()
            .map(|(i, config)| {
                let level = i + 1;
                CacheLevel::new(config, level, policy, seed.wrapping_add(level as u64))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if levels.is_empty() {
            return Err(ConfigError::NoLevels.into());
        }
        debug!(levels = levels.len(), %policy, seed, "simulator ready");

        let mut sim = Self {
            levels,
            policy,
            main_memory: MainMemory::new(memory.main_memory_latency),
            storage: SecondaryStorage::new(memory.storage_latency),
            storage_probability: memory.storage_probability,
            rng: StdRng::seed_from_u64(seed),
            stats: SimulationStatistics::default(),
        };
        sim.stats.levels = sim.levels.iter().map(CacheLevel::statistics).collect();
        Ok(sim)
    }

    /// Builds a simulator from a root [`Config`], seeding from the OS when
    /// `config.seed` is `None`.
    ///
    /// # Errors
    ///
    /// The same configuration errors as [`Self::new`].
    pub fn from_config(config: &Config) -> Result<Self, SimError> {
        Self::new(
            &config.levels,
            config.policy,
            &config.memory,
            config.seed_or_random(),
        )
    }

    /// Replacement policy shared by all levels.
    pub const fn policy(&self) -> ReplacementPolicy {
        self.policy
    }

    /// The cache levels, nearest first.
    pub fn levels(&self) -> &[CacheLevel] {
        &self.levels
    }

    /// Processes one access.
    ///
    /// Visits levels in order, adding each visited level's latency, until one hits.
    /// On a global miss main memory is always visited and secondary storage is
    /// visited with the configured probability.
    pub fn access(&mut self, access: &MemoryAccess) -> AccessResult {
        let mut latency: u64 = 0;
        let mut hit_level = None;
        let mut details = String::new();

        for cache in &mut self.levels {
            latency = latency.saturating_add(cache.latency());
            let outcome = cache.access(access.address, access.kind);
            if !details.is_empty() {
                details.push_str(" -> ");
            }
            details.push_str(&cache.config().name);
            if outcome.hit {
                details.push_str(" hit");
                hit_level = Some(cache.level());
                break;
            }
            details.push_str(" miss");
            if let Some(tag) = outcome.evicted_tag {
                let _ = write!(details, " (evicted tag {tag:#x})");
            }
        }

        if hit_level.is_none() {
            latency = latency.saturating_add(self.main_memory.access());
            details.push_str(" -> RAM");
            if self.rng.random::<f64>() < self.storage_probability {
                latency = latency.saturating_add(self.storage.access());
                details.push_str(" -> storage");
            }
        }

        self.stats.total_accesses += 1;
        match access.kind {
            AccessType::Read => self.stats.read_accesses += 1,
            AccessType::Write => self.stats.write_accesses += 1,
        }
        self.stats.total_latency = self.stats.total_latency.saturating_add(latency);
        trace!(addr = access.address, ?hit_level, latency, "access");

        AccessResult {
            address: access.address,
            kind: access.kind,
            hit: hit_level.is_some(),
            hit_level,
            latency,
            details,
        }
    }

    /// Processes `accesses` in order; equivalent to calling [`Self::access`] on each.
    pub fn run_bulk(&mut self, accesses: &[MemoryAccess]) -> Vec<AccessResult> {
        self.run_bulk_with_progress(accesses, |_| {})
    }

    /// Like [`Self::run_bulk`], reporting progress as an integer percentage.
    ///
    /// `progress` is called after the first access and after every
    /// [`PROGRESS_INTERVAL`] accesses thereafter, then once with 100 on completion.
    pub fn run_bulk_with_progress(
        &mut self,
        accesses: &[MemoryAccess],
        mut progress: impl FnMut(u32),
    ) -> Vec<AccessResult> {
        info!(
            accesses = accesses.len(),
            policy = %self.policy,
            "bulk run started"
        );
        let total = accesses.len();
        let mut results = Vec::with_capacity(total);
        for (i, access) in accesses.iter().enumerate() {
            results.push(self.access(access));
            if i % PROGRESS_INTERVAL == 0 {
                progress(((i + 1) * 100 / total) as u32);
            }
        }
        progress(PROGRESS_COMPLETE);
        info!(
            accesses = self.stats.total_accesses,
            hit_rate = self.statistics().overall_hit_rate(),
            avg_latency = self.stats.average_latency(),
            "bulk run finished"
        );
        results
    }

    /// Runs [`Self::run_bulk_with_progress`] on a scoped worker thread.
    ///
    /// The caller blocks until the run completes; `progress` is invoked on the
    /// worker. There is no cancellation.
    ///
    /// # Errors
    ///
    /// [`SimError::RunFailed`] if the run aborts on the worker. The simulator's state
    /// is then unspecified and should be [`reset`](Self::reset).
    pub fn run_bulk_on_worker(
        &mut self,
        accesses: &[MemoryAccess],
        progress: impl FnMut(u32) + Send,
    ) -> Result<Vec<AccessResult>, SimError> {
        thread::scope(|scope| {
            let worker = thread::Builder::new()
                .name("memsim-run".into())
                .spawn_scoped(scope, || {
                    panic::catch_unwind(AssertUnwindSafe(|| {
                        self.run_bulk_with_progress(accesses, progress)
                    }))
                })
                .map_err(|e| SimError::RunFailed(e.to_string()))?;
            match worker.join() {
                Ok(Ok(results)) => Ok(results),
                Ok(Err(payload)) | Err(payload) => Err(SimError::RunFailed(panic_message(&*payload))),
            }
        })
    }

    /// Read-only snapshot of the statistics, with current per-level counters.
    pub fn statistics(&self) -> SimulationStatistics {
        let mut stats = self.stats.clone();
        stats.levels = self.levels.iter().map(CacheLevel::statistics).collect();
        stats.main_memory_accesses = self.main_memory.accesses();
        stats.secondary_storage_accesses = self.storage.accesses();
        stats
    }

    /// Returns all levels, both tiers, and the statistics to their initial state.
    ///
    /// The random source is not rewound.
    pub fn reset(&mut self) {
        for cache in &mut self.levels {
            cache.reset();
        }
        self.main_memory.reset();
        self.storage.reset();
        self.stats = SimulationStatistics {
            levels: self.levels.iter().map(CacheLevel::statistics).collect(),
            ..SimulationStatistics::default()
        };
        debug!("simulator reset");
    }

    /// Human-readable rendering of [`Self::statistics`].
    pub fn summary_text(&self) -> String {
        self.statistics().to_string()
    }
}

/// Extracts the message of a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "worker panicked".to_string())
}
