//! Simulation statistics collection and reporting.
//!
//! This module tracks the aggregate outcome of a simulation. It provides:
//! 1. **Totals:** Accesses split into reads and writes, and accumulated latency.
//! 2. **Cache hierarchy:** Hit/miss counts per level with derived hit and miss rates.
//! 3. **Backing store:** Main-memory and secondary-storage visit counts.
//! 4. **Reporting:** A deterministic text summary via [`fmt::Display`].

use std::fmt;

use serde::Serialize;

/// Hit/miss counters of one cache level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LevelStatistics {
    /// Level name.
    pub name: String,
    /// 1-based position in the hierarchy.
    pub level: usize,
    /// Lookups that found their tag.
    pub hits: u64,
    /// Lookups that did not.
    pub misses: u64,
}

impl LevelStatistics {
    /// Total lookups at this level.
    #[inline]
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit rate in percent; 0 when the level saw no lookups.
    pub fn hit_rate(&self) -> f64 {
        percent(self.hits, self.accesses())
    }

    /// Miss rate in percent; 0 when the level saw no lookups.
    pub fn miss_rate(&self) -> f64 {
        percent(self.misses, self.accesses())
    }
}

/// Aggregate statistics of a simulator.
///
/// `total_accesses == read_accesses + write_accesses` holds after every access.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStatistics {
    /// Accesses processed.
    pub total_accesses: u64,
    /// Of which reads.
    pub read_accesses: u64,
    /// Of which writes.
    pub write_accesses: u64,
    /// Sum of per-access latencies in cycles.
    pub total_latency: u64,
    /// Per-level counters, nearest level first.
    pub levels: Vec<LevelStatistics>,
    /// Visits to main memory.
    pub main_memory_accesses: u64,
    /// Visits to secondary storage.
    pub secondary_storage_accesses: u64,
}

impl SimulationStatistics {
    /// Mean latency per access in cycles; 0 before the first access.
    pub fn average_latency(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.total_latency as f64 / self.total_accesses as f64
        }
    }

    /// Accesses satisfied by some cache level.
    pub fn total_hits(&self) -> u64 {
        self.levels.iter().map(|l| l.hits).sum()
    }

    /// Percentage of accesses satisfied by some cache level.
    pub fn overall_hit_rate(&self) -> f64 {
        percent(self.total_hits(), self.total_accesses)
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

impl fmt::Display for SimulationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "MEMORY HIERARCHY SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "accesses.total           {}", self.total_accesses)?;
        writeln!(f, "accesses.read            {}", self.read_accesses)?;
        writeln!(f, "accesses.write           {}", self.write_accesses)?;
        writeln!(f, "latency.total            {} cycles", self.total_latency)?;
        writeln!(
            f,
            "latency.average          {:.1} cycles",
            self.average_latency()
        )?;
        writeln!(f, "hit_rate.overall         {:.2}%", self.overall_hit_rate())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "CACHE LEVELS")?;
        for level in &self.levels {
            writeln!(
                f,
                "  {:<6} hits: {:<10} ({:.1}%) | misses: {:<10}",
                level.name,
                level.hits,
                level.hit_rate(),
                level.misses
            )?;
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "BACKING STORE")?;
        writeln!(f, "  memory.accesses        {}", self.main_memory_accesses)?;
        writeln!(f, "  storage.accesses       {}", self.secondary_storage_accesses)?;
        write!(f, "==========================================================")
    }
}
