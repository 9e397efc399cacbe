//! Configuration system for the hierarchy simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a simulation. It provides:
//! 1. **Defaults:** Baseline hierarchy (three cache levels, RAM, secondary storage, workload).
//! 2. **Structures:** Per-level cache geometry, backing-store latencies, and workload shape.
//! 3. **Enums:** Replacement policy and access pattern selectors.
//! 4. **Validation:** Geometry and range checks performed before a simulator is built.
//!
//! Configuration is supplied in-process by the caller or deserialized from JSON.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::common::constants::SECONDARY_STORAGE_PROBABILITY;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default block (line) size in bytes.
    pub const BLOCK_BYTES: usize = 64;

    /// L1 size (32 KiB).
    pub const L1_SIZE: usize = 32 * 1024;
    /// L1 associativity.
    pub const L1_WAYS: usize = 8;
    /// L1 access latency in cycles.
    pub const L1_LATENCY: u64 = 4;

    /// L2 size (256 KiB).
    pub const L2_SIZE: usize = 256 * 1024;
    /// L2 associativity.
    pub const L2_WAYS: usize = 8;
    /// L2 access latency in cycles.
    pub const L2_LATENCY: u64 = 12;

    /// L3 size (8 MiB).
    pub const L3_SIZE: usize = 8 * 1024 * 1024;
    /// L3 associativity.
    pub const L3_WAYS: usize = 16;
    /// L3 access latency in cycles.
    pub const L3_LATENCY: u64 = 40;

    /// Main memory access latency in cycles.
    pub const MAIN_MEMORY_LATENCY: u64 = 100;

    /// Secondary storage access latency in cycles.
    pub const STORAGE_LATENCY: u64 = 10_000;

    /// Default number of generated accesses.
    pub const ACCESS_COUNT: usize = 10_000;

    /// Default fraction of generated accesses that are writes.
    pub const WRITE_RATIO: f64 = 0.2;
}

/// Cache replacement policy selector.
///
/// Specifies the algorithm used to choose which block to evict when a new tag
/// must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used: evicts the block with the oldest last access.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// First In First Out: evicts the block inserted earliest.
    #[serde(alias = "Fifo")]
    Fifo,
    /// Uniformly random victim.
    #[serde(alias = "Random")]
    Random,
    /// Least Frequently Used: evicts the block with the fewest accesses.
    #[serde(alias = "Lfu")]
    Lfu,
    /// Most Recently Used: evicts the block with the newest last access.
    #[serde(alias = "Mru")]
    Mru,
    /// Evicts the block under the set's circular pointer.
    #[serde(rename = "ROUND_ROBIN", alias = "RoundRobin")]
    RoundRobin,
    /// FIFO scan that spares blocks whose reference bit is set, once.
    #[serde(rename = "SECOND_CHANCE", alias = "SecondChance")]
    SecondChance,
    /// Weighted hybrid of frequency and recency.
    #[serde(alias = "Lfru")]
    Lfru,
}

impl ReplacementPolicy {
    /// Every policy, in selector order.
    pub const ALL: [Self; 8] = [
        Self::Lru,
        Self::Fifo,
        Self::Random,
        Self::Lfu,
        Self::Mru,
        Self::RoundRobin,
        Self::SecondChance,
        Self::Lfru,
    ];

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::Fifo => "FIFO",
            Self::Random => "Random",
            Self::Lfu => "LFU",
            Self::Mru => "MRU",
            Self::RoundRobin => "RoundRobin",
            Self::SecondChance => "SecondChance",
            Self::Lfru => "LFRU",
        }
    }

    /// One-sentence description of the victim-selection rule.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Lru => "Least Recently Used: the block untouched for the longest time is replaced.",
            Self::Fifo => "First In First Out: the oldest inserted block is replaced.",
            Self::Random => "Random: a uniformly random block is replaced.",
            Self::Lfu => "Least Frequently Used: the block with the fewest accesses is replaced.",
            Self::Mru => "Most Recently Used: the block touched most recently is replaced.",
            Self::RoundRobin => "Round Robin: blocks are replaced in circular order.",
            Self::SecondChance => "Second Chance: FIFO order, sparing referenced blocks once.",
            Self::Lfru => "LFRU: a weighted blend of access frequency and recency.",
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercases `s` and strips `_`, `-`, and spaces so `round_robin`, `Round-Robin`,
/// and `RoundRobin` compare equal.
fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|p| normalize_name(p.name()) == wanted)
            .ok_or_else(|| ConfigError::UnknownPolicy(s.to_string()))
    }
}

/// Synthetic workload access pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AccessPattern {
    /// Consecutive words: `index * 4`.
    #[default]
    Sequential,
    /// Uniform word-aligned addresses below 10 000 000.
    Random,
    /// Short bursts within a 256-byte window around a periodically moved base.
    Locality,
    /// Fixed 64-byte stride.
    Stride,
    /// A small window of words repeated ten times.
    Loop,
    /// Random-length runs of the other five patterns.
    Mixed,
}

impl AccessPattern {
    /// Every pattern, in selector order.
    pub const ALL: [Self; 6] = [
        Self::Sequential,
        Self::Random,
        Self::Locality,
        Self::Stride,
        Self::Loop,
        Self::Mixed,
    ];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::Random => "Random",
            Self::Locality => "Locality",
            Self::Stride => "Stride",
            Self::Loop => "Loop",
            Self::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccessPattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|p| normalize_name(p.name()) == wanted)
            .ok_or_else(|| ConfigError::UnknownPattern(s.to_string()))
    }
}

/// Root configuration structure containing all simulation settings.
///
/// # Examples
///
/// ```
/// use memsim_core::config::{Config, ReplacementPolicy};
///
/// let config = Config::default();
/// assert_eq!(config.levels.len(), 3);
/// assert_eq!(config.policy, ReplacementPolicy::Lru);
/// assert!(config.validate().is_ok());
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use memsim_core::config::{AccessPattern, Config, ReplacementPolicy};
///
/// let json = r#"{
///     "levels": [
///         { "name": "L1", "size_bytes": 1024, "block_bytes": 64, "ways": 4, "latency": 2 }
///     ],
///     "policy": "SECOND_CHANCE",
///     "memory": { "main_memory_latency": 80 },
///     "workload": { "pattern": "Locality", "count": 500 },
///     "seed": 7
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.policy, ReplacementPolicy::SecondChance);
/// assert_eq!(config.levels[0].num_sets().unwrap(), 4);
/// assert_eq!(config.memory.storage_latency, 10_000);
/// assert_eq!(config.workload.pattern, AccessPattern::Locality);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Cache levels, nearest first. Disabled levels are skipped.
    #[serde(default = "Config::default_levels")]
    pub levels: Vec<CacheLevelConfig>,
    /// Replacement policy applied to every level.
    #[serde(default)]
    pub policy: ReplacementPolicy,
    /// Main memory and secondary storage.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Synthetic workload shape.
    #[serde(default)]
    pub workload: WorkloadConfig,
    /// Seed for every random source; `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Config {
    /// Returns the default three-level hierarchy.
    fn default_levels() -> Vec<CacheLevelConfig> {
        vec![
            CacheLevelConfig::new(
                "L1",
                defaults::L1_SIZE,
                defaults::BLOCK_BYTES,
                defaults::L1_WAYS,
                defaults::L1_LATENCY,
            ),
            CacheLevelConfig::new(
                "L2",
                defaults::L2_SIZE,
                defaults::BLOCK_BYTES,
                defaults::L2_WAYS,
                defaults::L2_LATENCY,
            ),
            CacheLevelConfig::new(
                "L3",
                defaults::L3_SIZE,
                defaults::BLOCK_BYTES,
                defaults::L3_WAYS,
                defaults::L3_LATENCY,
            ),
        ]
    }

    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] if the document is malformed or has the wrong shape.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Json`] if it
    /// does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The configured seed, or a fresh one from the OS when none is set.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Enabled levels, nearest first.
    pub fn enabled_levels(&self) -> Vec<CacheLevelConfig> {
        self.levels.iter().filter(|l| l.enabled).cloned().collect()
    }

    /// Checks every enabled level's geometry, the enabled-level count,
    /// the workload write ratio, and the storage escalation probability.
    ///
    /// # Errors
    ///
    /// The first problem found: [`ConfigError::InvalidGeometry`],
    /// [`ConfigError::NoLevels`], [`ConfigError::InvalidProbability`], or
    /// [`ConfigError::InvalidWriteRatio`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut enabled = 0usize;
        for level in self.levels.iter().filter(|l| l.enabled) {
            let _ = level.num_sets()?;
            enabled += 1;
        }
        if enabled == 0 {
            return Err(ConfigError::NoLevels);
        }
        self.memory.validate()?;
        self.workload.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels: Self::default_levels(),
            policy: ReplacementPolicy::default(),
            memory: MemoryConfig::default(),
            workload: WorkloadConfig::default(),
            seed: None,
        }
    }
}

/// Individual cache level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheLevelConfig {
    /// Display name (e.g. `"L1"`).
    pub name: String,

    /// Enable this cache level
    #[serde(default = "CacheLevelConfig::default_enabled")]
    pub enabled: bool,

    /// Total cache size in bytes
    pub size_bytes: usize,

    /// Block (line) size in bytes
    #[serde(default = "CacheLevelConfig::default_block")]
    pub block_bytes: usize,

    /// Associativity (blocks per set)
    pub ways: usize,

    /// Access latency in cycles
    pub latency: u64,
}

impl CacheLevelConfig {
    /// Creates an enabled level.
    pub fn new(
        name: impl Into<String>,
        size_bytes: usize,
        block_bytes: usize,
        ways: usize,
        latency: u64,
    ) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            size_bytes,
            block_bytes,
            ways,
            latency,
        }
    }

    /// Levels are enabled unless stated otherwise.
    fn default_enabled() -> bool {
        true
    }

    /// Returns the default block size in bytes.
    fn default_block() -> usize {
        defaults::BLOCK_BYTES
    }

    /// Number of sets, `size_bytes / (block_bytes * ways)`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidGeometry`] unless the division is exact and yields
    /// at least one set.
    pub fn num_sets(&self) -> Result<usize, ConfigError> {
        let invalid = || ConfigError::InvalidGeometry {
            name: self.name.clone(),
            size_bytes: self.size_bytes,
            block_bytes: self.block_bytes,
            ways: self.ways,
        };
        let set_bytes = self
            .block_bytes
            .checked_mul(self.ways)
            .filter(|&b| b > 0)
            .ok_or_else(invalid)?;
        if self.size_bytes % set_bytes != 0 || self.size_bytes / set_bytes == 0 {
            return Err(invalid());
        }
        Ok(self.size_bytes / set_bytes)
    }
}

/// Main memory and secondary storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Main memory latency in cycles
    #[serde(default = "MemoryConfig::default_main_memory_latency")]
    pub main_memory_latency: u64,

    /// Secondary storage latency in cycles
    #[serde(default = "MemoryConfig::default_storage_latency")]
    pub storage_latency: u64,

    /// Chance that a global miss also reaches secondary storage
    #[serde(default = "MemoryConfig::default_storage_probability")]
    pub storage_probability: f64,
}

impl MemoryConfig {
    fn default_main_memory_latency() -> u64 {
        defaults::MAIN_MEMORY_LATENCY
    }

    fn default_storage_latency() -> u64 {
        defaults::STORAGE_LATENCY
    }

    fn default_storage_probability() -> f64 {
        SECONDARY_STORAGE_PROBABILITY
    }

    /// Rejects a probability outside `[0, 1]` (including NaN).
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidProbability`] with the offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&self.storage_probability) {
            Ok(())
        } else {
            Err(ConfigError::InvalidProbability(self.storage_probability))
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            main_memory_latency: defaults::MAIN_MEMORY_LATENCY,
            storage_latency: defaults::STORAGE_LATENCY,
            storage_probability: SECONDARY_STORAGE_PROBABILITY,
        }
    }
}

/// Synthetic workload configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Access pattern
    #[serde(default)]
    pub pattern: AccessPattern,

    /// Number of accesses to generate
    #[serde(default = "WorkloadConfig::default_count")]
    pub count: usize,

    /// Probability that each access is a write
    #[serde(default = "WorkloadConfig::default_write_ratio")]
    pub write_ratio: f64,
}

impl WorkloadConfig {
    fn default_count() -> usize {
        defaults::ACCESS_COUNT
    }

    fn default_write_ratio() -> f64 {
        defaults::WRITE_RATIO
    }

    /// Rejects a write ratio outside `[0, 1]` (including NaN).
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidWriteRatio`] with the offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&self.write_ratio) {
            Ok(())
        } else {
            Err(ConfigError::InvalidWriteRatio(self.write_ratio))
        }
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            pattern: AccessPattern::default(),
            count: defaults::ACCESS_COUNT,
            write_ratio: defaults::WRITE_RATIO,
        }
    }
}
