//! Terminal memory tiers below the cache hierarchy.
//!
//! This module provides:
//! 1. **MainMemory:** Fixed latency per visit; every global miss lands here.
//! 2. **SecondaryStorage:** Fixed latency per visit; reached by a fraction of global misses.
//!
//! Neither tier tracks contents or addresses. Both always "hit" and only count visits.

/// Trait for terminal tiers that report a fixed access latency in cycles.
pub trait BackingStore: Send + Sync {
    /// Records one visit and returns its latency in cycles.
    fn access(&mut self) -> u64;

    /// Latency of a single visit in cycles.
    fn latency(&self) -> u64;

    /// Number of visits since construction or the last reset.
    fn accesses(&self) -> u64;

    /// Zeroes the visit counter.
    fn reset(&mut self);
}

/// Main memory (RAM).
#[derive(Debug, Clone)]
pub struct MainMemory {
    latency: u64,
    accesses: u64,
}

impl MainMemory {
    /// Creates main memory with the given per-access latency.
    pub const fn new(latency: u64) -> Self {
        Self {
            latency,
            accesses: 0,
        }
    }
}

impl BackingStore for MainMemory {
    fn access(&mut self) -> u64 {
        self.accesses += 1;
        self.latency
    }

    fn latency(&self) -> u64 {
        self.latency
    }

    fn accesses(&self) -> u64 {
        self.accesses
    }

    fn reset(&mut self) {
        self.accesses = 0;
    }
}

/// Secondary storage (disk).
#[derive(Debug, Clone)]
pub struct SecondaryStorage {
    latency: u64,
    accesses: u64,
}

impl SecondaryStorage {
    /// Creates secondary storage with the given per-access latency.
    pub const fn new(latency: u64) -> Self {
        Self {
            latency,
            accesses: 0,
        }
    }
}

impl BackingStore for SecondaryStorage {
    fn access(&mut self) -> u64 {
        self.accesses += 1;
        self.latency
    }

    fn latency(&self) -> u64 {
        self.latency
    }

    fn accesses(&self) -> u64 {
        self.accesses
    }

    fn reset(&mut self) {
        self.accesses = 0;
    }
}
