//! Synthetic workload generation.
//!
//! Produces ordered sequences of [`MemoryAccess`] records for the named
//! [`AccessPattern`]s. Every access is independently a write with probability
//! `write_ratio`, and timestamps run `0, 1, 2, ...` across the whole sequence.
//!
//! The generator owns a single seeded `StdRng`, so the same seed, pattern, count,
//! and write ratio always yield the same sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{AccessType, MemoryAccess};
use crate::config::{AccessPattern, WorkloadConfig};

/// Word size used to align generated addresses.
const WORD_BYTES: u64 = 4;

/// Upper bound (exclusive) of addresses drawn by the Random pattern.
const RANDOM_SPAN: u64 = 10_000_000;

/// Upper bound (exclusive) of the Locality pattern's base address.
const LOCALITY_BASE_SPAN: u64 = 1_000_000;

/// Width of the window around the Locality base.
const LOCALITY_WINDOW: u64 = 256;

/// Accesses between Locality base moves.
const LOCALITY_PERIOD: usize = 50;

/// Stride of the Stride pattern in bytes.
const STRIDE_BYTES: u64 = 64;

/// Iterations of the Loop pattern.
const LOOP_ITERATIONS: usize = 10;

/// Largest Loop window in words.
const LOOP_MAX_WINDOW: usize = 100;

/// Bounds (inclusive, exclusive) of one Mixed run length.
const MIXED_RUN: std::ops::Range<usize> = 20..50;

/// Patterns a Mixed workload draws its runs from.
const MIXED_PATTERNS: [AccessPattern; 5] = [
    AccessPattern::Sequential,
    AccessPattern::Random,
    AccessPattern::Locality,
    AccessPattern::Stride,
    AccessPattern::Loop,
];

/// Seeded synthetic workload generator.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    rng: StdRng,
}

impl WorkloadGenerator {
    /// Creates a generator whose output is fixed by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Generates the workload described by `config`.
    pub fn generate_from(&mut self, config: &WorkloadConfig) -> Vec<MemoryAccess> {
        self.generate(config.pattern, config.count, config.write_ratio)
    }

    /// Generates up to `count` accesses following `pattern`.
    ///
    /// Every pattern except Loop yields exactly `count` accesses. Loop repeats a
    /// window of `min(count / 10, 100)` words ten times and may therefore yield fewer.
    pub fn generate(
        &mut self,
        pattern: AccessPattern,
        count: usize,
        write_ratio: f64,
    ) -> Vec<MemoryAccess> {
        match pattern {
            AccessPattern::Sequential => self.linear(count, WORD_BYTES, write_ratio),
            AccessPattern::Random => self.random(count, write_ratio),
            AccessPattern::Locality => self.locality(count, write_ratio),
            AccessPattern::Stride => self.linear(count, STRIDE_BYTES, write_ratio),
            AccessPattern::Loop => self.looped(count, write_ratio),
            AccessPattern::Mixed => self.mixed(count, write_ratio),
        }
    }

    fn kind(&mut self, write_ratio: f64) -> AccessType {
        if self.rng.random::<f64>() < write_ratio {
            AccessType::Write
        } else {
            AccessType::Read
        }
    }

    /// `address = index * step`.
    fn linear(&mut self, count: usize, step: u64, write_ratio: f64) -> Vec<MemoryAccess> {
        (0..count)
            .map(|i| {
                let kind = self.kind(write_ratio);
                MemoryAccess::new(i as u64 * step, kind, i as u64)
            })
            .collect()
    }

    fn random(&mut self, count: usize, write_ratio: f64) -> Vec<MemoryAccess> {
        (0..count)
            .map(|i| {
                let address = self.rng.random_range(0..RANDOM_SPAN) / WORD_BYTES * WORD_BYTES;
                let kind = self.kind(write_ratio);
                MemoryAccess::new(address, kind, i as u64)
            })
            .collect()
    }

    fn locality(&mut self, count: usize, write_ratio: f64) -> Vec<MemoryAccess> {
        let mut base = 0;
        (0..count)
            .map(|i| {
                if i % LOCALITY_PERIOD == 0 {
                    base = self.rng.random_range(0..LOCALITY_BASE_SPAN);
                }
                let offset = self.rng.random_range(0..LOCALITY_WINDOW) / WORD_BYTES * WORD_BYTES;
                let kind = self.kind(write_ratio);
                MemoryAccess::new(base + offset, kind, i as u64)
            })
            .collect()
    }

    fn looped(&mut self, count: usize, write_ratio: f64) -> Vec<MemoryAccess> {
        let window = (count / 10).min(LOOP_MAX_WINDOW);
        let mut accesses = Vec::with_capacity((window * LOOP_ITERATIONS).min(count));
        'outer: for _ in 0..LOOP_ITERATIONS {
            for word in 0..window {
                if accesses.len() == count {
                    break 'outer;
                }
                let kind = self.kind(write_ratio);
                let timestamp = accesses.len() as u64;
                accesses.push(MemoryAccess::new(word as u64 * WORD_BYTES, kind, timestamp));
            }
        }
        accesses
    }

    fn mixed(&mut self, count: usize, write_ratio: f64) -> Vec<MemoryAccess> {
        let mut accesses = Vec::with_capacity(count);
        while accesses.len() < count {
            let remaining = count - accesses.len();
            let run = self.rng.random_range(MIXED_RUN).min(remaining);
            let pattern = MIXED_PATTERNS[self.rng.random_range(0..MIXED_PATTERNS.len())];
            // A short Loop run can come back empty; the next draw picks again.
            for access in self.generate(pattern, run, write_ratio) {
                let timestamp = accesses.len() as u64;
                accesses.push(MemoryAccess { timestamp, ..access });
            }
        }
        accesses
    }
}
