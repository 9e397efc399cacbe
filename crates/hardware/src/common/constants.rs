//! Global Simulation Constants.
//!
//! This module defines fixed values used across the simulator. It includes:
//! 1. **Escalation:** Probability that a main-memory visit also reaches secondary storage.
//! 2. **Policy Tuning:** Weights of the LFRU hybrid score.
//! 3. **Reporting:** Progress reporting interval for bulk runs.

/// Probability that a global miss also pays the secondary-storage latency.
///
/// This is an address-independent coin flip, not a page-table model.
pub const SECONDARY_STORAGE_PROBABILITY: f64 = 0.01;

/// Weight of the normalized access-count term in the LFRU score.
pub const LFRU_FREQUENCY_WEIGHT: f64 = 0.6;

/// Weight of the normalized recency term in the LFRU score.
pub const LFRU_RECENCY_WEIGHT: f64 = 0.4;

/// A progress update is emitted every `PROGRESS_INTERVAL` processed accesses.
pub const PROGRESS_INTERVAL: usize = 100;

/// Progress value reported when a bulk run completes.
pub const PROGRESS_COMPLETE: u32 = 100;
