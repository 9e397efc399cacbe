//! Simulation drivers.
//!
//! Provides the [`Simulator`] that routes accesses through the hierarchy and a
//! policy comparison that replays one workload under every replacement policy.

/// Replay of one workload under every replacement policy.
pub mod compare;

/// The hierarchy simulator.
pub mod simulator;

pub use compare::{PolicyComparison, compare_policies};
pub use simulator::{AccessResult, Simulator};
