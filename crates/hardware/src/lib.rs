//! Multi-level cache hierarchy simulator library.
//!
//! This crate models how a stream of memory accesses propagates through an N-level
//! set-associative cache hierarchy backed by main memory and secondary storage:
//! 1. **Cache:** Blocks, sets, per-level address decoding, and eight replacement policies.
//! 2. **Memory:** Fixed-latency main memory and probabilistically reached secondary storage.
//! 3. **Workload:** Seeded synthetic access patterns.
//! 4. **Simulation:** Access routing, bulk runs with progress, and policy comparison.
//! 5. **Statistics:** Per-level hit/miss counters, latency totals, and a text summary.

/// Set-associative cache levels, sets, and replacement policies.
pub mod cache;
/// Common types and constants (access records, errors).
pub mod common;
/// Simulator configuration (defaults, enums, level geometry, JSON loading).
pub mod config;
/// Main memory and secondary storage tiers.
pub mod memory;
/// Simulator and policy comparison.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Synthetic workload generation.
pub mod workload;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Hierarchy simulator; construct with `Simulator::new` or `Simulator::from_config`.
pub use crate::sim::Simulator;
/// Seeded workload generator.
pub use crate::workload::WorkloadGenerator;
