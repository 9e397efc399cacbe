//! Common types shared by every component of the hierarchy simulator.
//!
//! This module provides the small vocabulary the rest of the crate is built on:
//! 1. **Memory Access:** The read/write classification and the immutable access record.
//! 2. **Constants:** Fixed tuning values (LFRU weights, escalation probability, progress reporting).
//! 3. **Error Handling:** Configuration and run-failure error kinds.

/// Simulation-wide constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration and simulation runs.
pub mod error;

pub use data::{AccessType, MemoryAccess};
pub use error::{ConfigError, SimError};
