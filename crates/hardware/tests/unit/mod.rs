//! # Unit Components
//!
//! Tests for each layer of the simulator, from single blocks up to policy
//! comparison runs.






/// Synthetic workload generation.
pub mod workload;
