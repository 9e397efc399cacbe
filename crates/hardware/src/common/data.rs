//! Memory Access Types.
//!
//! This module defines the input records consumed by the simulator:
//! 1. **Operation Kind:** Whether an access reads or writes its block.
//! 2. **Access Record:** Address, kind, and logical timestamp of one simulated access.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type of memory access operation.
///
/// A write marks the touched block dirty; a read leaves the dirty bit alone on a hit
/// and installs a clean block on a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessType {
    /// Data read access.
    #[default]
    Read,

    /// Data write access.
    Write,
}

impl AccessType {
    /// Returns `true` for [`AccessType::Write`].
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "R"),
            Self::Write => write!(f, "W"),
        }
    }
}

/// One simulated memory access.
///
/// Generated once per access by the workload generator (or supplied by the caller)
/// and never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryAccess {
    /// Byte address being accessed.
    pub address: u64,
    /// Read or write.
    pub kind: AccessType,
    /// Sequential logical timestamp within the workload.
    pub timestamp: u64,
}

impl MemoryAccess {
    /// Creates an access record.
    #[inline]
    pub const fn new(address: u64, kind: AccessType, timestamp: u64) -> Self {
        Self {
            address,
            kind,
            timestamp,
        }
    }

    /// Shorthand for a read at `address` with timestamp 0.
    #[inline]
    pub const fn read(address: u64) -> Self {
        Self::new(address, AccessType::Read, 0)
    }

    /// Shorthand for a write at `address` with timestamp 0.
    #[inline]
    pub const fn write(address: u64) -> Self {
        Self::new(address, AccessType::Write, 0)
    }
}
