//! Error definitions.
//!
//! Configuration problems are detected up front so a run never starts on a
//! degenerate hierarchy (for example a level whose geometry divides to zero sets).
//! Everything that can go wrong after construction is reported as [`SimError`].

use thiserror::Error;

/// Errors raised while building or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A cache level's size, block size, and associativity do not describe a whole
    /// number of sets.
    #[error(
        "cache level `{name}`: size {size_bytes} is not a positive multiple of block size {block_bytes} x {ways} ways"
    )]
    InvalidGeometry {
        /// Level name.
        name: String,
        /// Total size in bytes.
        size_bytes: usize,
        /// Block size in bytes.
        block_bytes: usize,
        /// Associativity.
        ways: usize,
    },

    /// No cache level is enabled.
    #[error("at least one cache level must be enabled")]
    NoLevels,

    /// The workload write ratio lies outside `[0, 1]`.
    #[error("write ratio {0} is outside [0, 1]")]
    InvalidWriteRatio(f64),

    /// The secondary-storage escalation probability lies outside `[0, 1]`.
    #[error("secondary storage probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// A replacement policy name could not be parsed.
    #[error("unknown replacement policy `{0}`")]
    UnknownPolicy(String),

    /// An access pattern name could not be parsed.
    #[error("unknown access pattern `{0}`")]
    UnknownPattern(String),

    /// A configuration file could not be read.
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// The simulator was constructed from an invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A bulk run aborted on its worker context.
    #[error("simulation run failed: {0}")]
    RunFailed(String),
}
