//! Replacement-policy comparison.
//!
//! Runs the same workload against one fresh [`Simulator`] per policy. Each instance
//! owns disjoint state, so the runs are independent; they are executed one after
//! another.

use serde::Serialize;
use tracing::info;

use super::Simulator;
use crate::common::{MemoryAccess, SimError};
use crate::config::{CacheLevelConfig, MemoryConfig, ReplacementPolicy};

/// Result of replaying a workload under one policy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolicyComparison {
    /// Policy under test.
    pub policy: ReplacementPolicy,
    /// Overall hit rate in percent.
    pub hit_rate: f64,
    /// Mean latency per access in cycles.
    pub average_latency: f64,
}

impl PolicyComparison {
    /// Entry with the highest hit rate; the earliest wins ties.
    pub fn best(results: &[Self]) -> Option<&Self> {
        results.iter().fold(None, |best: Option<&Self>, r| match best {
            Some(b) if b.hit_rate >= r.hit_rate => Some(b),
            _ => Some(r),
        })
    }
}

/// Replays `accesses` under every policy in [`ReplacementPolicy::ALL`] order.
///
/// Every simulator is built with the same `seed`, so the escalation coin flips
/// line up across policies.
///
/// # Errors
///
/// Any configuration error raised while building a simulator.
pub fn compare_policies(
    levels: &[CacheLevelConfig],
    memory: &MemoryConfig,
    seed: u64,
    accesses: &[MemoryAccess],
) -> Result<Vec<PolicyComparison>, SimError> {
    ReplacementPolicy::ALL
        .into_iter()
        .map(|policy| {
            let mut sim = Simulator::new(levels, policy, memory, seed)?;
            let _ = sim.run_bulk(accesses);
            let stats = sim.statistics();
            let result = PolicyComparison {
                policy,
                hit_rate: stats.overall_hit_rate(),
                average_latency: stats.average_latency(),
            };
            info!(%policy, hit_rate = result.hit_rate, "policy compared");
            Ok(result)
        })
        .collect()
}
