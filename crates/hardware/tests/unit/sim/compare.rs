//! # Policy Comparison Tests

use memsim_core::common::{ConfigError, SimError};
use memsim_core::config::{CacheLevelConfig, ReplacementPolicy};
use memsim_core::sim::{PolicyComparison, compare_policies};
use pretty_assertions::assert_eq;

use crate::common::{ram_only, reads, single_set_level};

/// Five blocks cycled through a four-way set: the classic LRU thrash.
fn cyclic_workload() -> Vec<memsim_core::common::MemoryAccess> {
    let addrs: Vec<u64> = (0..20).flat_map(|_| (0..5).map(|t| t * 64)).collect();
    reads(&addrs)
}

#[test]
fn compares_every_policy_in_order() {
    let results =
        compare_policies(&[single_set_level()], &ram_only(), 1, &cyclic_workload()).unwrap();
    let order: Vec<_> = results.iter().map(|r| r.policy).collect();
    assert_eq!(order, ReplacementPolicy::ALL);
}

#[test]
fn cyclic_workload_defeats_lru_but_not_mru() {
    let results =
        compare_policies(&[single_set_level()], &ram_only(), 1, &cyclic_workload()).unwrap();
    let rate = |p: ReplacementPolicy| {
        results
            .iter()
            .find(|r| r.policy == p)
            .map(|r| r.hit_rate)
            .unwrap()
    };
    assert!(rate(ReplacementPolicy::Lru).abs() < f64::EPSILON);
    assert!(rate(ReplacementPolicy::Fifo).abs() < f64::EPSILON);
    assert!(rate(ReplacementPolicy::Mru) > 50.0);

    let best = PolicyComparison::best(&results).unwrap();
    assert!(results.iter().all(|r| r.hit_rate <= best.hit_rate));
    assert_ne!(best.policy, ReplacementPolicy::Lru);
}

#[test]
fn comparison_is_reproducible() {
    let accesses = cyclic_workload();
    let a = compare_policies(&[single_set_level()], &ram_only(), 4, &accesses).unwrap();
    let b = compare_policies(&[single_set_level()], &ram_only(), 4, &accesses).unwrap();
    assert_eq!(a, b);
}

#[test]
fn best_prefers_earliest_on_ties() {
    let entry = |policy, hit_rate| PolicyComparison {
        policy,
        hit_rate,
        average_latency: 0.0,
    };
    let results = [
        entry(ReplacementPolicy::Lru, 40.0),
        entry(ReplacementPolicy::Fifo, 60.0),
        entry(ReplacementPolicy::Lfu, 60.0),
    ];
    assert_eq!(
        PolicyComparison::best(&results).map(|b| b.policy),
        Some(ReplacementPolicy::Fifo)
    );
    assert_eq!(PolicyComparison::best(&[]), None);
}

#[test]
fn comparison_propagates_configuration_errors() {
    let bad = CacheLevelConfig::new("L1", 10, 64, 1, 1);
    assert!(matches!(
        compare_policies(&[bad], &ram_only(), 0, &reads(&[0])),
        Err(SimError::Config(ConfigError::InvalidGeometry { .. }))
    ));
}
