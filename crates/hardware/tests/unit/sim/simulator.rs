//! # Simulator Tests
//!
//! End-to-end routing through the hierarchy: latency accumulation, path details,
//! backing-store escalation, statistics invariants, progress reporting, and reset.

use memsim_core::common::{ConfigError, MemoryAccess, SimError};
use memsim_core::config::{
    AccessPattern, CacheLevelConfig, Config, MemoryConfig, ReplacementPolicy,
};
use memsim_core::{Simulator, WorkloadGenerator};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::{always_storage, init_tracing, ram_only, reads, simulator, tiny_level};

/// L1 = 64 B / 4-way / 4 B blocks (latency 1), L2 = 1 KiB / 4-way / 4 B blocks (latency 10).
fn two_levels() -> Vec<CacheLevelConfig> {
    vec![
        tiny_level("L1", 1),
        CacheLevelConfig::new("L2", 1024, 4, 4, 10),
    ]
}

// ══════════════════════════════════════════════════════════
// 1. Routing
// ══════════════════════════════════════════════════════════

/// Five conflicting blocks through a single 4-way LRU level: all miss, the last
/// evicts tag 0, and every access pays L1 plus RAM.
#[test]
fn single_level_conflict_end_to_end() {
    init_tracing();
    let mut sim = simulator(&[tiny_level("L1", 1)], ReplacementPolicy::Lru);
    let results = sim.run_bulk(&reads(&[0, 16, 32, 48, 64]));

    assert!(results.iter().all(|r| !r.hit && r.hit_level.is_none()));
    assert!(results.iter().all(|r| r.latency == 101));
    assert_eq!(results[0].details, "L1 miss -> RAM");
    assert_eq!(results[4].details, "L1 miss (evicted tag 0x0) -> RAM");

    let stats = sim.statistics();
    assert_eq!(stats.total_latency, 505);
    assert_eq!(stats.main_memory_accesses, 5);
    assert!(stats.overall_hit_rate().abs() < f64::EPSILON);
}

#[test]
fn latency_accumulates_over_visited_levels() {
    let mut sim = simulator(&two_levels(), ReplacementPolicy::Lru);

    let cold = sim.access(&MemoryAccess::read(0));
    assert_eq!(cold.latency, 1 + 10 + 100);
    assert_eq!(cold.details, "L1 miss -> L2 miss -> RAM");

    let warm = sim.access(&MemoryAccess::read(0));
    assert!(warm.hit);
    assert_eq!(warm.hit_level, Some(1));
    assert_eq!(warm.latency, 1);
    assert_eq!(warm.details, "L1 hit");
}

#[test]
fn latency_saturates_instead_of_wrapping() {
    let memory = MemoryConfig {
        main_memory_latency: u64::MAX,
        ..ram_only()
    };
    let mut sim = Simulator::new(&[tiny_level("L1", 1)], ReplacementPolicy::Lru, &memory, 0).unwrap();

    let first = sim.access(&MemoryAccess::read(0));
    assert_eq!(first.latency, u64::MAX);
    let second = sim.access(&MemoryAccess::read(16));
    assert_eq!(second.latency, u64::MAX);
    assert_eq!(sim.statistics().total_latency, u64::MAX);
}

#[test]
fn l1_victim_is_still_found_in_l2() {
    let mut sim = simulator(&two_levels(), ReplacementPolicy::Lru);
    // 16..=64 share L1 set 0 and push tag 0 out; in L2 they land in distinct sets.
    let _ = sim.run_bulk(&reads(&[0, 0, 16, 32, 48, 64]));
    assert!(!sim.levels()[0].contains(0));
    assert!(sim.levels()[1].contains(0));

    let result = sim.access(&MemoryAccess::read(0));
    assert_eq!(result.hit_level, Some(2));
    assert_eq!(result.latency, 11);
    assert_eq!(result.details, "L1 miss (evicted tag 0x1) -> L2 hit");
}

#[test]
fn storage_escalation_adds_latency() {
    let mut sim =
        Simulator::new(&[tiny_level("L1", 1)], ReplacementPolicy::Lru, &always_storage(), 3)
            .unwrap();
    let miss = sim.access(&MemoryAccess::write(0));
    assert_eq!(miss.latency, 1 + 100 + 10_000);
    assert!(miss.details.ends_with("-> RAM -> storage"));

    let hit = sim.access(&MemoryAccess::read(0));
    assert_eq!(hit.latency, 1);

    let stats = sim.statistics();
    assert_eq!(stats.secondary_storage_accesses, 1);
    assert_eq!((stats.read_accesses, stats.write_accesses), (1, 1));
}

#[test]
fn disabled_levels_are_skipped_and_renumbered() {
    let levels = vec![
        CacheLevelConfig {
            enabled: false,
            ..tiny_level("L1", 1)
        },
        tiny_level("L2", 7),
    ];
    let mut sim = simulator(&levels, ReplacementPolicy::Fifo);
    assert_eq!(sim.levels().len(), 1);
    assert_eq!(sim.levels()[0].level(), 1);

    let _ = sim.access(&MemoryAccess::read(8));
    let again = sim.access(&MemoryAccess::read(8));
    assert_eq!(again.details, "L2 hit");
    assert_eq!(again.latency, 7);
}

// ══════════════════════════════════════════════════════════
// 2. Construction errors
// ══════════════════════════════════════════════════════════

#[test]
fn no_enabled_levels_is_rejected() {
    let levels = vec![CacheLevelConfig {
        enabled: false,
        ..tiny_level("L1", 1)
    }];
    assert!(matches!(
        Simulator::new(&levels, ReplacementPolicy::Lru, &ram_only(), 0),
        Err(SimError::Config(ConfigError::NoLevels))
    ));
    assert!(matches!(
        Simulator::new(&[], ReplacementPolicy::Lru, &ram_only(), 0),
        Err(SimError::Config(ConfigError::NoLevels))
    ));
}

#[test]
fn bad_geometry_and_probability_are_rejected() {
    let bad = CacheLevelConfig::new("L1", 100, 64, 2, 1);
    assert!(matches!(
        Simulator::new(&[bad], ReplacementPolicy::Lru, &ram_only(), 0),
        Err(SimError::Config(ConfigError::InvalidGeometry { .. }))
    ));

    let memory = MemoryConfig {
        storage_probability: -0.5,
        ..ram_only()
    };
    assert!(matches!(
        Simulator::new(&[tiny_level("L1", 1)], ReplacementPolicy::Lru, &memory, 0),
        Err(SimError::Config(ConfigError::InvalidProbability(_)))
    ));
}

#[test]
fn from_config_uses_configured_policy_and_levels() {
    let config = Config {
        policy: ReplacementPolicy::SecondChance,
        seed: Some(5),
        ..Config::default()
    };
    let sim = Simulator::from_config(&config).unwrap();
    assert_eq!(sim.policy(), ReplacementPolicy::SecondChance);
    assert_eq!(sim.levels().len(), 3);
    assert_eq!(sim.statistics().levels[2].name, "L3");
}

// ══════════════════════════════════════════════════════════
// 3. Statistics
// ══════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Reads and writes partition the total; the first level sees every access; and
    /// main memory sees exactly the global misses.
    #[test]
    fn statistics_invariants_hold(
        seed in any::<u64>(),
        pattern in prop::sample::select(AccessPattern::ALL.to_vec()),
        policy in prop::sample::select(ReplacementPolicy::ALL.to_vec()),
    ) {
        let accesses = WorkloadGenerator::with_seed(seed).generate(pattern, 600, 0.3);
        let mut sim = Simulator::new(&two_levels(), policy, &MemoryConfig::default(), seed).unwrap();
        let results = sim.run_bulk(&accesses);
        let stats = sim.statistics();

        prop_assert_eq!(results.len(), accesses.len());
        prop_assert_eq!(stats.total_accesses, accesses.len() as u64);
        prop_assert_eq!(stats.read_accesses + stats.write_accesses, stats.total_accesses);
        prop_assert_eq!(stats.levels[0].accesses(), stats.total_accesses);
        prop_assert_eq!(stats.levels[1].accesses(), stats.levels[0].misses);
        prop_assert_eq!(stats.main_memory_accesses, stats.total_accesses - stats.total_hits());
        prop_assert!(stats.secondary_storage_accesses <= stats.main_memory_accesses);
        prop_assert_eq!(
            results.iter().map(|r| r.latency).sum::<u64>(),
            stats.total_latency
        );
    }
}

#[test]
fn summary_text_matches_statistics() {
    let mut sim = simulator(&two_levels(), ReplacementPolicy::Lru);
    let _ = sim.run_bulk(&reads(&[0, 4, 0]));
    let text = sim.summary_text();
    assert_eq!(text, sim.statistics().to_string());
    assert!(text.contains("  L2     hits: 0"));
}

// ══════════════════════════════════════════════════════════
// 4. Bulk runs and reset
// ══════════════════════════════════════════════════════════

#[test]
fn progress_reports_every_hundred_accesses_then_completion() {
    let mut sim = simulator(&two_levels(), ReplacementPolicy::Lru);
    let accesses = WorkloadGenerator::with_seed(1).generate(AccessPattern::Sequential, 250, 0.0);
    let mut seen = Vec::new();
    let results = sim.run_bulk_with_progress(&accesses, |p| seen.push(p));
    assert_eq!(results.len(), 250);
    assert_eq!(seen, [0, 40, 80, 100]);
}

#[test]
fn empty_run_reports_completion_only() {
    let mut sim = simulator(&two_levels(), ReplacementPolicy::Lru);
    let mut seen = Vec::new();
    assert!(sim.run_bulk_with_progress(&[], |p| seen.push(p)).is_empty());
    assert_eq!(seen, [100]);
}

#[test]
fn worker_run_matches_inline_run() {
    init_tracing();
    let accesses = WorkloadGenerator::with_seed(8).generate(AccessPattern::Mixed, 1_000, 0.2);

    let mut inline = simulator(&two_levels(), ReplacementPolicy::Lfru);
    let expected = inline.run_bulk(&accesses);

    let mut worker = simulator(&two_levels(), ReplacementPolicy::Lfru);
    let mut last = 0;
    let results = worker
        .run_bulk_on_worker(&accesses, |p| last = p)
        .unwrap();

    assert_eq!(results, expected);
    assert_eq!(last, 100);
    assert_eq!(worker.statistics(), inline.statistics());
}

#[test]
fn worker_panic_is_reported_as_run_failed() {
    let mut sim = simulator(&two_levels(), ReplacementPolicy::Lru);
    let outcome = sim.run_bulk_on_worker(&reads(&[0, 4, 8]), |_| panic!("progress sink failed"));
    assert!(
        matches!(outcome, Err(SimError::RunFailed(ref msg)) if msg == "progress sink failed"),
        "{outcome:?}"
    );

    // The simulator is still usable once reset.
    sim.reset();
    let results = sim.run_bulk(&reads(&[0, 0]));
    assert!(results[1].hit);
}

#[test]
fn reset_restores_initial_statistics_and_behavior() {
    let accesses = reads(&[0, 16, 0, 32, 48, 64, 0]);
    let mut sim = simulator(&two_levels(), ReplacementPolicy::Lru);
    let fresh = sim.statistics();
    let first = sim.run_bulk(&accesses);

    sim.reset();
    assert_eq!(sim.statistics(), fresh);
    assert!(sim.levels().iter().all(|l| l.time() == 0));

    let second = sim.run_bulk(&accesses);
    assert_eq!(first, second);
}

#[test]
fn same_seed_same_storage_escalations() {
    let memory = MemoryConfig {
        storage_probability: 0.5,
        ..ram_only()
    };
    let accesses = WorkloadGenerator::with_seed(2).generate(AccessPattern::Random, 500, 0.1);
    let run = |seed| {
        let mut sim =
            Simulator::new(&two_levels(), ReplacementPolicy::Random, &memory, seed).unwrap();
        let _ = sim.run_bulk(&accesses);
        sim.statistics()
    };
    assert_eq!(run(21), run(21));
}
