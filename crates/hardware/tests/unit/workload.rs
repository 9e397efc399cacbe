//! # Workload Generator Tests
//!
//! Pattern shapes, sequence lengths, timestamps, write ratios, and seed determinism.

use memsim_core::WorkloadGenerator;
use memsim_core::common::AccessType;
use memsim_core::config::{AccessPattern, WorkloadConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn addresses(pattern: AccessPattern, count: usize) -> Vec<u64> {
    WorkloadGenerator::with_seed(1)
        .generate(pattern, count, 0.0)
        .iter()
        .map(|a| a.address)
        .collect()
}

#[test]
fn sequential_walks_words() {
    assert_eq!(addresses(AccessPattern::Sequential, 5), [0, 4, 8, 12, 16]);
}

#[test]
fn stride_walks_blocks() {
    assert_eq!(addresses(AccessPattern::Stride, 4), [0, 64, 128, 192]);
}

#[test]
fn random_addresses_are_aligned_and_bounded() {
    let addrs = addresses(AccessPattern::Random, 2_000);
    assert!(addrs.iter().all(|a| a % 4 == 0 && *a < 10_000_000));
}

#[test]
fn locality_stays_near_base_within_a_period() {
    let addrs = addresses(AccessPattern::Locality, 200);
    for chunk in addrs.chunks(50) {
        let lo = chunk.iter().min().copied().unwrap_or_default();
        let hi = chunk.iter().max().copied().unwrap_or_default();
        assert!(hi - lo < 256, "spread {} in one period", hi - lo);
    }
}

#[test]
fn loop_repeats_a_window_ten_times() {
    let addrs = addresses(AccessPattern::Loop, 100);
    // window = min(100 / 10, 100) = 10 words
    let window: Vec<u64> = (0..10).map(|w| w * 4).collect();
    assert_eq!(addrs.len(), 100);
    for chunk in addrs.chunks(10) {
        assert_eq!(chunk, window.as_slice());
    }
}

#[rstest]
#[case::window_capped(5_000, 1_000)]
#[case::too_short_for_a_window(9, 0)]
#[case::exact(50, 50)]
fn loop_length_follows_window_rule(#[case] count: usize, #[case] expected: usize) {
    assert_eq!(addresses(AccessPattern::Loop, count).len(), expected);
}

#[test]
fn mixed_yields_exactly_count() {
    let accesses = WorkloadGenerator::with_seed(11).generate(AccessPattern::Mixed, 3_001, 0.3);
    assert_eq!(accesses.len(), 3_001);
}

#[rstest]
fn timestamps_are_consecutive(
    #[values(
        AccessPattern::Sequential,
        AccessPattern::Random,
        AccessPattern::Locality,
        AccessPattern::Stride,
        AccessPattern::Loop,
        AccessPattern::Mixed
    )]
    pattern: AccessPattern,
) {
    let accesses = WorkloadGenerator::with_seed(5).generate(pattern, 500, 0.5);
    for (i, access) in accesses.iter().enumerate() {
        assert_eq!(access.timestamp, i as u64, "{pattern}");
    }
}

#[test]
fn same_seed_same_sequence() {
    let config = WorkloadConfig {
        pattern: AccessPattern::Mixed,
        count: 1_000,
        write_ratio: 0.25,
    };
    let a = WorkloadGenerator::with_seed(99).generate_from(&config);
    let b = WorkloadGenerator::with_seed(99).generate_from(&config);
    let c = WorkloadGenerator::with_seed(100).generate_from(&config);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn write_ratio_extremes() {
    let mut generator = WorkloadGenerator::from_entropy();
    let reads = generator.generate(AccessPattern::Random, 300, 0.0);
    assert!(reads.iter().all(|a| a.kind == AccessType::Read));
    let writes = generator.generate(AccessPattern::Random, 300, 1.0);
    assert!(writes.iter().all(|a| a.kind == AccessType::Write));
}

#[test]
fn zero_count_is_empty() {
    for pattern in AccessPattern::ALL {
        assert!(addresses(pattern, 0).is_empty(), "{pattern}");
    }
}

proptest! {
    #[test]
    fn write_share_tracks_ratio(seed in any::<u64>(), ratio in 0.1f64..0.9) {
        let accesses = WorkloadGenerator::with_seed(seed).generate(AccessPattern::Sequential, 4_000, ratio);
        let writes = accesses.iter().filter(|a| a.kind.is_write()).count();
        let share = writes as f64 / accesses.len() as f64;
        prop_assert!((share - ratio).abs() < 0.05, "share {} vs ratio {}", share, ratio);
    }
}
