//! Property tests for sampler invariants.
//!
//! Uses proptest to verify:
//! 1. Draining — every positive-weight entry comes out exactly once
//! 2. Zero-weight exclusion — zero-weight entries are never drawn
//! 3. Determinism — identical operation sequences give identical draws
//! 4. Total weight — tracks the sum of weights through adds and updates

use proptest::prelude::*;
use weightlab_core::{SamplerError, WeightedSampler};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_positive_weight() -> impl Strategy<Value = f64> {
    0.01..100.0_f64
}

/// Weights where roughly a third are zero and at least one is positive.
fn arb_mixed_weights() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![1 => Just(0.0), 2 => arb_positive_weight()],
        1..40,
    )
    .prop_filter("needs a positive weight", |ws| ws.iter().any(|&w| w > 0.0))
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8, f64),
    Update(u8, f64),
    Sample,
    SampleAndRemove,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..16u8, arb_positive_weight()).prop_map(|(v, w)| Op::Add(v, w)),
        (0..16u8, 0.0..50.0_f64).prop_map(|(v, w)| Op::Update(v, w)),
        Just(Op::Sample),
        Just(Op::SampleAndRemove),
    ]
}

fn replay(seed: u64, ops: &[Op]) -> Vec<Result<u8, SamplerError>> {
    let mut sampler = WeightedSampler::new(seed);
    let mut out = Vec::new();
    for op in ops {
        match *op {
            Op::Add(v, w) => sampler.add(v, w).unwrap(),
            Op::Update(v, w) => {
                sampler.update_weight(&v, w).unwrap();
            }
            Op::Sample => out.push(sampler.sample().copied()),
            Op::SampleAndRemove => out.push(sampler.sample_and_remove()),
        }
    }
    out
}

// ── 1. Draining ──────────────────────────────────────────────────────

proptest! {
    /// Removing until failure returns each positive-weight entry once.
    #[test]
    fn drain_returns_each_positive_entry_once(
        weights in arb_mixed_weights(),
        seed in any::<u64>(),
    ) {
        let mut sampler = WeightedSampler::new(seed);
        for (i, &w) in weights.iter().enumerate() {
            sampler.add(i, w).unwrap();
        }

        let mut drawn: Vec<usize> = sampler.drain_weighted().collect();
        drawn.sort_unstable();

        let positive: Vec<usize> = weights
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w > 0.0)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(drawn, positive);

        let zeros = weights.iter().filter(|&&w| w == 0.0).count();
        prop_assert_eq!(sampler.len(), zeros);
        if zeros == 0 {
            prop_assert_eq!(sampler.sample_and_remove(), Err(SamplerError::Empty));
        } else {
            prop_assert!(matches!(
                sampler.sample_and_remove(),
                Err(SamplerError::NonPositiveTotal(_))
            ));
        }
    }

    /// Equal weights drain to a permutation of the input.
    #[test]
    fn equal_weights_drain_to_permutation(n in 1..200usize, seed in any::<u64>()) {
        let mut sampler = WeightedSampler::new(seed);
        for i in 0..n {
            sampler.add(i, 1.0).unwrap();
        }
        let mut drawn: Vec<usize> = (0..n).map(|_| sampler.sample_and_remove().unwrap()).collect();
        drawn.sort_unstable();
        prop_assert_eq!(drawn, (0..n).collect::<Vec<_>>());
        prop_assert_eq!(sampler.sample(), Err(SamplerError::Empty));
    }
}

// ── 2. Zero-weight exclusion ─────────────────────────────────────────

proptest! {
    #[test]
    fn zero_weight_entries_never_drawn(
        weights in arb_mixed_weights(),
        seed in any::<u64>(),
    ) {
        let mut sampler = WeightedSampler::new(seed);
        for (i, &w) in weights.iter().enumerate() {
            sampler.add(i, w).unwrap();
        }
        for _ in 0..500 {
            let i = *sampler.sample().unwrap();
            prop_assert!(weights[i] > 0.0, "drew zero-weight entry {}", i);
        }
    }
}

// ── 3. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn same_seed_same_results(
        ops in prop::collection::vec(arb_op(), 0..80),
        seed in any::<u64>(),
    ) {
        prop_assert_eq!(replay(seed, &ops), replay(seed, &ops));
    }
}

// ── 4. Total weight ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn total_weight_tracks_sum(
        weights in prop::collection::vec(arb_positive_weight(), 1..30),
        new_weight in 0.0..50.0_f64,
    ) {
        let mut sampler = WeightedSampler::new(0);
        for (i, &w) in weights.iter().enumerate() {
            sampler.add(i % 5, w).unwrap();
        }
        sampler.update_weight(&0, new_weight).unwrap();

        let expected: f64 = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| if i % 5 == 0 { new_weight } else { w })
            .sum();
        prop_assert!((sampler.total_weight() - expected).abs() < 1e-9);

        let from_iter: f64 = sampler.iter().map(|(_, w)| w).sum();
        prop_assert!((from_iter - expected).abs() < 1e-9);
    }
}
