//! Deterministic seed hierarchy.
//!
//! A master seed generates deterministic sub-seeds for each `(label, iteration)`
//! pair. Sub-seeds are derived via BLAKE3 hashing, so a harness that builds
//! many samplers gets the same streams no matter which sampler it builds first.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::sampler::WeightedSampler;

/// Deterministic seed hierarchy.
///
/// The master seed is expanded into per-(label, iteration) sub-seeds using
/// BLAKE3. Because derivation is hash-based (not order-dependent), the same
/// master seed produces identical sub-seeds regardless of the order in which
/// labels or iterations are requested.
#[derive(Debug, Clone)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for a specific (label, iteration).
    pub fn sub_seed(&self, label: &str, iteration: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(&(label.len() as u64).to_le_bytes());
        hasher.update(label.as_bytes());
        hasher.update(&iteration.to_le_bytes());
        let hash = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    /// Create a seeded StdRng from a sub-seed.
    pub fn rng_for(&self, label: &str, iteration: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(label, iteration))
    }

    /// Create an empty sampler whose stream is derived from `(label, iteration)`.
    pub fn sampler_for<T>(&self, label: &str, iteration: u64) -> WeightedSampler<T> {
        WeightedSampler::new(self.sub_seed(label, iteration))
    }
}
