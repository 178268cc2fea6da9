//! Weighted random selection over a lazily rebuilt cumulative-weight index.
//!
//! Entries are kept in a plain `Vec`. Mutations only flip a dirty flag; the
//! O(n log n) sort and prefix-sum pass runs on the next draw, so bursts of
//! `add`/`update_weight` calls pay for a single rebuild.
//!
//! After a rebuild the entries are sorted ascending by weight and every entry
//! owns the half-open interval `[cumulative_weight, cumulative_weight + weight)`
//! inside `[0, total_weight)`. A draw is located with a binary search for the
//! rightmost interval starting at or before it. Zero-weight entries sort to the
//! front and share their start with the first positive entry, so the rightmost
//! rule never lands on them.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{check_total, check_weight, SamplerError};

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    weight: f64,
    /// Start of this entry's interval. Only valid while the sampler is clean.
    cumulative_weight: f64,
}

/// Weighted random-selection container.
///
/// Long-run selection frequency of each entry is proportional to its weight.
/// The random source is injected: [`WeightedSampler::new`] seeds a `StdRng`,
/// [`WeightedSampler::with_rng`] accepts any `Rng`, including `&mut R` to
/// share one stream between several samplers.
///
/// Not synchronized. Callers sharing a sampler across threads must wrap it.
#[derive(Debug, Clone)]
pub struct WeightedSampler<T, R = StdRng> {
    entries: Vec<Entry<T>>,
    total_weight: f64,
    dirty: bool,
    rng: R,
}

impl<T> WeightedSampler<T, StdRng> {
    /// Create an empty sampler drawing from a `StdRng` seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<T, R: Rng> WeightedSampler<T, R> {
    /// Create an empty sampler drawing from an externally supplied source.
    pub fn with_rng(rng: R) -> Self {
        Self {
            entries: Vec::new(),
            total_weight: 0.0,
            dirty: false,
            rng,
        }
    }

    /// Append an entry. Zero weight is allowed and means "never selected".
    ///
    /// Duplicate values are independent entries. Fails without changing the
    /// sampler if the new total would not be finite.
    pub fn add(&mut self, value: T, weight: f64) -> Result<(), SamplerError> {
        let weight = check_weight(weight)?;
        let total = check_total(self.total_weight + weight)?;
        self.entries.push(Entry {
            value,
            weight,
            cumulative_weight: 0.0,
        });
        self.total_weight = total;
        self.dirty = true;
        Ok(())
    }

    /// Replace the weight of every entry equal to `value`.
    ///
    /// Returns the number of entries updated. Zero matches is not an error:
    /// the call is a silent no-op, which can hide a misspelled value.
    pub fn update_weight(&mut self, value: &T, weight: f64) -> Result<usize, SamplerError>
    where
        T: PartialEq,
    {
        let weight = check_weight(weight)?;
        let delta: f64 = self
            .entries
            .iter()
            .filter(|e| e.value == *value)
            .map(|e| weight - e.weight)
            .sum();
        let total = check_total(self.total_weight + delta)?;

        let mut updated = 0;
        for entry in self.entries.iter_mut().filter(|e| e.value == *value) {
            entry.weight = weight;
            updated += 1;
        }
        self.total_weight = total;
        if updated == 0 {
            debug!("update_weight matched no entries");
        }
        self.dirty = true;
        Ok(updated)
    }

    /// Draw one value with probability proportional to its weight.
    pub fn sample(&mut self) -> Result<&T, SamplerError> {
        let index = self.pick_index()?;
        Ok(&self.entries[index].value)
    }

    /// Draw one value and remove it, so it can never be drawn again.
    ///
    /// Calling this until it fails yields every positive-weight entry exactly
    /// once. Zero-weight entries are never drawn; once only they remain the
    /// call fails with [`SamplerError::NonPositiveTotal`].
    pub fn sample_and_remove(&mut self) -> Result<T, SamplerError> {
        let index = self.pick_index()?;
        let entry = self.entries.swap_remove(index);
        self.total_weight -= entry.weight;
        self.dirty = true;
        Ok(entry.value)
    }

    /// Iterator that repeatedly calls [`Self::sample_and_remove`] until it fails.
    pub fn drain_weighted(&mut self) -> WeightedDrain<'_, T, R> {
        WeightedDrain { sampler: self }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Values and their weights. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.entries.iter().map(|e| (&e.value, e.weight))
    }

    /// Each entry's share of the total weight. All zero when the total is zero.
    pub fn probabilities(&self) -> Vec<(&T, f64)> {
        let total: f64 = self.entries.iter().map(|e| e.weight).sum();
        self.entries
            .iter()
            .map(|e| {
                let p = if total > 0.0 { e.weight / total } else { 0.0 };
                (&e.value, p)
            })
            .collect()
    }

    fn rebuild(&mut self) {
        if !self.dirty {
            return;
        }

        self.entries.sort_unstable_by(|a, b| a.weight.total_cmp(&b.weight));

        let mut running = 0.0;
        for entry in &mut self.entries {
            entry.cumulative_weight = running;
            running += entry.weight;
        }
        self.total_weight = running;
        self.dirty = false;

        trace!(
            "rebuilt cumulative index: {} entries, total weight {}",
            self.entries.len(),
            self.total_weight
        );
    }

    fn pick_index(&mut self) -> Result<usize, SamplerError> {
        self.rebuild();

        if self.entries.is_empty() {
            return Err(SamplerError::Empty);
        }
        if self.total_weight <= 0.0 {
            return Err(SamplerError::NonPositiveTotal(self.total_weight));
        }
        check_total(self.total_weight)?;

        let r = self.rng.gen_range(0.0..self.total_weight);
        Ok(self.locate(r))
    }

    /// Index of the rightmost entry whose interval starts at or before `r`.
    ///
    /// `entries[0]` starts at 0.0, so the result is always in bounds. A draw
    /// at or beyond `total_weight` falls into the last interval.
    fn locate(&self, r: f64) -> usize {
        let after = self.entries.partition_point(|e| e.cumulative_weight <= r);
        after.saturating_sub(1)
    }
}

/// Draining iterator returned by [`WeightedSampler::drain_weighted`].
///
/// Yields values in weighted-random order, removing each from the sampler.
/// Stops when the sampler is empty or only zero-weight entries remain.
pub struct WeightedDrain<'a, T, R> {
    sampler: &'a mut WeightedSampler<T, R>,
}

impl<T, R: Rng> Iterator for WeightedDrain<'_, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.sampler.sample_and_remove().ok()
    }
}
