//! Empirical frequency counts for checking draws against their weights.

use serde::Serialize;
use std::collections::BTreeMap;

/// Counts how often each value was observed.
#[derive(Debug, Clone, Serialize)]
pub struct Tally<T: Ord> {
    counts: BTreeMap<T, u64>,
    total: u64,
}

impl<T: Ord> Default for Tally<T> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<T: Ord> Tally<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: T) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, value: &T) -> u64 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Observed share of `value`, 0.0 before anything is recorded.
    pub fn frequency(&self, value: &T) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(value) as f64 / self.total as f64
    }

    /// Observed values with their counts, in value order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, u64)> {
        self.counts.iter().map(|(v, &c)| (v, c))
    }

    /// Largest absolute gap between observed and expected frequency.
    ///
    /// Values missing from `expected` count as expected 0.0; expected values
    /// never observed count as observed 0.0.
    pub fn max_abs_deviation(&self, expected: &BTreeMap<T, f64>) -> f64 {
        let over_expected = expected
            .iter()
            .map(|(v, p)| (self.frequency(v) - p).abs());
        let unexpected = self
            .counts
            .keys()
            .filter(|v| !expected.contains_key(*v))
            .map(|v| self.frequency(v));
        over_expected.chain(unexpected).fold(0.0, f64::max)
    }
}

impl<T: Ord> Extend<T> for Tally<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.record(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for Tally<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tally = Self::new();
        tally.extend(iter);
        tally
    }
}
