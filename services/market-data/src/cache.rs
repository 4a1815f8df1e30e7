//! Bounded snapshot cache
//!
//! Rolling window of recent snapshots, appended once per collection cycle.
//! Oldest entries are evicted first; order is never changed. The volatility
//! index is derived from this window.

use rust_decimal::prelude::ToPrimitive;
use std::collections::VecDeque;

use crate::types::MarketSnapshot;

/// Snapshots inspected when estimating volatility
const VOLATILITY_WINDOW: usize = 10;
/// Volatility reported until enough history has accumulated
pub const DEFAULT_VOLATILITY: f64 = 0.02;

pub struct SnapshotCache {
    entries: VecDeque<MarketSnapshot>,
    capacity: usize,
}

impl SnapshotCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a snapshot, evicting the oldest entry when full
    pub fn push(&mut self, snapshot: MarketSnapshot) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarketSnapshot> {
        self.entries.iter()
    }

    /// Standard deviation of relative changes of the reference dealer's buy
    /// price over the recent window. Falls back to [`DEFAULT_VOLATILITY`]
    /// until at least two observations exist.
    pub fn volatility_index(&self, reference_source: &str) -> f64 {
        let prices: Vec<f64> = self
            .entries
            .iter()
            .rev()
            .take(VOLATILITY_WINDOW)
            .filter_map(|snap| {
                snap.quotes
                    .iter()
                    .find(|q| q.source == reference_source)
                    .and_then(|q| q.buy.to_f64())
            })
            .collect();

        if prices.len() < 2 {
            return DEFAULT_VOLATILITY;
        }

        let changes: Vec<f64> = prices
            .windows(2)
            .filter(|w| w[1] != 0.0)
            .map(|w| (w[0] - w[1]) / w[1])
            .collect();

        if changes.is_empty() {
            return DEFAULT_VOLATILITY;
        }

        let mean = changes.iter().sum::<f64>() / changes.len() as f64;
        let variance = changes
            .iter()
            .map(|c| (c - mean).powi(2))
            .sum::<f64>()
            / changes.len() as f64;

        variance.sqrt()
    }
}
