//! Injectable signal source
//!
//! The momentum, volatility and arbitrage stand-ins each consume one
//! uniform draw per scoring pass. Injecting the source keeps every
//! stochastic term replayable: production uses the thread RNG, tests and
//! replays feed an exact sequence.

use rand::Rng;
use std::collections::VecDeque;

/// A stream of uniform values in [0, 1)
pub trait SignalSource: Send {
    fn next_value(&mut self) -> f64;
}

/// Default source backed by `rand`
pub struct RandomSignal {
    rng: rand::rngs::StdRng,
}

impl RandomSignal {
    pub fn new() -> Self {
        use rand::SeedableRng;
        Self {
            rng: rand::rngs::StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSource for RandomSignal {
    fn next_value(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Deterministic playback of a fixed sequence; repeats the last value once
/// the sequence is exhausted.
pub struct SequenceSignal {
    values: VecDeque<f64>,
    last: f64,
}

impl SequenceSignal {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: 0.5,
        }
    }
}

impl SignalSource for SequenceSignal {
    fn next_value(&mut self) -> f64 {
        if let Some(v) = self.values.pop_front() {
            self.last = v;
        }
        self.last
    }
}
