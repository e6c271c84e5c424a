//! Test RNG — scripted `DeterministicRng` implementations for tests.

use heatcast_core::rng::DeterministicRng;

/// An RNG that always returns `0` for `next_u32` and `0.5` for `next_f64`.
///
/// A draw of `0.5` is the neutral point of every jitter formula, so live
/// ticks leave readings untouched and never nudge tomorrow.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_f64(&mut self) -> f64 {
        0.5
    }
}

/// An RNG that replays a predetermined sequence of `f64` draws, wrapping
/// around when exhausted.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given draws.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty or any value lies outside `[0.0, 1.0)`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "SequenceRng values must lie in [0.0, 1.0)"
        );
        Self { values, index: 0 }
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * 4_294_967_296.0) as u32
    }

    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
