//! Random number generator abstraction for determinism.
//!
//! Two sources sit behind the same trait: [`SeededRng`], a string-seeded
//! generator whose output must be bit-exact across implementations, and
//! [`EntropyRng`], an OS-seeded source for the live jitter that is not
//! meant to be reproducible. Tests inject scripted implementations.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Divisor mapping a `u32` draw onto `[0.0, 1.0)`.
const U32_SPAN: f64 = 4_294_967_296.0;

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate the next raw 32-bit output.
    fn next_u32(&mut self) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / U32_SPAN
    }
}

/// String-seeded 32-bit generator.
///
/// The seed is folded FNV-1a style over its UTF-16 code units, and each draw
/// advances the state by a fixed odd increment before an xorshift-multiply
/// finaliser. All arithmetic wraps at 32 bits.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// FNV-1a 32-bit offset basis.
    pub const OFFSET_BASIS: u32 = 0x811C_9DC5;
    /// FNV-1a 32-bit prime.
    pub const FNV_PRIME: u32 = 16_777_619;
    /// Per-draw state increment.
    pub const INCREMENT: u32 = 0x6D2B_79F5;

    /// Builds a generator from a seed string.
    #[must_use]
    pub fn from_seed(seed: &str) -> Self {
        let state = seed
            .encode_utf16()
            .fold(Self::OFFSET_BASIS, |h, unit| {
                (h ^ u32::from(unit)).wrapping_mul(Self::FNV_PRIME)
            });
        Self { state }
    }

    /// Returns the current internal state.
    #[must_use]
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl DeterministicRng for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let h = self.state;
        let mut t = (h ^ (h >> 15)).wrapping_mul(h | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }
}

/// Non-reproducible source used for live jitter and real-feel.
#[derive(Debug, Clone)]
pub struct EntropyRng(StdRng);

impl EntropyRng {
    /// Seeds from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Seeds from a fixed value, for reproducible runs.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for EntropyRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}
