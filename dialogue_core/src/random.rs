//! Random sources for picking among non-player continuations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform index generator injected into sessions.
pub trait RandomPort {
    /// Return an index in `0..len`. Callers never pass `len == 0`.
    fn gen_index(&mut self, len: usize) -> usize;
}

/// System random - uses the thread-local RNG.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic random source for replays and tests.
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomPort for SeededRandom {
    fn gen_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Always picks the same index, clamped into range.
#[cfg(test)]
pub struct FixedRandom(pub usize);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_index(&mut self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}
