// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Seeded Pseudo-Random Sequence

/// Fixed seed; every generation pass starts here so runs are reproducible.
pub const SEED: u32 = 123_456;

const MULTIPLIER: u32 = 9_301;
const INCREMENT: u32 = 49_297;
const MODULUS: u32 = 233_280;

/// Linear-congruential generator behind the synthetic dataset. The state
/// advances exactly once per drawn value, so the output stream is sensitive
/// to draw order: reordering two field draws changes every value after them.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new() -> Self {
        Self { state: SEED }
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        // state < MODULUS, so state * MULTIPLIER + INCREMENT stays well
        // under u32::MAX (233_279 * 9_301 + 49_297 < 2^32).
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        f64::from(self.state) / f64::from(MODULUS)
    }

    /// Next value scaled to `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next() * (hi - lo)
    }

    /// Index into a collection of `len` items. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        let idx = (self.next() * len as f64).floor() as usize;
        idx.min(len - 1)
    }

    /// Uniformly drawn element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new()
    }
}
