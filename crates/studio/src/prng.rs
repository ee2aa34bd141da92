//! Seedable Xorshift64 generator used to draw tool parameters.
//!
//! One generator is created per composition from the recipe seed, so the
//! same recipe always yields the same sequence of tools on every platform
//! (integer-only state update).

use serde::{Deserialize, Serialize};

/// Xorshift64 with shifts (13, 7, 17).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Replaces a zero seed, the all-zeros fixed point of xorshift.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Seeds the generator. Zero is replaced by a fixed nonzero seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns it.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform integer in the half-open range `[lo, hi)`.
    ///
    /// An empty range (`hi <= lo`) yields `lo` without advancing the state.
    /// Modulo reduction; the bias is negligible for the small ranges tools
    /// draw from.
    pub fn next_in(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_u64() % (hi - lo)
    }

    /// [`next_in`](Self::next_in) for canvas-sized ranges, as `f64`.
    pub fn next_coord(&mut self, lo: usize, hi: usize) -> f64 {
        self.next_in(lo as u64, hi as u64) as f64
    }
}
