#![forbid(unsafe_code)]

//! Small deterministic PRNG for decorative randomness.
//!
//! Decorative parameters (word sizes, positions) do not need cryptographic
//! quality, but they do need to be reproducible in tests. [`XorShift64`]
//! gives the same sequence for the same seed on every platform.

/// xorshift64 generator.
#[derive(Debug, Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Seed the generator. A zero seed is remapped since xorshift has a
    /// fixed point at zero.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1).max(1),
        }
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill an f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform value in `[lo, hi)`.
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        let v = lo + (hi - lo) * self.next_f32();
        // Rounding can land exactly on `hi` near the top of the range.
        if v < hi {
            v
        } else {
            lo.max(hi - (hi - lo) * f32::EPSILON)
        }
    }
}
