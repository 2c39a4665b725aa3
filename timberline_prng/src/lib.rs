// Deterministic, portable pseudo-random number generator.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding.
// This is a hand-rolled implementation with zero external dependencies,
// chosen for portability and to guarantee identical output across all
// platforms.
//
// This crate is the single source of randomness for Timberline. Every
// weighted decision the tree framework makes — branch placement, bark
// variants, broken tops, sapling growth rolls — is a bounded draw from a
// `GameRng` passed in by the caller. The host hands the generator to each
// callback; the library never owns one.
//
// The central contract is the "1-in-N weighted chance": a parameter `N`
// means the event fires when a single uniform draw in `[0, N)` lands on 0.
// See `GameRng::chance`.
//
// **Critical constraint: determinism.** Every method on `GameRng` must
// produce identical output given the same prior state, regardless of
// platform, compiler version, or optimization level. No floating-point
// arithmetic, no stdlib PRNG, no source of non-determinism in this module.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ PRNG — the project's sole source of randomness.
///
/// Each host callback that needs randomness (generation, random ticks)
/// receives `&mut GameRng`. Two generators created with the same seed
/// produce identical draw sequences.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    s: [u64; 4],
}

impl GameRng {
    /// Create a new PRNG seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a `u32` by taking the upper 32 bits of a `u64`.
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a uniform integer in `[0, bound)`.
    ///
    /// Uses rejection sampling to avoid modulo bias.
    /// Panics if `bound == 0`.
    pub fn next_int(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "next_int: bound must be nonzero");
        let range = bound as u64;
        if range.is_power_of_two() {
            return (self.next_u64() & (range - 1)) as u32;
        }
        // Rejection sampling to avoid modulo bias.
        let threshold = range.wrapping_neg() % range; // = (2^64 - range) % range
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return (r % range) as u32;
            }
        }
    }

    /// Evaluate a 1-in-`n` weighted chance with a single draw.
    ///
    /// Fires when the draw in `[0, n)` lands on 0, so `chance(1)` always
    /// fires. `n == 0` means the event is disabled and always returns
    /// `false` (no draw is consumed).
    pub fn chance(&mut self, n: u32) -> bool {
        if n == 0 {
            return false;
        }
        self.next_int(n) == 0
    }

    /// Generate a uniform integer in `[low, high]` (inclusive on both ends).
    ///
    /// Panics if `low > high`.
    pub fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        assert!(low <= high, "range_inclusive: low must be <= high");
        low + self.next_int(high - low + 1)
    }
}

/// SplitMix64 — used only for seeding xoshiro256++ from a single `u64`.
///
/// This is the standard recommendation from the xoshiro authors for
/// expanding a small seed into a larger state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
