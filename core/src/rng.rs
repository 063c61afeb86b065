//! Deterministic RNG primitives used by the raid pipeline.
//!
//! Two generators live here: the 128-bit long-period generator the game
//! uses for every encounter roll, and the 32-bit stream generator the
//! save codec uses to mask block payloads. Neither is a general-purpose
//! RNG; both must reproduce the game's output bit for bit.

/// 128-bit xoroshiro generator. One output is `s0 + s1` (mod 2^64).
///
/// Bounded draws use bitmask rejection, never modulo. A modulo reduction
/// would change which raw draws are consumed and produce different
/// creatures downstream.
#[derive(Clone, Debug)]
pub struct Xoroshiro128Plus {
    s0: u64,
    s1: u64,
}

impl Xoroshiro128Plus {
    pub const SEED_CONST: u64 = 0x82A2_B175_229D_6A5B;

    /// Seed constructor: `s0 = seed`, `s1` is the fixed constant.
    pub fn new(seed: u64) -> Self {
        Self {
            s0: seed,
            s1: Self::SEED_CONST,
        }
    }

    pub fn from_state(s0: u64, s1: u64) -> Self {
        Self { s0, s1 }
    }

    pub fn next(&mut self) -> u64 {
        let s0 = self.s0;
        let mut s1 = self.s1;
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.s0 = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.s1 = s1.rotate_left(37);

        result
    }

    /// Draw a value in `[0, max)` by masking the raw output down to the
    /// smallest covering power of two and retrying until it lands in
    /// range. `next_bounded(1)` always returns 0 without rejecting.
    pub fn next_bounded(&mut self, max: u64) -> u64 {
        let mask = Self::bitmask(max);
        loop {
            let result = self.next() & mask;
            if result < max {
                return result;
            }
        }
    }

    fn bitmask(exclusive_max: u64) -> u64 {
        let top = exclusive_max - 1;
        if top == 0 {
            return 0;
        }
        u64::MAX >> top.leading_zeros()
    }
}

/// 32-bit xorshift stream used by the save codec.
///
/// Construction pre-steps the state once per set bit of the seed. The
/// 4-byte output register is exposed one byte at a time; the state
/// advances after the fourth byte is produced, not before.
pub struct XorShift32 {
    state: u32,
    counter: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        let mut state = seed;
        for _ in 0..seed.count_ones() {
            state = Self::advance(state);
        }
        Self { state, counter: 0 }
    }

    fn advance(mut state: u32) -> u32 {
        state ^= state << 2;
        state ^= state >> 15;
        state ^= state << 13;
        state
    }

    /// Next keystream byte.
    pub fn next(&mut self) -> u8 {
        let result = (self.state >> (self.counter << 3)) as u8;
        if self.counter == 3 {
            self.state = Self::advance(self.state);
            self.counter = 0;
        } else {
            self.counter += 1;
        }
        result
    }

    /// Four consecutive keystream bytes as a little-endian u32.
    pub fn next32(&mut self) -> u32 {
        u32::from_le_bytes([self.next(), self.next(), self.next(), self.next()])
    }
}
