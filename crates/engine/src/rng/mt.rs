// bmgen - Expression test-input generator
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! MT19937 seeded and sampled the way CPython's `random` module does it.
//!
//! Generation output only reproduces across implementations when the exact
//! generator, seeding routine and float/byte derivations agree. The twister
//! itself comes from `rand_mt`; seeding and the derived draws follow
//! CPython's `_randommodule.c`:
//!
//! - `random.seed(n)` splits `|n|` into little-endian 32-bit words and feeds
//!   them to `init_by_array`.
//! - `random.random()` builds a 53-bit float from two tempered words.
//! - `random.randbytes(k)` is `getrandbits(8 * k).to_bytes(k, "little")`.

use rand_mt::Mt;

/// 32-bit Mersenne Twister.
#[derive(Clone)]
pub struct Mt19937 {
    inner: Mt,
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937").finish_non_exhaustive()
    }
}

impl Mt19937 {
    /// Seed like `random.seed(seed)`. The sign is ignored.
    pub fn new(seed: i64) -> Self {
        let magnitude = seed.unsigned_abs();
        let low = magnitude as u32;
        let high = (magnitude >> 32) as u32;
        if high == 0 {
            Self::from_key(&[low])
        } else {
            Self::from_key(&[low, high])
        }
    }

    /// Classic `init_genrand` seeding with a single word.
    pub fn from_word(seed: u32) -> Self {
        Self { inner: Mt::new(seed) }
    }

    /// Classic `init_by_array` seeding.
    ///
    /// An empty key is treated as `[0]`.
    pub fn from_key(key: &[u32]) -> Self {
        let key = if key.is_empty() { &[0u32][..] } else { key };
        Self { inner: Mt::new_with_key(key.iter().copied()) }
    }

    /// Next tempered 32-bit output (`genrand_uint32`).
    pub fn next_word(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Uniform float in `[0, 1)` with 53 bits of precision (`random.random()`).
    pub fn next_f64(&mut self) -> f64 {
        let a = f64::from(self.next_word() >> 5);
        let b = f64::from(self.next_word() >> 6);
        (a * 67_108_864.0 + b) * (1.0 / 9_007_199_254_740_992.0)
    }

    /// Fill `dest` like `random.randbytes(dest.len())`.
    ///
    /// Words are consumed least significant first; the final partial word
    /// keeps its high bits, matching `getrandbits`.
    pub fn fill_randbytes(&mut self, dest: &mut [u8]) {
        let mut remaining_bits = dest.len() * 8;
        for chunk in dest.chunks_mut(4) {
            let mut word = self.next_word();
            if remaining_bits < 32 {
                word >>= 32 - remaining_bits;
            }
            chunk.copy_from_slice(&word.to_le_bytes()[..chunk.len()]);
            remaining_bits = remaining_bits.saturating_sub(32);
        }
    }
}
