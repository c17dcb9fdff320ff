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

//! Random sources for expression generation.
//!
//! The generator never touches a global generator. It borrows something
//! implementing [`RandomSource`] for the duration of a run, and every draw
//! happens in strict depth-first, left-to-right order, so a seed fully
//! determines the output.

mod mt;

pub use mt::Mt19937;

use std::{fmt, str::FromStr};

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// The two primitive draws the grammar needs.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Fill `dest` with random bytes.
    fn fill(&mut self, dest: &mut [u8]);

    /// Uniform integer in `low..=high`, derived from a single [`uniform`](Self::uniform) draw.
    fn between(&mut self, low: usize, high: usize) -> usize {
        debug_assert!(low <= high);
        let span = (high - low + 1) as f64;
        let offset = (self.uniform() * span) as usize;
        low + offset.min(high - low)
    }
}

impl RandomSource for Mt19937 {
    fn uniform(&mut self) -> f64 {
        self.next_f64()
    }

    fn fill(&mut self, dest: &mut [u8]) {
        self.fill_randbytes(dest);
    }
}

impl RandomSource for StdRng {
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn fill(&mut self, dest: &mut [u8]) {
        self.fill_bytes(dest);
    }
}

/// Which pseudo-random algorithm backs a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RngKind {
    /// MT19937 with CPython seeding and draw semantics.
    #[default]
    Mt19937,
    /// `rand`'s `StdRng`; stable only for a fixed `rand` release.
    Std,
}

impl RngKind {
    /// All kinds, in the order they are listed to users.
    pub const ALL: [Self; 2] = [Self::Mt19937, Self::Std];

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mt19937 => "mt19937",
            Self::Std => "std",
        }
    }
}

impl fmt::Display for RngKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RngKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown rng `{s}`, expected one of: mt19937, std"))
    }
}

/// A seeded source of either kind, owned by the driver for one run.
#[derive(Debug, Clone)]
pub enum SeededRng {
    /// CPython-compatible Mersenne Twister
    Mt19937(Mt19937),
    /// `rand` standard generator
    Std(StdRng),
}

impl SeededRng {
    /// Create a source of the given kind from an integer seed.
    ///
    /// Only the magnitude of `seed` matters, as with `random.seed`.
    pub fn new(kind: RngKind, seed: i64) -> Self {
        match kind {
            RngKind::Mt19937 => Self::Mt19937(Mt19937::new(seed)),
            RngKind::Std => Self::Std(StdRng::seed_from_u64(seed.unsigned_abs())),
        }
    }

    /// The algorithm behind this source.
    pub const fn kind(&self) -> RngKind {
        match self {
            Self::Mt19937(_) => RngKind::Mt19937,
            Self::Std(_) => RngKind::Std,
        }
    }
}

impl RandomSource for SeededRng {
    fn uniform(&mut self) -> f64 {
        match self {
            Self::Mt19937(rng) => rng.uniform(),
            Self::Std(rng) => rng.uniform(),
        }
    }

    fn fill(&mut self, dest: &mut [u8]) {
        match self {
            Self::Mt19937(rng) => RandomSource::fill(rng, dest),
            Self::Std(rng) => RandomSource::fill(rng, dest),
        }
    }
}
