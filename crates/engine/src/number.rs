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

//! Operand synthesis.
//!
//! An operand is a short random byte string read as a big-endian unsigned
//! integer and rendered either as plain decimal or as `0x` followed by two
//! lowercase hex digits per byte.

use std::fmt;

use crate::{
    config::{ByteLength, GeneratorConfig},
    rng::RandomSource,
};

/// Literal notation of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    /// Plain base-10 digits
    Decimal,
    /// `0x` prefix, whole-byte lowercase hex
    Hex,
}

/// A synthesized operand: its raw bytes and how they are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    bytes: Vec<u8>,
    radix: Radix,
}

impl Operand {
    /// Build an operand from big-endian bytes.
    ///
    /// At most 16 bytes are supported so the value fits a `u128`.
    pub fn new(bytes: Vec<u8>, radix: Radix) -> Self {
        debug_assert!(!bytes.is_empty() && bytes.len() <= crate::MAX_OPERAND_BYTES);
        Self { bytes, radix }
    }

    /// Raw big-endian bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Notation used when rendering.
    pub const fn radix(&self) -> Radix {
        self.radix
    }

    /// Numeric value of the bytes.
    pub fn value(&self) -> u128 {
        self.bytes.iter().fold(0u128, |acc, b| (acc << 8) | u128::from(*b))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.radix {
            Radix::Decimal => write!(f, "{}", self.value()),
            Radix::Hex => write!(f, "0x{}", hex::encode(&self.bytes)),
        }
    }
}

/// Draws operands according to a [`GeneratorConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct NumberSynth {
    min_bytes: usize,
    max_bytes: usize,
    byte_length: ByteLength,
    decimal_threshold: f64,
}

impl NumberSynth {
    /// Take the operand settings out of a validated config.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            min_bytes: config.min_bytes,
            max_bytes: config.max_bytes,
            byte_length: config.byte_length,
            decimal_threshold: config.decimal_threshold,
        }
    }

    /// Draw the number of bytes for the next operand.
    pub fn byte_count<R: RandomSource + ?Sized>(&self, rng: &mut R) -> usize {
        match self.byte_length {
            ByteLength::Skewed { scale } => {
                let scaled = (rng.uniform() * f64::from(scale)) as usize;
                (scaled % self.max_bytes).max(self.min_bytes)
            }
            ByteLength::Uniform => rng.between(self.min_bytes, self.max_bytes),
        }
    }

    /// Draw `byte_count` bytes.
    pub fn bytes<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<u8> {
        let mut buf = vec![0u8; self.byte_count(rng)];
        rng.fill(&mut buf);
        buf
    }

    /// Draw a complete operand: notation first, then width, then bytes.
    pub fn operand<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Operand {
        let radix =
            if rng.uniform() >= self.decimal_threshold { Radix::Decimal } else { Radix::Hex };
        Operand::new(self.bytes(rng), radix)
    }
}
