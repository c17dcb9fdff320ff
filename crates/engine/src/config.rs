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

//! Generator configuration.
//!
//! Every threshold, weight and limit of the grammar lives in
//! [`GeneratorConfig`]. The `Default` impl is the `standard` profile; TOML
//! profiles use `#[serde(default)]` so they only state what differs.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Widest operand the synthesizer can render as decimal (`u128`).
pub const MAX_OPERAND_BYTES: usize = 16;

/// Deepest `max_depth` accepted; recursion depth grows linearly with it.
pub const MAX_DEPTH_LIMIT: u32 = 64;

/// How the number of bytes in an operand is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ByteLength {
    /// `max(floor(u * scale) % max_bytes, min_bytes)`, skewed toward short operands.
    Skewed {
        /// Multiplier applied to the uniform draw before the modulo
        scale: u32,
    },
    /// Uniform in `min_bytes..=max_bytes`.
    Uniform,
}

impl Default for ByteLength {
    fn default() -> Self {
        Self::Skewed { scale: 1000 }
    }
}

/// One entry of the unary prefix chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefixRule {
    /// The rule fires when the prefix draw is `>= threshold`
    pub threshold: f64,
    /// Text prepended to the factor
    pub symbol: String,
}

impl PrefixRule {
    /// Create a rule.
    pub fn new(threshold: f64, symbol: impl Into<String>) -> Self {
        Self { threshold, symbol: symbol.into() }
    }
}

/// A binary operator and its relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorWeight {
    /// Operator text as emitted
    pub symbol: String,
    /// Relative mass, normalized against the whole table
    pub weight: f64,
}

impl OperatorWeight {
    /// Create an entry.
    pub fn new(symbol: impl Into<String>, weight: f64) -> Self {
        Self { symbol: symbol.into(), weight }
    }
}

/// Full parameterization of the expression grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Smallest operand width in bytes.
    pub min_bytes: usize,
    /// Largest operand width in bytes.
    pub max_bytes: usize,
    /// Draws `>=` this render an operand in decimal, otherwise in hex.
    pub decimal_threshold: f64,
    /// Draws `>=` this wrap a factor in a parenthesized sub-expression.
    pub paren_threshold: f64,
    /// Draws `>=` this end a binary chain with a single factor.
    pub terminate_threshold: f64,
    /// Depth at which parenthesized recursion stops.
    pub max_depth: u32,
    /// Also stop binary chains once `max_depth` is reached.
    pub bound_chains: bool,
    /// Allow a unary prefix on factors generated at `max_depth`.
    pub prefix_at_depth_cap: bool,
    /// Distribution of operand widths.
    pub byte_length: ByteLength,
    /// Unary prefix rules; the first matching entry wins.
    pub prefixes: Vec<PrefixRule>,
    /// Binary operators with relative weights.
    pub operators: Vec<OperatorWeight>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_bytes: 1,
            max_bytes: 8,
            decimal_threshold: 0.4,
            paren_threshold: 0.3,
            terminate_threshold: 0.4,
            max_depth: 4,
            bound_chains: true,
            prefix_at_depth_cap: true,
            byte_length: ByteLength::default(),
            prefixes: default_prefixes(),
            operators: default_operators(),
        }
    }
}

/// `+` is rarest, then `~`, then `-`.
pub fn default_prefixes() -> Vec<PrefixRule> {
    vec![PrefixRule::new(0.999, "+"), PrefixRule::new(0.99, "~"), PrefixRule::new(0.9, "-")]
}

/// The full binary operator set with its relative weights.
pub fn default_operators() -> Vec<OperatorWeight> {
    [
        ("^", 0.60),
        ("&", 0.70),
        ("|", 0.80),
        ("<<", 0.30),
        (">>", 0.20),
        ("+", 0.10),
        ("-", 0.10),
        ("*", 0.05),
        ("%", 0.005),
    ]
    .into_iter()
    .map(|(symbol, weight)| OperatorWeight::new(symbol, weight))
    .collect()
}

impl GeneratorConfig {
    /// Set the decimal-vs-hex threshold
    pub fn with_decimal_threshold(mut self, threshold: f64) -> Self {
        self.decimal_threshold = threshold;
        self
    }

    /// Set the parenthesize threshold
    pub fn with_paren_threshold(mut self, threshold: f64) -> Self {
        self.paren_threshold = threshold;
        self
    }

    /// Set the chain termination threshold
    pub fn with_terminate_threshold(mut self, threshold: f64) -> Self {
        self.terminate_threshold = threshold;
        self
    }

    /// Set the recursion depth cap
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the operand width bounds
    pub fn with_byte_range(mut self, min_bytes: usize, max_bytes: usize) -> Self {
        self.min_bytes = min_bytes;
        self.max_bytes = max_bytes;
        self
    }

    /// Replace the operator table
    pub fn with_operators(mut self, operators: Vec<OperatorWeight>) -> Self {
        self.operators = operators;
        self
    }

    /// Replace the prefix chain
    pub fn with_prefixes(mut self, prefixes: Vec<PrefixRule>) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Check every field; operator weights are checked when the table is built.
    pub fn validate(&self) -> Result<()> {
        if self.min_bytes == 0 || self.min_bytes > self.max_bytes || self.max_bytes > MAX_OPERAND_BYTES
        {
            return Err(Error::InvalidByteRange {
                min: self.min_bytes,
                max: self.max_bytes,
                limit: MAX_OPERAND_BYTES,
            });
        }
        if let ByteLength::Skewed { scale: 0 } = self.byte_length {
            return Err(Error::ZeroScale);
        }

        check_threshold("decimal_threshold", self.decimal_threshold)?;
        check_threshold("paren_threshold", self.paren_threshold)?;
        check_threshold("terminate_threshold", self.terminate_threshold)?;

        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(Error::DepthTooLarge { max_depth: self.max_depth, limit: MAX_DEPTH_LIMIT });
        }
        // Draws are in [0, 1), so a threshold of 1.0 never terminates a chain
        if !self.bound_chains && self.terminate_threshold >= 1.0 {
            return Err(Error::UnboundedChains { threshold: self.terminate_threshold });
        }

        for rule in &self.prefixes {
            check_threshold("prefixes.threshold", rule.threshold)?;
            if rule.symbol.is_empty() {
                return Err(Error::EmptySymbol { kind: "prefix" });
            }
        }

        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::ThresholdOutOfRange { name, value })
    }
}
