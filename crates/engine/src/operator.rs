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

//! Weighted operator selection.
//!
//! Relative weights are normalized once and accumulated into a cumulative
//! table. A uniform draw maps to the leftmost entry whose cumulative weight
//! is `>=` the draw.

use crate::{config::OperatorWeight, rng::RandomSource, Error, Result};

/// Operators with their cumulative selection weights.
///
/// Invariant: `cumulative` is non-decreasing and its last entry is exactly
/// `1.0`, so every draw in `[0, 1)` resolves to a valid index.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorTable {
    symbols: Vec<String>,
    cumulative: Vec<f64>,
}

impl OperatorTable {
    /// Normalize and accumulate a list of relative weights.
    pub fn from_weights(weights: &[OperatorWeight]) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::EmptyOperatorTable);
        }

        let mut total = 0.0;
        for entry in weights {
            if entry.symbol.is_empty() {
                return Err(Error::EmptySymbol { kind: "operator" });
            }
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(Error::InvalidWeight {
                    symbol: entry.symbol.clone(),
                    weight: entry.weight,
                });
            }
            total += entry.weight;
        }
        if total <= 0.0 {
            return Err(Error::ZeroWeightSum);
        }

        let mut running = 0.0;
        let mut cumulative: Vec<f64> = weights
            .iter()
            .map(|entry| {
                running += entry.weight / total;
                running
            })
            .collect();
        // Absorb rounding so the table always ends at exactly 1.0
        if let Some(last) = cumulative.last_mut() {
            *last = 1.0;
        }

        let symbols = weights.iter().map(|entry| entry.symbol.clone()).collect();
        Ok(Self { symbols, cumulative })
    }

    /// Index of the leftmost entry whose cumulative weight is `>= draw`.
    pub fn index_for(&self, draw: f64) -> usize {
        self.cumulative.partition_point(|c| *c < draw).min(self.symbols.len() - 1)
    }

    /// Draw one operator.
    pub fn select<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &str {
        let index = self.index_for(rng.uniform());
        &self.symbols[index]
    }

    /// Number of operators.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Normalized probability of the operator at `index`.
    pub fn probability(&self, index: usize) -> f64 {
        let prev = if index == 0 { 0.0 } else { self.cumulative[index - 1] };
        self.cumulative[index] - prev
    }

    /// Operator symbols in table order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Operators paired with their normalized probabilities.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.symbols().enumerate().map(|(index, symbol)| (symbol, self.probability(index)))
    }

    /// Whether `symbol` is one of the configured operators.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// Cumulative weights in table order.
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }
}
