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

//! bmgen Engine - randomized expression grammar generator
//!
//! Produces syntactically valid integer expressions mixing decimal and
//! hexadecimal literals, unary and binary operators and nested parentheses,
//! for fuzzing and benchmarking an arbitrary-precision expression evaluator.
//!
//! The moving parts, leaves first:
//! - [`rng`]: explicit, seeded random sources (never a global)
//! - [`number`]: operand synthesis
//! - [`operator`]: weighted binary operator selection
//! - [`grammar`]: the recursive expression / signed-factor builders
//! - [`driver`]: seeding and line-oriented output
//! - [`config`] and [`profile`]: parameters and embedded presets

/// Generator configuration and validation
pub mod config;
/// Run orchestration and output writing
pub mod driver;
/// Error types
pub mod error;
/// Expression and signed-factor builders
pub mod grammar;
/// Operand synthesis
pub mod number;
/// Weighted operator table
pub mod operator;
/// Embedded and file-based profiles
pub mod profile;
/// Random sources
pub mod rng;

pub use config::*;
pub use driver::*;
pub use error::*;
pub use grammar::*;
pub use number::*;
pub use operator::*;
pub use profile::*;
pub use rng::*;
