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

//! Error types for the expression generator.
//!
//! Generation itself never fails once a [`crate::Grammar`] has been built;
//! every error here comes from validating configuration, loading profiles
//! or writing output.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias used across the engine.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while building or driving a generator.
#[derive(Debug, Error)]
pub enum Error {
    /// The operator table has no entries.
    #[error("operator table is empty")]
    EmptyOperatorTable,

    /// An operator or prefix symbol is the empty string.
    #[error("{kind} symbol must not be empty")]
    EmptySymbol {
        /// Which table the symbol belongs to
        kind: &'static str,
    },

    /// An operator weight is negative, NaN or infinite.
    #[error("invalid weight {weight} for operator `{symbol}`")]
    InvalidWeight {
        /// Operator symbol
        symbol: String,
        /// Offending weight
        weight: f64,
    },

    /// All operator weights are zero.
    #[error("operator weights sum to zero")]
    ZeroWeightSum,

    /// A probability threshold lies outside `[0, 1]`.
    #[error("`{name}` must be within [0, 1], got {value}")]
    ThresholdOutOfRange {
        /// Name of the config field
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Operand width bounds are unusable.
    #[error("invalid operand width: min_bytes = {min}, max_bytes = {max} (allowed 1..={limit})")]
    InvalidByteRange {
        /// Configured lower bound
        min: usize,
        /// Configured upper bound
        max: usize,
        /// Largest supported width
        limit: usize,
    },

    /// `max_depth` exceeds the supported recursion depth.
    #[error("max_depth = {max_depth} exceeds the limit of {limit}")]
    DepthTooLarge {
        /// Configured depth
        max_depth: u32,
        /// Deepest supported value
        limit: u32,
    },

    /// Expression chains can never end: `bound_chains` is off and the
    /// termination draw can never reach `terminate_threshold`.
    #[error("terminate_threshold = {threshold} never ends a chain unless bound_chains is set")]
    UnboundedChains {
        /// Configured termination threshold
        threshold: f64,
    },

    /// The skewed byte-length scale is zero.
    #[error("byte length scale must be positive")]
    ZeroScale,

    /// The profile name is not one of the embedded profiles.
    #[error("unknown profile `{name}`, available profiles: {available}")]
    UnknownProfile {
        /// Requested profile
        name: String,
        /// Comma separated list of embedded profiles
        available: String,
    },

    /// A profile file could not be read.
    #[error("failed to read profile file `{}`: {source}", .path.display())]
    ProfileRead {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A profile could not be parsed as TOML.
    #[error("failed to parse profile `{name}`: {source}")]
    ProfileParse {
        /// Profile name or path
        name: String,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// Writing generated output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}
