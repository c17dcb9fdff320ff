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

//! Generation profiles.
//!
//! A profile pairs a [`GeneratorConfig`] with the random source that should
//! drive it. Profiles are TOML files embedded in the binary at compile time;
//! fields omitted from a file inherit the `standard` defaults (the
//! `Default` impls).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{config::GeneratorConfig, rng::RngKind, Error, Result};

/// A named generation preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Pseudo-random algorithm.
    pub rng: RngKind,
    /// Grammar parameters.
    pub generator: GeneratorConfig,
}

/// Name of the profile used when none is requested.
pub const DEFAULT_PROFILE: &str = "standard";

// Embedded profile TOML data (compiled into the binary).
static PROFILES: &[(&str, &str)] = &[
    ("standard", include_str!("../profiles/standard.toml")),
    ("classic", include_str!("../profiles/classic.toml")),
    ("reference", include_str!("../profiles/reference.toml")),
];

/// Returns a list of available profile names.
pub fn available_profiles() -> Vec<&'static str> {
    PROFILES.iter().map(|(name, _)| *name).collect()
}

impl Profile {
    /// Parse a TOML string, using defaults for omitted fields.
    pub fn from_toml(name: &str, toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|source| Error::ProfileParse { name: name.to_string(), source })
    }

    /// Load a profile from a TOML file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| Error::ProfileRead { path: path.to_path_buf(), source })?;
        Self::from_toml(&path.display().to_string(), &content)
    }

    /// Look up an embedded profile by name.
    pub fn embedded(name: &str) -> Result<Self> {
        PROFILES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .ok_or_else(|| Error::UnknownProfile {
                name: name.to_string(),
                available: available_profiles().join(", "),
            })
            .and_then(|(name, toml_str)| Self::from_toml(name, toml_str))
    }

    /// Get a profile by name, or load it from a file path.
    ///
    /// If `name_or_path` contains `/` or ends with `.toml`, it is treated as
    /// a file path. Otherwise it is looked up among the embedded profiles.
    pub fn load(name_or_path: &str) -> Result<Self> {
        if name_or_path.contains('/') || name_or_path.ends_with(".toml") {
            Self::from_file(Path::new(name_or_path))
        } else {
            Self::embedded(name_or_path)
        }
    }

    /// Override the random source
    pub fn with_rng(mut self, rng: RngKind) -> Self {
        self.rng = rng;
        self
    }
}
