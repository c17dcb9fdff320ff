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

//! Generate command - the default action of the binary

use std::{io::Write, path::PathBuf};

use bmgen_engine::{Driver, Profile, RngKind, RunSummary, DEFAULT_PROFILE};
use clap::Args;
use eyre::{Result, WrapErr};

/// Options controlling a generation run
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Number of expressions to generate
    #[arg(short, long, default_value_t = 1)]
    pub iterations: u64,

    /// Seed for the random source; only its magnitude matters
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub seed: i64,

    /// Embedded profile name, or path to a profile TOML file
    #[arg(short, long, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Random source, overriding the profile (mt19937 or std)
    #[arg(long)]
    pub rng: Option<RngKind>,

    /// Write expressions to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            iterations: 1,
            seed: 0,
            profile: DEFAULT_PROFILE.to_string(),
            rng: None,
            output: None,
        }
    }
}

/// Resolve the profile named by `args` and write its expressions to `out`
pub fn generate<W: Write + ?Sized>(args: &GenerateArgs, out: &mut W) -> Result<RunSummary> {
    let mut profile = Profile::load(&args.profile)
        .wrap_err_with(|| format!("failed to load profile `{}`", args.profile))?;
    if let Some(rng) = args.rng {
        profile = profile.with_rng(rng);
    }

    let driver = Driver::new(profile)
        .wrap_err_with(|| format!("profile `{}` is not a valid generator", args.profile))?;
    let summary =
        driver.run(args.seed, args.iterations, out).wrap_err("failed to write expressions")?;

    tracing::info!(
        profile = %args.profile,
        lines = summary.lines,
        bytes = summary.bytes,
        "Generation finished"
    );
    Ok(summary)
}
