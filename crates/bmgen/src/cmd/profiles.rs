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

//! Profiles command - list the embedded generator profiles

use std::io::Write;

use bmgen_engine::{available_profiles, Profile, DEFAULT_PROFILE};
use eyre::{Result, WrapErr};

/// Write one line per embedded profile: its name and random source
pub fn list_profiles<W: Write + ?Sized>(out: &mut W) -> Result<()> {
    for name in available_profiles() {
        let profile = Profile::embedded(name)?;
        let marker = if name == DEFAULT_PROFILE { " (default)" } else { "" };
        writeln!(out, "{name}\trng={}{marker}", profile.rng)
            .wrap_err("failed to write profile list")?;
    }
    out.flush()?;
    Ok(())
}
