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

//! Tables command - emit the tokenizer lookup header

use std::io::Write;

use bmgen_tables::{render_header, standard_tables};
use eyre::{Result, WrapErr};

/// Render every lookup table into `out`
pub fn write_tables<W: Write + ?Sized>(out: &mut W) -> Result<()> {
    let header = render_header(&standard_tables());
    out.write_all(header.as_bytes()).wrap_err("failed to write lookup tables")?;
    out.flush().wrap_err("failed to write lookup tables")?;
    tracing::info!(bytes = header.len(), "Lookup tables written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_tables() {
        let mut out = Vec::new();
        write_tables(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("// THIS FILE IS GENERATED!"));
        assert_eq!(text.matches("static inline int").count(), 5);
    }
}
