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

//! Character-class lookup tables for the bmath tokenizer.
//!
//! The evaluator classifies input bytes through 128-entry arrays instead of
//! branching on every character. This crate owns the definition of those
//! classes and renders them as the C header the evaluator includes.

use std::fmt::{self, Write};

/// Number of entries in every table; the tokenizer only accepts ASCII.
pub const TABLE_SIZE: usize = 128;

/// Entries rendered per row of a table in the header.
const VALUES_PER_ROW: usize = 16;

/// Characters the tokenizer accepts outside of letters and digits.
const ALLOWED_PUNCTUATION: &[u8] = b"~()><|&^ \t\n\r";

/// A character class backed by a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Hex digits in either case.
    AllowedHex,
    /// Numeric value of a hex digit, zero for anything else.
    HexToValue,
    /// Decimal digits.
    Digit,
    /// Upper case hex letters `A-F`.
    CapitalHex,
    /// Every character that may appear in an expression.
    AllowedCharacter,
}

impl TableKind {
    /// All tables in the order they appear in the header.
    pub const ALL: [Self; 5] = [
        Self::AllowedHex,
        Self::HexToValue,
        Self::Digit,
        Self::CapitalHex,
        Self::AllowedCharacter,
    ];

    /// Name of the C array.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AllowedHex => "lookup_is_allowed_hex",
            Self::HexToValue => "lookup_hex_to_value",
            Self::Digit => "lookup_is_digit",
            Self::CapitalHex => "lookup_is_capital_hex",
            Self::AllowedCharacter => "lookup_is_allowed_character",
        }
    }

    /// Name of the inline accessor wrapping the array.
    pub const fn accessor(self) -> &'static str {
        match self {
            Self::AllowedHex => "__is_allowed_hex",
            Self::HexToValue => "__hex_to_value",
            Self::Digit => "__is_digit",
            Self::CapitalHex => "__is_capital_hex",
            Self::AllowedCharacter => "__is_allowed_character",
        }
    }

    /// Table entry for an ASCII byte.
    pub fn value(self, byte: u8) -> u8 {
        match self {
            Self::AllowedHex => byte.is_ascii_hexdigit().into(),
            Self::HexToValue => match byte {
                b'0'..=b'9' => byte - b'0',
                b'a'..=b'f' => byte - b'a' + 10,
                b'A'..=b'F' => byte - b'A' + 10,
                _ => 0,
            },
            Self::Digit => byte.is_ascii_digit().into(),
            Self::CapitalHex => matches!(byte, b'A'..=b'F').into(),
            Self::AllowedCharacter => {
                (byte.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(&byte)).into()
            }
        }
    }
}

/// A fully materialized table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    kind: TableKind,
    values: [u8; TABLE_SIZE],
}

impl LookupTable {
    /// Materialize the table for `kind`.
    pub fn new(kind: TableKind) -> Self {
        let mut values = [0u8; TABLE_SIZE];
        for (byte, slot) in (0u8..).zip(values.iter_mut()) {
            *slot = kind.value(byte);
        }
        Self { kind, values }
    }

    /// The class this table encodes.
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Raw table entries indexed by byte.
    pub fn values(&self) -> &[u8; TABLE_SIZE] {
        &self.values
    }

    /// Look up a character. Non-ASCII characters map to zero, which is how
    /// the tokenizer rejects them.
    pub fn get(&self, c: char) -> u8 {
        usize::try_from(u32::from(c))
            .ok()
            .and_then(|index| self.values.get(index))
            .copied()
            .unwrap_or(0)
    }
}

impl fmt::Display for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.kind.label();
        write!(f, "static int {label}[] = {{")?;
        for (i, value) in self.values.iter().enumerate() {
            if i % VALUES_PER_ROW == 0 {
                f.write_str("\n    ")?;
            }
            write!(f, "{value}, ")?;
        }
        f.write_str("\n};\n\n")?;
        writeln!(f, "static inline int {}(char c)", self.kind.accessor())?;
        f.write_str("{\n")?;
        writeln!(f, "\treturn {label}[(int) c];")?;
        f.write_str("}\n")
    }
}

/// Every table the evaluator includes, in header order.
pub fn standard_tables() -> Vec<LookupTable> {
    TableKind::ALL.into_iter().map(LookupTable::new).collect()
}

/// Render `tables` as a complete, include-guarded C header.
pub fn render_header(tables: &[LookupTable]) -> String {
    let mut out = String::from("// THIS FILE IS GENERATED!\n");
    out.push_str("#ifndef LOOKUP_TABLES_H\n#define LOOKUP_TABLES_H\n\n");
    for table in tables {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{table}");
    }
    out.push_str("#endif\n");
    tracing::debug!(tables = tables.len(), bytes = out.len(), "rendered lookup header");
    out
}
