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

//! Run orchestration: seed once, generate N expressions, write one per line.

use std::io::Write;

use tracing::{debug, info};

use crate::{
    grammar::{ExprGenerator, Grammar},
    profile::Profile,
    rng::{RngKind, SeededRng},
    Result,
};

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of expressions written
    pub lines: u64,
    /// Number of bytes written, newlines included
    pub bytes: u64,
}

/// Drives a grammar with a freshly seeded random source per run.
#[derive(Debug, Clone)]
pub struct Driver {
    grammar: Grammar,
    rng: RngKind,
}

impl Driver {
    /// Validate the profile and build its grammar.
    pub fn new(profile: Profile) -> Result<Self> {
        Ok(Self { grammar: Grammar::new(profile.generator)?, rng: profile.rng })
    }

    /// The grammar in use.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The random source kind in use.
    pub fn rng_kind(&self) -> RngKind {
        self.rng
    }

    /// Write `iterations` expressions to `out`, one per line, and flush once.
    pub fn run<W: Write + ?Sized>(
        &self,
        seed: i64,
        iterations: u64,
        out: &mut W,
    ) -> Result<RunSummary> {
        info!(seed, iterations, rng = %self.rng, "Generating expressions");

        let mut rng = SeededRng::new(self.rng, seed);
        let mut generator = ExprGenerator::new(&mut rng, &self.grammar);
        let mut summary = RunSummary::default();

        for _ in 0..iterations {
            let expr = generator.expression(0);
            out.write_all(expr.as_bytes())?;
            out.write_all(b"\n")?;
            summary.lines += 1;
            summary.bytes += expr.len() as u64 + 1;
        }
        out.flush()?;

        debug!(lines = summary.lines, bytes = summary.bytes, "Run complete");
        Ok(summary)
    }

    /// Generate `iterations` expressions in memory.
    pub fn expressions(&self, seed: i64, iterations: usize) -> Vec<String> {
        let mut rng = SeededRng::new(self.rng, seed);
        let mut generator = ExprGenerator::new(&mut rng, &self.grammar);
        (0..iterations).map(|_| generator.expression(0)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_iterations_writes_nothing() {
        let driver = Driver::new(Profile::default()).unwrap();
        let mut out = Vec::new();
        let summary = driver.run(0, 0, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(summary, RunSummary::default());
    }

    #[test]
    fn test_run_matches_in_memory_generation() {
        let driver = Driver::new(Profile::default()).unwrap();
        let mut out = Vec::new();
        let summary = driver.run(3, 25, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected: String =
            driver.expressions(3, 25).into_iter().map(|line| line + "\n").collect();
        assert_eq!(text, expected);
        assert_eq!(summary.lines, 25);
        assert_eq!(summary.bytes, text.len() as u64);
    }

    #[test]
    fn test_each_run_reseeds() {
        let driver = Driver::new(Profile::default()).unwrap();
        let (mut first, mut second) = (Vec::new(), Vec::new());
        driver.run(0, 10, &mut first).unwrap();
        driver.run(0, 10, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rng_kind_is_respected() {
        let twister = Driver::new(Profile::default()).unwrap();
        let standard = Driver::new(Profile::default().with_rng(RngKind::Std)).unwrap();
        assert_eq!(twister.rng_kind(), RngKind::Mt19937);
        assert_eq!(standard.rng_kind(), RngKind::Std);
        assert_eq!(twister.grammar().config(), standard.grammar().config());
        assert_ne!(twister.expressions(1, 20), standard.expressions(1, 20));
    }
}
