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

//! Grammar-based expression generation.
//!
//! ```text
//! expression(d)    := signed_factor(d + 1)
//!                   | expression(d + 1) " " op " " signed_factor(d + 1)
//! signed_factor(d) := [prefix] (operand | "(" expression(d + 1) ")")
//! ```
//!
//! Parenthesized recursion is only allowed below `max_depth`, which bounds
//! nesting. Draw order is fixed (see each method) so a seed fully determines
//! the output.

use crate::{
    config::{GeneratorConfig, PrefixRule},
    number::NumberSynth,
    operator::OperatorTable,
    rng::RandomSource,
    Result,
};

/// Ordered unary prefix rules, evaluated top-down on a single draw.
///
/// Earlier entries take precedence: with `+ >= 0.999`, `~ >= 0.99`,
/// `- >= 0.9`, a draw of `0.995` yields `~` even though `-` also matches.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixChain {
    rules: Vec<PrefixRule>,
}

impl PrefixChain {
    /// Wrap an ordered list of rules.
    pub fn new(rules: Vec<PrefixRule>) -> Self {
        Self { rules }
    }

    /// The first rule whose threshold is `<= draw`, if any.
    pub fn pick(&self, draw: f64) -> Option<&str> {
        self.rules.iter().find(|rule| draw >= rule.threshold).map(|rule| rule.symbol.as_str())
    }
}

/// A validated grammar, built once per run and shared by every expression.
#[derive(Debug, Clone)]
pub struct Grammar {
    config: GeneratorConfig,
    operators: OperatorTable,
    prefixes: PrefixChain,
    numbers: NumberSynth,
}

impl Grammar {
    /// Validate `config` and precompute the operator table.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let operators = OperatorTable::from_weights(&config.operators)?;
        let prefixes = PrefixChain::new(config.prefixes.clone());
        let numbers = NumberSynth::from_config(&config);

        tracing::debug!(
            operators = operators.len(),
            max_depth = config.max_depth,
            bound_chains = config.bound_chains,
            "Built expression grammar"
        );

        Ok(Self { config, operators, prefixes, numbers })
    }

    /// The configuration this grammar was built from.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The binary operator table.
    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }
}

/// Expression generator borrowing a grammar and a random source.
pub struct ExprGenerator<'a, R: ?Sized> {
    rng: &'a mut R,
    grammar: &'a Grammar,
}

impl<'a, R: RandomSource + ?Sized> ExprGenerator<'a, R> {
    /// Create a new expression generator.
    pub fn new(rng: &'a mut R, grammar: &'a Grammar) -> Self {
        Self { rng, grammar }
    }

    /// Generate a full expression starting at `depth`.
    ///
    /// Draws: operator, then the termination value, then the sub-productions
    /// left to right. The operator draw is consumed even when the chain ends.
    pub fn expression(&mut self, depth: u32) -> String {
        let grammar = self.grammar;
        let config = &grammar.config;
        let op = grammar.operators.select(self.rng);

        let at_cap = config.bound_chains && depth >= config.max_depth;
        if self.rng.uniform() >= config.terminate_threshold || at_cap {
            return self.signed_factor(depth + 1);
        }

        let left = self.expression(depth + 1);
        let right = self.signed_factor(depth + 1);
        format!("{left} {op} {right}")
    }

    /// Generate an operand or parenthesized sub-expression with an optional prefix.
    ///
    /// Draws: parenthesize value, the operand, the sub-expression (if any),
    /// then the prefix value. At the depth cap the prefix draw is skipped
    /// unless `prefix_at_depth_cap` is set.
    pub fn signed_factor(&mut self, depth: u32) -> String {
        let grammar = self.grammar;
        let config = &grammar.config;
        let paren_draw = self.rng.uniform();
        let mut out = grammar.numbers.operand(self.rng).to_string();

        if depth >= config.max_depth {
            if !config.prefix_at_depth_cap {
                return out;
            }
        } else if paren_draw >= config.paren_threshold {
            out = format!("({})", self.expression(depth + 1));
        }

        match grammar.prefixes.pick(self.rng.uniform()) {
            Some(prefix) => format!("{prefix}{out}"),
            None => out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_prefixes;
    use rand::{rngs::StdRng, SeedableRng};

    fn grammar() -> Grammar {
        Grammar::new(GeneratorConfig::default()).unwrap()
    }

    fn paren_depth(expr: &str) -> usize {
        let mut depth = 0usize;
        let mut max = 0usize;
        for c in expr.chars() {
            match c {
                '(' => {
                    depth += 1;
                    max = max.max(depth);
                }
                ')' => depth -= 1,
                _ => {}
            }
        }
        assert_eq!(depth, 0, "unbalanced: {expr}");
        max
    }

    #[test]
    fn test_prefix_chain_precedence() {
        let chain = PrefixChain::new(default_prefixes());
        assert_eq!(chain.pick(0.0), None);
        assert_eq!(chain.pick(0.899), None);
        assert_eq!(chain.pick(0.9), Some("-"));
        assert_eq!(chain.pick(0.95), Some("-"));
        assert_eq!(chain.pick(0.99), Some("~"));
        assert_eq!(chain.pick(0.995), Some("~"));
        assert_eq!(chain.pick(0.999), Some("+"));
        assert_eq!(chain.pick(0.999_999), Some("+"));
    }

    #[test]
    fn test_expr_generation() {
        let grammar = grammar();
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = ExprGenerator::new(&mut rng, &grammar);

        for _ in 0..200 {
            let expr = generator.expression(0);
            assert!(!expr.is_empty());
            assert!(!expr.ends_with(' ') && !expr.starts_with(' '));
            assert!(paren_depth(&expr) <= 4, "{expr}");
            for token in expr.split(' ').skip(1).step_by(2) {
                assert!(grammar.operators().contains(token), "{token} in {expr}");
            }
        }
    }

    #[test]
    fn test_factor_at_cap_is_bare_operand_without_prefix_when_disabled() {
        let config = GeneratorConfig { prefix_at_depth_cap: false, ..Default::default() };
        let grammar = Grammar::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut generator = ExprGenerator::new(&mut rng, &grammar);

        for _ in 0..500 {
            let factor = generator.signed_factor(4);
            assert!(factor.chars().all(|c| c.is_ascii_hexdigit() || c == 'x'), "{factor}");
        }
    }

    #[test]
    fn test_factor_at_cap_never_parenthesizes() {
        let grammar = grammar();
        let mut rng = StdRng::seed_from_u64(8);
        let mut generator = ExprGenerator::new(&mut rng, &grammar);

        for _ in 0..500 {
            let factor = generator.signed_factor(4);
            assert!(!factor.contains('('), "{factor}");
        }
    }

    #[test]
    fn test_bound_chains_stop_at_cap() {
        // Never terminate voluntarily: only the depth cap ends a chain
        let config = GeneratorConfig::default().with_terminate_threshold(1.0);
        let grammar = Grammar::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let mut generator = ExprGenerator::new(&mut rng, &grammar);

        let expr = generator.signed_factor(4);
        assert!(!expr.is_empty());
        let expr = generator.expression(4);
        assert!(!expr.contains(' '), "a chain at the cap must be a single factor: {expr}");
    }

    #[test]
    fn test_determinism() {
        let grammar = grammar();

        let mut rng1 = StdRng::seed_from_u64(12345);
        let mut gen1 = ExprGenerator::new(&mut rng1, &grammar);
        let expr1: Vec<String> = (0..20).map(|_| gen1.expression(0)).collect();

        let mut rng2 = StdRng::seed_from_u64(12345);
        let mut gen2 = ExprGenerator::new(&mut rng2, &grammar);
        let expr2: Vec<String> = (0..20).map(|_| gen2.expression(0)).collect();

        assert_eq!(expr1, expr2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GeneratorConfig::default().with_operators(vec![]);
        assert!(Grammar::new(config).is_err());
    }
}
