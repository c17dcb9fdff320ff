//! Structural properties every generated expression must satisfy.

use bmgen_engine::{Driver, GeneratorConfig, Profile, RngKind, MAX_OPERAND_BYTES};
use tracing::info;

/// Minimal recursive-descent checker for the generated language.
///
/// expression := factor (" " op " " factor)*
/// factor     := [prefix] ("(" expression ")" | literal)
struct Checker<'a> {
    input: &'a [u8],
    pos: usize,
    ops: Vec<String>,
    prefixes: Vec<String>,
    max_nesting: usize,
    max_literal_bytes: usize,
}

impl<'a> Checker<'a> {
    fn check(expr: &'a str, config: &GeneratorConfig) -> Result<usize, String> {
        let mut checker = Self {
            input: expr.as_bytes(),
            pos: 0,
            ops: config.operators.iter().map(|o| o.symbol.clone()).collect(),
            prefixes: config.prefixes.iter().map(|p| p.symbol.clone()).collect(),
            max_nesting: 0,
            max_literal_bytes: config.max_bytes,
        };
        checker.expression(0)?;
        if checker.pos != checker.input.len() {
            return Err(format!("trailing input at {} in `{expr}`", checker.pos));
        }
        Ok(checker.max_nesting)
    }

    fn rest(&self) -> &'a str {
        std::str::from_utf8(&self.input[self.pos..]).unwrap()
    }

    fn expression(&mut self, nesting: usize) -> Result<(), String> {
        self.factor(nesting)?;
        while self.rest().starts_with(' ') {
            self.pos += 1;
            let op = self
                .rest()
                .split(' ')
                .next()
                .filter(|op| self.ops.iter().any(|known| known == op))
                .ok_or_else(|| format!("unknown operator at `{}`", self.rest()))?
                .to_string();
            self.pos += op.len();
            if !self.rest().starts_with(' ') {
                return Err(format!("operator `{op}` not followed by a space"));
            }
            self.pos += 1;
            self.factor(nesting)?;
        }
        Ok(())
    }

    fn factor(&mut self, nesting: usize) -> Result<(), String> {
        let prefix = self.prefixes.iter().find(|p| self.rest().starts_with(p.as_str())).cloned();
        if let Some(prefix) = prefix {
            self.pos += prefix.len();
        }

        if self.rest().starts_with('(') {
            self.pos += 1;
            self.max_nesting = self.max_nesting.max(nesting + 1);
            self.expression(nesting + 1)?;
            if !self.rest().starts_with(')') {
                return Err(format!("missing `)` at `{}`", self.rest()));
            }
            self.pos += 1;
            Ok(())
        } else {
            self.literal()
        }
    }

    fn literal(&mut self) -> Result<(), String> {
        let rest = self.rest();
        if let Some(hex) = rest.strip_prefix("0x") {
            let digits = hex.bytes().take_while(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')).count();
            if digits == 0 || digits % 2 != 0 || digits > 2 * self.max_literal_bytes {
                return Err(format!("bad hex literal at `{rest}`"));
            }
            self.pos += 2 + digits;
        } else {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return Err(format!("expected literal at `{rest}`"));
            }
            let value: u128 = rest[..digits].parse().map_err(|e| format!("{e}"))?;
            let limit = if self.max_literal_bytes >= 16 {
                u128::MAX
            } else {
                (1u128 << (8 * self.max_literal_bytes)) - 1
            };
            if value > limit {
                return Err(format!("decimal literal {value} wider than {} bytes", self.max_literal_bytes));
            }
            self.pos += digits;
        }
        Ok(())
    }
}

fn check_profile(profile: Profile, seeds: std::ops::Range<i64>, per_seed: usize) {
    let config = profile.generator.clone();
    let driver = Driver::new(profile).unwrap();
    for seed in seeds {
        for expr in driver.expressions(seed, per_seed) {
            let nesting = Checker::check(&expr, &config)
                .unwrap_or_else(|e| panic!("seed {seed}: {e}\n{expr}"));
            assert!(nesting <= config.max_depth as usize, "seed {seed}: too deep: {expr}");
            assert!(expr.is_ascii());
            assert!(!expr.ends_with(' '));
            assert!(!expr.contains('\n'));
        }
    }
}

#[test]
fn test_standard_profile_is_well_formed() {
    bmgen_common::logging::ensure_test_logging(None);
    info!("Running test");
    check_profile(Profile::default(), 0..20, 100);
}

#[test]
fn test_std_rng_is_well_formed() {
    bmgen_common::logging::ensure_test_logging(None);
    info!("Running test");
    check_profile(Profile::default().with_rng(RngKind::Std), 0..20, 100);
}

#[test]
fn test_every_embedded_profile_is_well_formed() {
    bmgen_common::logging::ensure_test_logging(None);
    for name in bmgen_engine::available_profiles() {
        info!(profile = name, "Checking profile");
        check_profile(Profile::embedded(name).unwrap(), 0..10, 100);
    }
}

#[test]
fn test_wide_operands_render() {
    bmgen_common::logging::ensure_test_logging(None);
    let mut profile = Profile::default();
    profile.generator = profile.generator.with_byte_range(9, MAX_OPERAND_BYTES);
    check_profile(profile, 0..5, 50);
}

#[test]
fn test_literals_have_whole_bytes() {
    bmgen_common::logging::ensure_test_logging(None);
    let driver = Driver::new(Profile::default()).unwrap();
    let text = driver.expressions(11, 300).join(" ");

    let mut hex_seen = 0;
    for token in text.split(|c: char| !c.is_ascii_alphanumeric()) {
        if let Some(hex) = token.strip_prefix("0x") {
            hex_seen += 1;
            assert!(hex.len() % 2 == 0 && (2..=16).contains(&hex.len()), "{token}");
        }
    }
    assert!(hex_seen > 0);
}

#[test]
fn test_unary_prefixes_appear() {
    bmgen_common::logging::ensure_test_logging(None);
    let driver = Driver::new(Profile::default()).unwrap();
    let text = driver.expressions(5, 2_000).join("\n");

    assert!(text.contains('~'));
    // Negation directly on a factor, never on an operator
    assert!(text.contains("-(") || text.split(' ').any(|t| t.starts_with('-') && t.len() > 1));
    assert!(!text.contains("~ ") && !text.contains("~~"));
}

#[test]
fn test_parentheses_balanced() {
    bmgen_common::logging::ensure_test_logging(None);
    let driver = Driver::new(Profile::default()).unwrap();
    for expr in driver.expressions(99, 500) {
        let mut depth = 0i32;
        for c in expr.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            assert!(depth >= 0, "{expr}");
        }
        assert_eq!(depth, 0, "{expr}");
    }
}

#[test]
fn test_character_set() {
    bmgen_common::logging::ensure_test_logging(None);
    let driver = Driver::new(Profile::default()).unwrap();
    let allowed = "0123456789abcdefx()^&|<>+-*%~ ";
    for expr in driver.expressions(3, 500) {
        assert!(expr.chars().all(|c| allowed.contains(c)), "{expr}");
    }
}
