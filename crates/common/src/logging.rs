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

//! Logging configuration for bmgen components
//!
//! Provides centralized logging setup with:
//! - Console output on stderr (stdout carries generated data)
//! - Environment variable support (RUST_LOG)
//! - A verbosity knob for the command line, WARN by default

use eyre::Result;
use std::{
    env,
    io::{self, IsTerminal},
    sync::Once,
};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Map a `-v` count to the default log level.
///
/// `RUST_LOG` always wins over this value when it is set.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize logging for a bmgen component
///
/// This function sets up:
/// - Structured console logging written to stderr
/// - Environment variable support for log levels (RUST_LOG)
/// - A default level derived from `verbosity` if no RUST_LOG is set
///
/// # Arguments
/// * `component_name` - Name of the component (e.g., "bmgen")
/// * `verbosity` - Number of `-v` flags given on the command line
///
/// # Examples
/// ```rust
/// use bmgen_common::logging;
///
/// fn main() -> eyre::Result<()> {
///     logging::init_logging("bmgen", 1)?;
///
///     tracing::info!("Application started");
///     Ok(())
/// }
/// ```
pub fn init_logging(component_name: &str, verbosity: u8) -> Result<()> {
    let level = level_for_verbosity(verbosity);
    let env_filter = build_filter(level)?;

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(verbosity >= 2)
        .with_line_number(verbosity >= 2)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(io::stderr().is_terminal())
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {e}"))?;

    tracing::debug!(component = component_name, level = %level, "Logging initialized");
    log_environment_info(component_name);

    Ok(())
}

/// Build the environment filter, falling back to `level` when RUST_LOG is unset
fn build_filter(level: Level) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .map_err(|e| eyre::eyre!("Failed to create environment filter: {e}"))
}

/// Log useful environment information
fn log_environment_info(component_name: &str) {
    let rust_log = env::var("RUST_LOG").unwrap_or_default();
    let args: Vec<String> = env::args().collect();

    tracing::debug!(
        component = component_name,
        rust_log = %rust_log,
        args = ?args,
        "Environment information"
    );
}

/// Initialize simple logging (stderr only, compact formatting)
///
/// This is useful for tests or small utilities that don't need the full
/// setup.
///
/// # Arguments
/// * `level` - The default log level to use
pub fn init_simple_logging(level: Level) -> Result<()> {
    let env_filter = build_filter(level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize simple logging: {e}"))?;

    Ok(())
}

// Global test logging initialization - ensures logging is only set up once across all tests
static TEST_LOGGING_INIT: Once = Once::new();

/// Safe logging initialization for tests - can be called multiple times without crashing
///
/// Uses `std::sync::Once` so initialization happens only once per test
/// process. Defaults to INFO but respects RUST_LOG.
///
/// # Usage
/// ```rust
/// use bmgen_common::logging;
/// use tracing::info;
///
/// fn my_test() {
///     logging::ensure_test_logging(None);
///     info!("This will work safely in any test!");
/// }
/// ```
pub fn ensure_test_logging(default_level: Option<Level>) {
    TEST_LOGGING_INIT.call_once(|| {
        let default_level = default_level.unwrap_or(Level::INFO);
        // A subscriber may already be installed by the harness, which is fine
        let _ = init_simple_logging(default_level);
    });
}
