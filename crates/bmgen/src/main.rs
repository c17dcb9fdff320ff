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

//! bmgen - expression test-input generator
//!
//! Writes random arithmetic expressions for the bmath bignum evaluator, one
//! per line, and emits the evaluator's character lookup tables.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::{ArgAction, Parser, Subcommand};
use eyre::{Result, WrapErr};

mod cmd;

use cmd::GenerateArgs;

/// Command-line interface for bmgen
#[derive(Debug, Parser)]
#[command(name = "bmgen")]
#[command(about = "Random arithmetic-expression generator for the bmath evaluator")]
#[command(version)]
pub struct Cli {
    /// Generation options, used when no subcommand is given
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Emit the C lookup-table header used by the tokenizer
    Tables {
        /// Write the header to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the embedded generator profiles
    Profiles,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    bmgen_common::logging::init_logging("bmgen", cli.verbose)?;

    match &cli.command {
        None => {
            let mut out = open_output(cli.generate.output.as_deref())?;
            cmd::generate(&cli.generate, &mut out)?;
        }
        Some(Commands::Tables { output }) => {
            let mut out = open_output(output.as_deref())?;
            cmd::write_tables(&mut out)?;
        }
        Some(Commands::Profiles) => {
            let mut out = open_output(None)?;
            cmd::list_profiles(&mut out)?;
        }
    }

    Ok(())
}

/// Buffered writer over `path`, or stdout when no path is given
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Writing to file");
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
