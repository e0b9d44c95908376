// Dweve Runfile - Scenario Description Language Engine
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Runfile Command Line Interface

use clap::Parser;
use runfile_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Runfile - scenario description language toolkit
///
/// Checks, inspects, archives and transcribes scenario files.
///
/// # Examples
///
/// ```bash
/// # Check a scenario and everything it includes
/// runfile check scenario.txt
///
/// # Copy a scenario and its includes into one directory
/// runfile archive scenario.txt --dest archive/
///
/// # Show tokens as JSON, including formatting
/// runfile tokens scenario.txt --format json --show-format
/// ```
#[derive(Parser)]
#[command(name = "runfile")]
#[command(author, version, about = "Runfile - scenario description language toolkit", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("runfile_core={level},runfile_cli={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
