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


//! CLI command definitions and argument parsing.
//!
//! - [`core`]: commands that read a scenario (check, tokens, archive, transcript)
//! - [`utility`]: utility commands (completion)

mod core;
mod utility;

use crate::error::CliError;
use clap::Subcommand;

pub use self::core::CoreCommands;
pub use utility::UtilityCommands;

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Core (check, tokens, archive, transcript)
/// └── Utility (completion)
/// ```
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use runfile_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Scenario commands - flattened to appear at top level
    #[command(flatten)]
    Core(CoreCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the scenario cannot be read or loaded, an output
    /// cannot be written, or the arguments are invalid.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Core(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
