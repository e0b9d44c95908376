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


//! Commands that read a scenario file.

use crate::commands::{self, TokenFormat};
use crate::error::CliError;
use clap::Subcommand;

/// Scenario commands.
#[derive(Subcommand)]
pub enum CoreCommands {
    /// Check a scenario file
    ///
    /// Reads the file and everything it includes to the end, reporting
    /// errors, warnings and token counts.
    Check {
        /// Scenario file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Fail on an include that cannot be opened instead of skipping it
        #[arg(long)]
        strict_includes: bool,
    },

    /// List the tokens of a scenario file
    ///
    /// Prints one line per token with its line number and include depth, or
    /// a JSON array.
    Tokens {
        /// Scenario file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Include each token's formatting (whitespace, comments, directives)
        #[arg(long)]
        show_format: bool,
    },

    /// Archive a scenario and its includes
    ///
    /// Copies every file of the include tree into DIR under collision-free
    /// names, rewriting #include targets so the copy loads on its own.
    Archive {
        /// Scenario file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Destination directory (created if missing)
        #[arg(short, long, value_name = "DIR")]
        dest: String,
    },

    /// Write an HTML transcript of a scenario
    ///
    /// Every token is echoed, formatting and data highlighted separately.
    /// #echo_off and #echo_on in the file still apply.
    Transcript {
        /// Scenario file path
        #[arg(value_name = "FILE")]
        file: String,

        /// HTML output path
        #[arg(short, long)]
        output: String,
    },
}

impl CoreCommands {
    /// Execute the scenario command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command execution fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            CoreCommands::Check {
                file,
                strict_includes,
            } => commands::check(&file, strict_includes),
            CoreCommands::Tokens {
                file,
                format,
                show_format,
            } => commands::tokens(&file, format.parse::<TokenFormat>()?, show_format),
            CoreCommands::Archive { file, dest } => commands::archive(&file, &dest),
            CoreCommands::Transcript { file, output } => commands::transcript(&file, &output),
        }
    }
}
