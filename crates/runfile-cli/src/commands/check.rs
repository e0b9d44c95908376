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


//! Check command - run a scenario through the whole pipeline

use super::{loader_options, open_scenario};
use crate::error::CliError;
use colored::Colorize;
use runfile_core::Severity;
use std::path::PathBuf;

/// Read a scenario and everything it includes to the end of input.
///
/// Prints `✓` with the token, file and warning counts when nothing went
/// wrong, `✗` otherwise. Warnings are listed either way.
///
/// # Errors
///
/// Returns `Err` if:
/// - The file cannot be opened or is too large
/// - A lexical or include error stops the pipeline
/// - An error was reported while reading, such as a skipped include
///
/// # Examples
///
/// ```no_run
/// use runfile_cli::commands::check;
///
/// # fn main() -> Result<(), runfile_cli::error::CliError> {
/// check("scenario.txt", false)?;
///
/// // Fail on includes that cannot be opened
/// check("scenario.txt", true)?;
/// # Ok(())
/// # }
/// ```
pub fn check(file: &str, strict_includes: bool) -> Result<(), CliError> {
    let options = loader_options().strict_includes(strict_includes).build();
    let mut stream = match open_scenario(file, options) {
        Ok(stream) => stream,
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            return Err(e);
        }
    };

    let result = stream.drain();
    let diagnostics = stream.diagnostics().clone();
    for warning in diagnostics.with_severity(Severity::Warning) {
        println!("  {} {}: {}", "warning".yellow(), warning.location, warning.message);
    }

    let tokens = match result {
        Ok(count) => count,
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            return Err(e.into());
        }
    };

    let errors = diagnostics.with_severity(Severity::Error);
    if !errors.is_empty() {
        println!("{} {}", "✗".red().bold(), file);
        for error in &errors {
            println!("  {} {}: {}", "error".red(), error.location, error.message);
        }
        return Err(CliError::Reported {
            path: PathBuf::from(file),
            count: errors.len(),
        });
    }

    println!("{} {}", "✓".green().bold(), file);
    println!("  Tokens: {}", tokens);
    println!("  Files: {}", stream.opened_files().len());
    println!("  Warnings: {}", diagnostics.count(Severity::Warning));
    if strict_includes {
        println!("  Mode: strict includes");
    }
    stream.finish();
    Ok(())
}
