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


//! Transcript command - HTML echo of a scenario

use super::{loader_options, open_scenario};
use crate::error::CliError;
use colored::Colorize;
use runfile_core::Severity;

/// Write an HTML transcript of `file` to `output`.
///
/// Echo starts on, so every token is written until the file itself turns it
/// off with `#echo_off`. Errors and warnings reported along the way are
/// highlighted in the transcript too.
///
/// # Errors
///
/// Returns `Err` if the scenario or the transcript cannot be opened, or the
/// pipeline stops on an error (the transcript is still closed properly).
pub fn transcript(file: &str, output: &str) -> Result<(), CliError> {
    let options = loader_options().html_transcript(output).echo(true).build();
    let mut stream = open_scenario(file, options)?;
    let result = stream.drain();
    let warnings = stream.diagnostics().count(Severity::Warning);
    stream.finish();
    let tokens = result?;

    println!("{} {} -> {}", "✓".green().bold(), file, output);
    println!("  Tokens: {}", tokens);
    println!("  Warnings: {}", warnings);
    Ok(())
}
