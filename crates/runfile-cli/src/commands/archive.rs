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


//! Archive command - self-contained copy of an include tree

use super::{loader_options, open_scenario};
use crate::error::CliError;
use colored::Colorize;

/// Copy `file` and every file it includes into `dest`.
///
/// Each file gets a collision-free name in `dest` and the `#include` targets
/// inside the copies are rewritten to those names, so `dest/<name of file>`
/// loads the same scenario. Prints the source to archive name map.
///
/// # Errors
///
/// Returns `Err` if the scenario cannot be read, `dest` cannot be created,
/// or a copy cannot be written.
pub fn archive(file: &str, dest: &str) -> Result<(), CliError> {
    let options = loader_options().archive_dir(dest).build();
    let mut stream = open_scenario(file, options)?;
    stream.drain()?;

    let entries = stream.archive_director().entries();
    println!(
        "{} archived {} file(s) to {}",
        "✓".green().bold(),
        entries.len(),
        dest
    );
    for (source, name) in &entries {
        println!("  {} -> {}", source.display(), name);
    }
    stream.finish();
    Ok(())
}
