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


//! CLI command implementations

mod archive;
mod check;
mod completion;
mod tokens;
mod transcript;

pub use archive::archive;
pub use check::check;
pub use completion::{generate_completion_for_command, print_installation_instructions};
pub use tokens::{tokens, TokenFormat};
pub use transcript::transcript;

use crate::error::CliError;
use runfile_core::{LoaderOptions, LoaderOptionsBuilder, ScenarioStream};
use std::fs;
use std::path::Path;

/// Default maximum file size (64 MB).
/// Can be overridden via the `RUNFILE_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Maximum input size from `RUNFILE_MAX_FILE_SIZE`, or the default when the
/// variable is unset or not a number.
pub fn max_file_size() -> u64 {
    std::env::var("RUNFILE_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Loader options with the size limit applied to every file of the
/// include tree.
pub fn loader_options() -> LoaderOptionsBuilder {
    let max = usize::try_from(max_file_size()).unwrap_or(usize::MAX);
    LoaderOptions::builder()
        .max_file_size(max)
        .software_version(format!("runfile {}", env!("CARGO_PKG_VERSION")))
}

/// Open `path` as a scenario after checking its size.
///
/// # Errors
///
/// Returns `Err` if:
/// - The file metadata cannot be accessed
/// - The file is larger than [`max_file_size`]
/// - The loader fails to open it (including archive and transcript outputs)
pub fn open_scenario(path: &str, options: LoaderOptions) -> Result<ScenarioStream, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;
    let max = max_file_size();
    if metadata.len() > max {
        return Err(CliError::file_too_large(path, metadata.len(), max));
    }
    Ok(ScenarioStream::open(Path::new(path), options)?)
}
