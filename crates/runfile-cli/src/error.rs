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


//! Structured error types for the Runfile CLI.
//!
//! Every command returns `Result<(), CliError>`; `main` prints the error and
//! exits with a failure code.

use runfile_core::LoadError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors a CLI command can end with.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file metadata, write or directory creation).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Input file larger than the configured maximum.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        /// The maximum allowed file size in MB (for display)
        max_mb: u64,
    },

    /// The scenario could not be loaded.
    #[error("{0}")]
    Load(#[from] LoadError),

    /// Loading reached the end of input but errors were reported on the way,
    /// such as an include that could not be opened.
    #[error("{count} error(s) reported while reading '{path}'")]
    Reported { path: PathBuf, count: usize },

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat { message: String },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    pub fn json_format(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}
