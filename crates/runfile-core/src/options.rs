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

//! Loader configuration.
//!
//! [`LoaderOptions`] carries everything a [`ScenarioStream`](crate::ScenarioStream)
//! needs besides the input itself: resource [`Limits`], the optional archive
//! destination, the optional HTML transcript and include behaviour. Nothing is
//! read from process-wide state; every stream gets its options explicitly.

use crate::limits::Limits;
use std::path::PathBuf;

/// Options controlling one scenario load.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Resource limits.
    pub limits: Limits,
    /// Directory that receives relinked archive copies of every file read.
    pub archive_dir: Option<PathBuf>,
    /// Path of the HTML transcript written while echo is enabled.
    pub html_transcript: Option<PathBuf>,
    /// Initial echo state (toggled later by `#echo_on` / `#echo_off`).
    pub echo: bool,
    /// Treat an include that cannot be opened as fatal instead of skipping it.
    pub strict_includes: bool,
    /// Version string written into transcript headers.
    pub software_version: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            archive_dir: None,
            html_transcript: None,
            echo: false,
            strict_includes: false,
            software_version: format!("runfile {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl LoaderOptions {
    /// Create a builder for LoaderOptions.
    ///
    /// # Examples
    ///
    /// ```
    /// use runfile_core::LoaderOptions;
    ///
    /// let options = LoaderOptions::builder()
    ///     .max_include_depth(4)
    ///     .strict_includes(true)
    ///     .build();
    /// assert_eq!(options.limits.max_include_depth, 4);
    /// assert!(options.strict_includes);
    /// ```
    pub fn builder() -> LoaderOptionsBuilder {
        LoaderOptionsBuilder::new()
    }
}

/// Builder for ergonomic construction of LoaderOptions.
#[derive(Debug, Clone)]
pub struct LoaderOptionsBuilder {
    options: LoaderOptions,
}

impl LoaderOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: LoaderOptions::default(),
        }
    }

    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.options.limits = limits;
        self
    }

    /// Set the maximum input file size in bytes.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.options.limits.max_file_size = size;
        self
    }

    /// Set the maximum token length in bytes.
    pub fn max_token_length(mut self, length: usize) -> Self {
        self.options.limits.max_token_length = length;
        self
    }

    /// Set how deeply `#include` directives may nest.
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.options.limits.max_include_depth = depth;
        self
    }

    /// Set how deeply `{ ... }` blocks may nest.
    pub fn max_nest_depth(mut self, depth: usize) -> Self {
        self.options.limits.max_nest_depth = depth;
        self
    }

    /// Copy every file read into `dir` under collision-free names.
    pub fn archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.archive_dir = Some(dir.into());
        self
    }

    /// Write an HTML transcript to `path`.
    pub fn html_transcript(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.html_transcript = Some(path.into());
        self
    }

    /// Set the initial echo state.
    pub fn echo(mut self, echo: bool) -> Self {
        self.options.echo = echo;
        self
    }

    /// Fail the load when an included file cannot be opened.
    pub fn strict_includes(mut self, strict: bool) -> Self {
        self.options.strict_includes = strict;
        self
    }

    /// Set the version string shown in transcript headers.
    pub fn software_version(mut self, version: impl Into<String>) -> Self {
        self.options.software_version = version.into();
        self
    }

    /// Build the LoaderOptions.
    pub fn build(self) -> LoaderOptions {
        self.options
    }
}

impl Default for LoaderOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
