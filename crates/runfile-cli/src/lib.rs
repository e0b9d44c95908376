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


//! Runfile CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **check**: run a scenario file through the whole token pipeline and
//!   report errors, warnings and counts
//! - **tokens**: list the tokens of a scenario file as text or JSON
//! - **archive**: write a self-contained, relinked copy of a scenario and
//!   every file it includes
//! - **transcript**: write an HTML transcript of a scenario
//! - **completion**: generate shell completion scripts
//!
//! # Examples
//!
//! ```no_run
//! use runfile_cli::commands::check;
//!
//! # fn main() -> Result<(), runfile_cli::error::CliError> {
//! check("scenario.txt", false)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Input files larger than `RUNFILE_MAX_FILE_SIZE` bytes (default 64 MB) are
//! rejected before they are read. Include depth, token length and block
//! nesting are bounded by the loader's [`Limits`](runfile_core::Limits).

pub mod cli;
pub mod commands;
pub mod error;
