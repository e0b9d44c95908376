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

//! Core engine for the Runfile scenario description language.
//!
//! Scenario files are flat or nested tag/value text:
//!
//! ```text
//! ; approach setup
//! #include fixes.txt
//! aircraft {
//!     speed 250.0
//!     label "Heavy jet"
//! }
//! wp { lat 10 } wp { lat 20 }
//! ```
//!
//! This crate turns such text into values on domain objects:
//!
//! - [`ScenarioStream`] assembles the token pipeline (tokenizer, comment
//!   filter, `#include` handling, archive copies, echo directives and one
//!   token of push-back) and reads typed values from it.
//! - [`Registry`] and [`Loadable`] bind tags to fields, nested objects and
//!   lists, and drive the parse.
//! - [`units`] holds physical quantities read in a fixed unit.
//!
//! Errors carry a [`LoadErrorKind`] and a [`SourceLocation`]. Every error,
//! warning and note is also recorded in the stream's [`Diagnostics`].

mod archive;
mod comment;
pub mod datum;
mod diagnostics;
pub mod echo;
mod error;
mod file_path;
pub mod include;
mod lexer;
mod limits;
mod options;
mod pushback;
pub mod registry;
mod source;
mod stream;
mod token;
mod transcript;
pub mod units;

pub use archive::{ArchiveDirector, ArchiveEcho};
pub use comment::CommentFilter;
pub use datum::Datum;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use echo::EchoLayer;
pub use error::{LoadError, LoadErrorKind, LoadResult, SourceLocation};
pub use file_path::FilePath;
pub use include::{IncludeContext, IncludeLayer};
pub use lexer::Tokenizer;
pub use limits::Limits;
pub use options::{LoaderOptions, LoaderOptionsBuilder};
pub use pushback::PushBackBuffer;
pub use registry::{Deprecation, LinkOptions, LoadState, Loadable, Registry};
pub use stream::ScenarioStream;
pub use token::{Token, TokenSource};
pub use transcript::Highlight;
