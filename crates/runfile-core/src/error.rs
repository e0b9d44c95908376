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

//! Error types for scenario loading.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The kind of error that occurred while loading a scenario.
///
/// The set is closed so callers can tell failure classes apart without
/// matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    /// Quoted string left open at end of input, or an empty quoted string.
    Quote,
    /// Block comment still open at end of input.
    UnterminatedComment,
    /// Missing or mismatched `{` / `}`.
    Bracket,
    /// Tag with no registered binding.
    UnknownTag,
    /// Single-use tag matched a second time.
    DuplicateTag,
    /// Required tag never appeared.
    MissingRequired,
    /// Numeric literal rejected by validation.
    NumericValidation,
    /// Boolean literal outside the accepted set.
    BooleanValidation,
    /// Input ended where a value was expected.
    UnexpectedEnd,
    /// Include directive could not be honoured.
    Include,
    /// Echo file could not be opened.
    Echo,
    /// Security limit exceeded.
    Security,
    /// I/O error (file open, read, archive or transcript writes).
    Io,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quote => write!(f, "QuoteError"),
            Self::UnterminatedComment => write!(f, "UnterminatedCommentError"),
            Self::Bracket => write!(f, "BracketError"),
            Self::UnknownTag => write!(f, "UnknownTagError"),
            Self::DuplicateTag => write!(f, "DuplicateTagError"),
            Self::MissingRequired => write!(f, "MissingRequiredError"),
            Self::NumericValidation => write!(f, "NumericValidationError"),
            Self::BooleanValidation => write!(f, "BooleanValidationError"),
            Self::UnexpectedEnd => write!(f, "UnexpectedEndError"),
            Self::Include => write!(f, "IncludeError"),
            Self::Echo => write!(f, "EchoError"),
            Self::Security => write!(f, "SecurityError"),
            Self::Io => write!(f, "IOError"),
        }
    }
}

/// Where in the input something happened.
///
/// `line` is 1-based; zero means the position is not known (for example a
/// datum validated before it was tied to a stream).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// File the token came from, `None` for in-memory input.
    pub file: Option<PathBuf>,
    /// Line number (1-based).
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file: Option<&Path>, line: usize) -> Self {
        Self {
            file: file.map(Path::to_path_buf),
            line,
        }
    }

    /// Whether this location carries any information.
    pub fn is_known(&self) -> bool {
        self.file.is_some() || self.line > 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), 0) => write!(f, "{}", file.display()),
            (Some(file), line) => write!(f, "{}:{}", file.display(), line),
            (None, 0) => write!(f, "unknown position"),
            (None, line) => write!(f, "line {}", line),
        }
    }
}

/// An error that occurred while loading a scenario.
#[derive(Debug, Clone, Error)]
#[error("{kind} at {location}: {message}")]
pub struct LoadError {
    /// The kind of error.
    pub kind: LoadErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Where the offending token was read.
    pub location: SourceLocation,
}

impl LoadError {
    /// Create a new error with an unknown location.
    pub fn new(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: SourceLocation::default(),
        }
    }

    /// Attach location information, keeping any location already present.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        if !self.location.is_known() {
            self.location = location;
        }
        self
    }

    /// Wrap an I/O failure on `path`.
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::new(
            LoadErrorKind::Io,
            format!("{}: {}", path.display(), err),
        )
    }

    // Convenience constructors for each error kind
    pub fn quote(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::Quote, message)
    }

    pub fn unterminated_comment(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::UnterminatedComment, message)
    }

    pub fn bracket(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::Bracket, message)
    }

    pub fn unknown_tag(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::UnknownTag, message)
    }

    pub fn duplicate_tag(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::DuplicateTag, message)
    }

    pub fn missing_required(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::MissingRequired, message)
    }

    pub fn numeric(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::NumericValidation, message)
    }

    pub fn boolean(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::BooleanValidation, message)
    }

    pub fn unexpected_end(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::UnexpectedEnd, message)
    }

    pub fn include(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::Include, message)
    }

    pub fn echo(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::Echo, message)
    }

    pub fn security(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::Security, message)
    }
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
