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

//! The assembled token pipeline and typed reads on top of it.
//!
//! ```text
//! ScenarioStream
//! └── PushBackBuffer        one token of lookahead
//!     └── EchoLayer         #echo_on / #echo_off / #echo_file / #end_echo_file
//!         └── IncludeLayer  #include, one layer per open file
//!             └── ArchiveEcho
//!                 └── CommentFilter
//!                     └── Tokenizer
//! ```
//!
//! # Examples
//!
//! ```
//! use runfile_core::{LoaderOptions, ScenarioStream};
//!
//! # fn main() -> runfile_core::LoadResult<()> {
//! let mut stream = ScenarioStream::from_text("ceiling 41000 ; feet", LoaderOptions::default())?;
//! assert_eq!(stream.read::<String>()?, "ceiling");
//! assert_eq!(stream.read::<i32>()?, 41000);
//! assert!(stream.next_token()?.is_end());
//! # Ok(())
//! # }
//! ```

use crate::archive::ArchiveDirector;
use crate::datum::Datum;
use crate::diagnostics::Diagnostics;
use crate::echo::EchoLayer;
use crate::error::{LoadError, LoadResult, SourceLocation};
use crate::include::{IncludeContext, IncludeLayer};
use crate::limits::Limits;
use crate::options::LoaderOptions;
use crate::pushback::PushBackBuffer;
use crate::token::{Token, TokenSource};
use crate::units::Quantity;
use std::fs;
use std::path::{Path, PathBuf};

/// Token stream handed to [`Loadable::load`](crate::Loadable::load).
///
/// Owns the whole pipeline for one scenario load. Not `Send`: the stages of
/// one include tree share their diagnostics and archive map.
pub struct ScenarioStream {
    tokens: PushBackBuffer<Box<dyn TokenSource>>,
    diagnostics: Diagnostics,
    archive: ArchiveDirector,
    context: Option<IncludeContext>,
    limits: Limits,
    nest_depth: usize,
}

impl ScenarioStream {
    /// Open a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file, the archive directory or the HTML
    /// transcript cannot be opened.
    pub fn open(path: impl AsRef<Path>, options: LoaderOptions) -> LoadResult<Self> {
        let path = path.as_ref();
        let (diagnostics, archive) = Self::prepare(&options)?;
        let context = IncludeContext::new(
            diagnostics.clone(),
            archive.clone(),
            options.limits.clone(),
            options.strict_includes,
        );
        let layer = IncludeLayer::open(path, context.clone())?;
        Ok(Self::assemble(layer, context, diagnostics, archive, options))
    }

    /// Read scenario text held in memory. Includes resolve against the
    /// working directory.
    pub fn from_text(text: impl Into<String>, options: LoaderOptions) -> LoadResult<Self> {
        let (diagnostics, archive) = Self::prepare(&options)?;
        let context = IncludeContext::new(
            diagnostics.clone(),
            archive.clone(),
            options.limits.clone(),
            options.strict_includes,
        );
        let layer = IncludeLayer::from_text(text, ".", context.clone());
        Ok(Self::assemble(layer, context, diagnostics, archive, options))
    }

    /// Wrap a custom token source.
    pub fn from_source(source: Box<dyn TokenSource>, diagnostics: Diagnostics, limits: Limits) -> Self {
        Self {
            tokens: PushBackBuffer::new(source),
            diagnostics,
            archive: ArchiveDirector::new(None),
            context: None,
            limits,
            nest_depth: 0,
        }
    }

    fn prepare(options: &LoaderOptions) -> LoadResult<(Diagnostics, ArchiveDirector)> {
        let diagnostics = Diagnostics::new();
        if let Some(dir) = &options.archive_dir {
            fs::create_dir_all(dir).map_err(|e| diagnostics.error(LoadError::io(dir, &e)))?;
        }
        if let Some(path) = &options.html_transcript {
            diagnostics
                .open_transcript(path, &options.software_version)
                .map_err(|e| diagnostics.error(e))?;
        }
        Ok((diagnostics, ArchiveDirector::new(options.archive_dir.clone())))
    }

    fn assemble(
        layer: IncludeLayer,
        context: IncludeContext,
        diagnostics: Diagnostics,
        archive: ArchiveDirector,
        options: LoaderOptions,
    ) -> Self {
        let echo = EchoLayer::new(layer, diagnostics.clone(), options.echo, options.software_version);
        Self {
            tokens: PushBackBuffer::new(Box::new(echo)),
            diagnostics,
            archive,
            context: Some(context),
            limits: options.limits,
            nest_depth: 0,
        }
    }

    /// Fetch the next token. An empty-data token means end of input.
    pub fn next_token(&mut self) -> LoadResult<Token> {
        self.tokens.next_token()
    }

    /// Hand the token just read out again on the next fetch.
    ///
    /// # Panics
    ///
    /// Panics if nothing has been read yet or if the last call was already a
    /// push-back.
    pub fn push_back(&mut self) {
        self.tokens.push_back();
    }

    /// Read one value.
    ///
    /// # Errors
    ///
    /// Fails with `UnexpectedEnd` at end of input, or with the validation
    /// error of `T` (see [`crate::datum`]).
    pub fn read<T: Datum>(&mut self) -> LoadResult<T> {
        let token = self.next_token()?;
        if token.is_end() {
            return Err(self.raise(LoadError::unexpected_end(format!(
                "end of input while reading a {}",
                T::DESCRIPTION
            ))));
        }
        T::from_token(token.data()).map_err(|e| self.raise(e))
    }

    /// Read a number and interpret it in `unit`.
    pub fn read_quantity<Q: Quantity>(&mut self, unit: Q::Unit) -> LoadResult<Q> {
        let value = self.read::<f64>()?;
        Ok(Q::from_unit(value, unit))
    }

    /// Read one token and require it to be `literal`.
    pub fn expect(&mut self, literal: &str) -> LoadResult<()> {
        let token = self.next_token()?;
        if token.is_end() {
            return Err(self.raise(LoadError::bracket(format!(
                "end of input while looking for {}",
                literal
            ))));
        }
        if token.data() != literal {
            return Err(self.raise(LoadError::bracket(format!(
                "found '{}' while looking for {}",
                token.data(),
                literal
            ))));
        }
        Ok(())
    }

    /// Whether the next token is `literal`, without consuming it.
    pub fn peek_is(&mut self, literal: &str) -> LoadResult<bool> {
        let token = self.next_token()?;
        self.push_back();
        Ok(token.data() == literal)
    }

    /// Read every remaining token, returning how many carried data.
    pub fn drain(&mut self) -> LoadResult<usize> {
        let mut count = 0;
        while !self.next_token()?.is_end() {
            count += 1;
        }
        Ok(count)
    }

    /// Record `err` at the current position and return it for propagation.
    pub fn raise(&self, err: LoadError) -> LoadError {
        self.diagnostics.error(err.with_location(self.location()))
    }

    /// Record a warning at the current position.
    pub fn warn(&self, message: impl Into<String>) {
        self.diagnostics.warning(message, self.location());
    }

    /// Record a note at the current position.
    pub fn note(&self, message: impl Into<String>) {
        self.diagnostics.note(message, self.location());
    }

    pub fn location(&self) -> SourceLocation {
        self.tokens.location()
    }

    /// How many `#include` levels deep the last token came from.
    pub fn include_depth(&self) -> usize {
        self.tokens.include_depth()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn archive_director(&self) -> &ArchiveDirector {
        &self.archive
    }

    /// Every file opened so far, the scenario file first.
    pub fn opened_files(&self) -> Vec<PathBuf> {
        self.context
            .as_ref()
            .map(IncludeContext::opened_files)
            .unwrap_or_default()
    }

    /// Current `{ ... }` nesting depth.
    pub fn nest_depth(&self) -> usize {
        self.nest_depth
    }

    /// Declare that a `{` was just read.
    ///
    /// Bracketed links call this themselves. A [`Loadable`](crate::Loadable)
    /// that reads its own brackets calls it after `{` and
    /// [`leave_block`](Self::leave_block) before `}`, so the `}` ends the
    /// nested registry instead of being reported as unmatched.
    ///
    /// # Errors
    ///
    /// `Security` when the nesting limit is reached.
    pub fn enter_block(&mut self) -> LoadResult<()> {
        if self.nest_depth >= self.limits.max_nest_depth {
            return Err(self.raise(LoadError::security(format!(
                "block nesting exceeds limit of {}",
                self.limits.max_nest_depth
            ))));
        }
        self.nest_depth += 1;
        Ok(())
    }

    /// Declare that the current block is about to close.
    pub fn leave_block(&mut self) {
        self.nest_depth = self.nest_depth.saturating_sub(1);
    }

    /// Close transcripts, writing their footers.
    pub fn finish(self) {
        self.diagnostics.close_transcripts();
    }
}
