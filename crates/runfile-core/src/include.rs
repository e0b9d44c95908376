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

//! The `#include` preprocessor.
//!
//! An [`IncludeLayer`] reads one file. When it meets `#include <name>` it
//! opens a second layer over the named file and returns that layer's tokens
//! until it runs dry, then drops it (closing the file) and resumes its own
//! file. The nested layer may include further files in turn, so an include
//! tree is a chain of layers, each with at most one open child.
//!
//! The directive and the target name never reach the caller as data; they
//! are folded into the `format` of the next token so transcripts still show
//! them.

use crate::archive::{ArchiveDirector, ArchiveEcho};
use crate::comment::CommentFilter;
use crate::diagnostics::Diagnostics;
use crate::error::{LoadError, LoadErrorKind, LoadResult, SourceLocation};
use crate::file_path::FilePath;
use crate::lexer::Tokenizer;
use crate::limits::Limits;
use crate::token::{Token, TokenSource};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

/// Directive that splices another file into the stream.
pub const INCLUDE_DIRECTIVE: &str = "#include";

/// Settings every layer of one include tree shares.
#[derive(Debug, Clone)]
pub struct IncludeContext {
    pub diagnostics: Diagnostics,
    pub archive: ArchiveDirector,
    pub limits: Limits,
    /// Fail instead of skipping an include that cannot be opened.
    pub strict: bool,
    opened: Rc<RefCell<Vec<PathBuf>>>,
}

impl IncludeContext {
    pub fn new(diagnostics: Diagnostics, archive: ArchiveDirector, limits: Limits, strict: bool) -> Self {
        Self {
            diagnostics,
            archive,
            limits,
            strict,
            opened: Rc::default(),
        }
    }

    /// Every file opened so far, the primary file first.
    pub fn opened_files(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }
}

/// One file of an include tree.
#[derive(Debug)]
pub struct IncludeLayer {
    primary: ArchiveEcho,
    secondary: Option<Box<IncludeLayer>>,
    current_dir: PathBuf,
    depth: usize,
    context: IncludeContext,
}

impl IncludeLayer {
    /// Open the top-level scenario file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or its archive copy cannot be
    /// created. Either error is recorded in the diagnostics.
    pub fn open(path: &Path, context: IncludeContext) -> LoadResult<Self> {
        let mut layer = Self::open_at_depth(path, context.clone(), 0)
            .map_err(|e| context.diagnostics.error(e))?;
        layer.start_archive(path)?;
        Ok(layer)
    }

    /// Read in-memory text; includes resolve against `current_dir`.
    pub fn from_text(text: impl Into<String>, current_dir: impl Into<PathBuf>, context: IncludeContext) -> Self {
        let tokenizer = Tokenizer::from_text(text, context.diagnostics.clone(), &context.limits);
        let primary = ArchiveEcho::new(CommentFilter::new(tokenizer), context.diagnostics.clone());
        Self {
            primary,
            secondary: None,
            current_dir: current_dir.into(),
            depth: 0,
            context,
        }
    }

    fn open_at_depth(path: &Path, context: IncludeContext, depth: usize) -> LoadResult<Self> {
        if depth > context.limits.max_include_depth {
            return Err(LoadError::security(format!(
                "include depth exceeds limit of {} while opening {}",
                context.limits.max_include_depth,
                path.display()
            )));
        }

        let tokenizer = Tokenizer::open(path, context.diagnostics.clone(), &context.limits)?;
        let primary = ArchiveEcho::new(CommentFilter::new(tokenizer), context.diagnostics.clone());

        debug!(depth, "opened {}", path.display());
        context.opened.borrow_mut().push(path.to_path_buf());

        Ok(Self {
            primary,
            secondary: None,
            current_dir: FilePath::from(path).directory().into_path_buf(),
            depth,
            context,
        })
    }

    /// Begin the archive copy of `path` if archiving is on and the file has
    /// not been copied yet. A copy that cannot be created is fatal.
    fn start_archive(&mut self, path: &Path) -> LoadResult<()> {
        if !self.context.archive.is_new_file(path) {
            return Ok(());
        }
        match self.context.archive.archive_path(path) {
            Some(archive) => self.primary.open_archive(&archive, path),
            None => Ok(()),
        }
    }

    /// Directory include targets are resolved against.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    fn next_from_primary(&mut self) -> LoadResult<Token> {
        let mut token = self.primary.next_token()?;

        while token.is_keyword(INCLUDE_DIRECTIVE) {
            token.merge_data_into_format();
            let target = self.primary.next_token()?;
            if target.is_end() {
                return Err(self.context.diagnostics.error(
                    LoadError::include("#include without a file name")
                        .with_location(self.primary.location()),
                ));
            }
            token.push_format_str(target.format());
            token.push_format_str(target.data());

            let resolved = FilePath::resolve_include(&self.current_dir, target.data());
            match Self::open_at_depth(resolved.as_path(), self.context.clone(), self.depth + 1) {
                Ok(mut layer) => {
                    layer.start_archive(resolved.as_path())?;
                    if self.context.archive.destination().is_some() {
                        let name = self.context.archive.link_name(resolved.as_path());
                        self.primary.rewrite_last(&name);
                    }
                    self.secondary = Some(Box::new(layer));

                    // Go through next_token so an empty included file falls
                    // straight back to this one.
                    let mut next = self.next_token()?;
                    next.prepend_format(token.format());
                    return Ok(next);
                }
                Err(err) if err.kind == LoadErrorKind::Io => {
                    let err = self.context.diagnostics.error(
                        LoadError::include(format!("could not open {}: {}", resolved, err.message))
                            .with_location(self.primary.location()),
                    );
                    if self.context.strict {
                        return Err(err);
                    }
                    let mut next = self.primary.next_token()?;
                    next.prepend_format(token.format());
                    token = next;
                }
                Err(err) => {
                    return Err(self
                        .context
                        .diagnostics
                        .error(err.with_location(self.primary.location())));
                }
            }
        }

        Ok(token)
    }
}

impl TokenSource for IncludeLayer {
    fn next_token(&mut self) -> LoadResult<Token> {
        let token = match self.secondary.as_mut() {
            Some(secondary) => secondary.next_token()?,
            None => return self.next_from_primary(),
        };
        if !token.is_end() {
            return Ok(token);
        }

        debug!(depth = self.depth + 1, "include exhausted");
        self.secondary = None;

        // The included file's trailing delimiters and comments lead the next
        // token of this file unchanged.
        let mut out = self.next_from_primary()?;
        out.prepend_format(token.format());
        Ok(out)
    }

    fn location(&self) -> SourceLocation {
        match &self.secondary {
            Some(secondary) => secondary.location(),
            None => self.primary.location(),
        }
    }

    fn include_depth(&self) -> usize {
        match &self.secondary {
            Some(secondary) => secondary.include_depth(),
            None => self.depth,
        }
    }
}
