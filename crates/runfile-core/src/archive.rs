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

//! Archive copies of every file read.
//!
//! When an archive destination is configured, each file of the include tree
//! is copied into it verbatim under a collision-free name, and the
//! `#include` targets inside the copies are rewritten to those names. The
//! result is a self-contained directory that loads the same scenario.
//!
//! Two pieces cooperate:
//!
//! - [`ArchiveDirector`] is shared by the whole include tree and owns the
//!   source path to archive name map.
//! - [`ArchiveEcho`] wraps one file's comment filter and writes its tokens to
//!   that file's copy. It writes each token one fetch late so the include
//!   layer can still rewrite the token it just read (the include target).

use crate::comment::CommentFilter;
use crate::diagnostics::Diagnostics;
use crate::error::{LoadError, LoadResult, SourceLocation};
use crate::file_path::FilePath;
use crate::token::{Token, TokenSource};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Default)]
struct DirectorState {
    destination: Option<PathBuf>,
    names: BTreeMap<PathBuf, String>,
    collisions: usize,
}

/// Assigns archive names to source files.
///
/// Cloning yields another handle to the same map. Entries are added the first
/// time a file is referenced and never removed.
#[derive(Debug, Clone, Default)]
pub struct ArchiveDirector {
    inner: Rc<RefCell<DirectorState>>,
}

impl ArchiveDirector {
    /// Create a director. With `None` nothing is archived.
    pub fn new(destination: Option<PathBuf>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DirectorState {
                destination,
                ..DirectorState::default()
            })),
        }
    }

    pub fn destination(&self) -> Option<PathBuf> {
        self.inner.borrow().destination.clone()
    }

    /// True when archiving is enabled and `source` has no archive name yet.
    pub fn is_new_file(&self, source: &Path) -> bool {
        let state = self.inner.borrow();
        state.destination.is_some() && !state.names.contains_key(source)
    }

    /// Archive name for `source`, assigning one on first use.
    ///
    /// The name is the source's file name; if another source already owns it,
    /// `stem_N.ext` with the next unused `N`.
    pub fn link_name(&self, source: &Path) -> String {
        let mut state = self.inner.borrow_mut();
        if let Some(name) = state.names.get(source) {
            return name.clone();
        }

        let path = FilePath::from(source);
        let stem = path.name().unwrap_or("archive").to_string();
        let with_ext = |base: &str| match path.extension() {
            Some(ext) => format!("{}.{}", base, ext),
            None => base.to_string(),
        };

        let mut name = with_ext(&stem);
        while state.names.values().any(|taken| *taken == name) {
            state.collisions += 1;
            name = with_ext(&format!("{}_{}", stem, state.collisions));
        }

        debug!("archive name {} for {}", name, source.display());
        state.names.insert(source.to_path_buf(), name.clone());
        name
    }

    /// Where the archive copy of `source` goes, `None` when archiving is off.
    pub fn archive_path(&self, source: &Path) -> Option<PathBuf> {
        let destination = self.destination()?;
        Some(destination.join(self.link_name(source)))
    }

    /// All assigned names, ordered by source path.
    pub fn entries(&self) -> Vec<(PathBuf, String)> {
        self.inner
            .borrow()
            .names
            .iter()
            .map(|(source, name)| (source.clone(), name.clone()))
            .collect()
    }
}

/// Copies one file's token stream into its archive file.
#[derive(Debug)]
pub struct ArchiveEcho {
    inner: CommentFilter,
    diagnostics: Diagnostics,
    writer: Option<BufWriter<File>>,
    archive_path: Option<PathBuf>,
    last: Option<Token>,
}

impl ArchiveEcho {
    pub fn new(inner: CommentFilter, diagnostics: Diagnostics) -> Self {
        Self {
            inner,
            diagnostics,
            writer: None,
            archive_path: None,
            last: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.inner.path()
    }

    /// Start copying into `archive` with a header naming `source`.
    pub fn open_archive(&mut self, archive: &Path, source: &Path) -> LoadResult<()> {
        let file = File::create(archive)
            .map_err(|e| self.diagnostics.error(LoadError::io(archive, &e)))?;
        debug!("archiving {} as {}", source.display(), archive.display());
        self.writer = Some(BufWriter::new(file));
        self.archive_path = Some(archive.to_path_buf());
        self.write(&format!(
            "; This file is an archive copy of a file formerly called: \"{}\"\n\n",
            source.display()
        ))
    }

    /// Replace the data of the token read most recently, before it is written.
    pub fn rewrite_last(&mut self, data: &str) {
        if let Some(last) = self.last.as_mut() {
            last.set_data(data);
        }
    }

    fn write(&mut self, text: &str) -> LoadResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        if let Err(e) = writer.write_all(text.as_bytes()) {
            let path = self.archive_path.clone().unwrap_or_default();
            return Err(self.diagnostics.error(LoadError::io(&path, &e)));
        }
        Ok(())
    }

    fn flush(&mut self) -> LoadResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        if let Err(e) = writer.flush() {
            let path = self.archive_path.clone().unwrap_or_default();
            return Err(self.diagnostics.error(LoadError::io(&path, &e)));
        }
        Ok(())
    }
}

impl TokenSource for ArchiveEcho {
    fn next_token(&mut self) -> LoadResult<Token> {
        if let Some(last) = self.last.take() {
            self.write(&last.all())?;
        }

        let token = self.inner.next_token()?;
        if token.is_end() {
            // Nothing can rewrite the end token, so write it straight away.
            self.write(token.format())?;
            self.flush()?;
        } else if self.writer.is_some() {
            self.last = Some(token.clone());
        }
        Ok(token)
    }

    fn location(&self) -> SourceLocation {
        self.inner.location()
    }
}
