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

//! Character source with push-back, fed by decoded file contents.

use crate::error::{LoadError, LoadResult};
use crate::limits::Limits;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and decode a scenario file.
///
/// See [`decode_input`] for the decoding rules.
pub fn read_source(path: &Path, limits: &Limits) -> LoadResult<String> {
    let metadata = fs::metadata(path).map_err(|e| LoadError::io(path, &e))?;
    if metadata.len() > limits.max_file_size as u64 {
        return Err(LoadError::security(format!(
            "{}: file too large: exceeds limit of {} bytes",
            path.display(),
            limits.max_file_size
        )));
    }

    let bytes = fs::read(path).map_err(|e| LoadError::io(path, &e))?;
    decode_input(bytes, limits)
}

/// Decode raw input bytes into text.
///
/// This handles:
/// - Size limit
/// - UTF-8 decoding, falling back to Latin-1 for legacy files (the `0xCC`
///   delimiter byte is not valid UTF-8 on its own)
/// - BOM skipping
/// - CRLF normalization
pub fn decode_input(input: Vec<u8>, limits: &Limits) -> LoadResult<String> {
    if input.len() > limits.max_file_size {
        return Err(LoadError::security(format!(
            "file too large: exceeds limit of {} bytes",
            limits.max_file_size
        )));
    }

    let text = match String::from_utf8(input) {
        Ok(text) => text,
        Err(err) => {
            debug!("input is not UTF-8 ({}), decoding as Latin-1", err.utf8_error());
            err.into_bytes().into_iter().map(char::from).collect()
        }
    };

    let text = match text.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    };

    if text.contains("\r\n") {
        Ok(text.replace("\r\n", "\n"))
    } else {
        Ok(text)
    }
}

/// A cursor over decoded text that can step back over what it just read.
///
/// Tracks the 1-based line of the cursor so errors can point at the input.
#[derive(Debug)]
pub struct CharSource {
    text: String,
    pos: usize,
    line: usize,
}

impl CharSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
            line: 1,
        }
    }

    /// Read the next character, `None` at end of input.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.text[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Step back over the most recently read character.
    ///
    /// May be called repeatedly to unread several characters.
    pub fn unread(&mut self) {
        if let Some(c) = self.text[..self.pos].chars().next_back() {
            self.pos -= c.len_utf8();
            if c == '\n' {
                self.line -= 1;
            }
        }
    }

    /// Consume everything up to, but not including, the next newline.
    pub fn take_until_newline(&mut self) -> &str {
        let rest = &self.text.as_bytes()[self.pos..];
        let len = memchr::memchr(b'\n', rest).unwrap_or(rest.len());
        let start = self.pos;
        self.pos += len;
        &self.text[start..self.pos]
    }

    /// Current line number (1-based).
    pub fn line(&self) -> usize {
        self.line
    }
}
