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

//! The tokenizer: characters in, [`Token`]s out.
//!
//! # Character classes
//!
//! | Character | Meaning |
//! |-----------|---------|
//! | space, `,`, tab, newline, `U+00CC` | delimiter, kept in `format` |
//! | `;` | line comment to end of line, kept in `format` |
//! | `"` | quoted data up to the next `"` |
//! | anything else | data, up to the next delimiter or `;` |
//!
//! Quote marks are not data. The opening quote is kept in the token's
//! `format` and the closing quote is carried into the next token's `format`,
//! so `format + data` over the whole stream reproduces the input.

use crate::diagnostics::Diagnostics;
use crate::error::{LoadError, LoadResult, SourceLocation};
use crate::limits::Limits;
use crate::source::{read_source, CharSource};
use crate::token::{Token, TokenSource};
use std::path::{Path, PathBuf};

/// Sentinel byte `0xCC` treated as a delimiter.
pub const SENTINEL_DELIMITER: char = '\u{CC}';

/// Whether `c` separates tokens.
#[inline]
pub fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | ',' | '\t' | '\n' | SENTINEL_DELIMITER)
}

/// Splits one file's text into tokens.
#[derive(Debug)]
pub struct Tokenizer {
    chars: CharSource,
    path: Option<PathBuf>,
    diagnostics: Diagnostics,
    max_token_length: usize,
    /// Closing quote waiting to lead the next token's format.
    pending_format: String,
}

impl Tokenizer {
    /// Open and decode `path`.
    pub fn open(path: &Path, diagnostics: Diagnostics, limits: &Limits) -> LoadResult<Self> {
        let text = read_source(path, limits)?;
        let mut tokenizer = Self::from_text(text, diagnostics, limits);
        tokenizer.path = Some(path.to_path_buf());
        Ok(tokenizer)
    }

    /// Tokenize in-memory text.
    pub fn from_text(text: impl Into<String>, diagnostics: Diagnostics, limits: &Limits) -> Self {
        Self {
            chars: CharSource::new(text),
            path: None,
            diagnostics,
            max_token_length: limits.max_token_length,
            pending_format: String::new(),
        }
    }

    /// File being read, `None` for in-memory text.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn chars_mut(&mut self) -> &mut CharSource {
        &mut self.chars
    }

    /// Formatting owed to the next token (a closing quote).
    pub(crate) fn take_pending_format(&mut self) -> String {
        std::mem::take(&mut self.pending_format)
    }

    pub(crate) fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Raise `err` at the current position.
    pub(crate) fn fail(&self, err: LoadError) -> LoadError {
        self.diagnostics.error(err.with_location(self.location()))
    }

    fn push_data(&self, token: &mut Token, c: char) -> LoadResult<()> {
        if token.data().len() + c.len_utf8() > self.max_token_length {
            return Err(self.fail(LoadError::security(format!(
                "token exceeds maximum length of {} bytes",
                self.max_token_length
            ))));
        }
        token.push_data(c);
        Ok(())
    }

    fn read_quote(&mut self, mut token: Token) -> LoadResult<Token> {
        let start = self.location();
        token.push_format('"');
        token.mark_quoted();
        loop {
            match self.chars.next_char() {
                None => {
                    return Err(self.diagnostics.error(
                        LoadError::quote("end of input before closing quote").with_location(start),
                    ));
                }
                Some('"') => {
                    self.pending_format.push('"');
                    if token.data().is_empty() {
                        return Err(self.diagnostics.error(
                            LoadError::quote("empty quoted string").with_location(start),
                        ));
                    }
                    return Ok(token);
                }
                Some(c) => {
                    if c == '\n' {
                        self.diagnostics
                            .warning("newline before end of quote", self.location());
                    }
                    self.push_data(&mut token, c)?;
                }
            }
        }
    }
}

impl TokenSource for Tokenizer {
    fn next_token(&mut self) -> LoadResult<Token> {
        let mut token = Token::new(std::mem::take(&mut self.pending_format), "");

        while let Some(c) = self.chars.next_char() {
            let ends_data = is_delimiter(c) || c == ';' || c == '"';
            if ends_data && !token.data().is_empty() {
                self.chars.unread();
                return Ok(token);
            }

            if c == ';' {
                token.push_format(c);
                let comment = self.chars.take_until_newline();
                token.push_format_str(comment);
            } else if c == '"' {
                return self.read_quote(token);
            } else if is_delimiter(c) {
                token.push_format(c);
            } else {
                self.push_data(&mut token, c)?;
            }
        }

        Ok(token)
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.path.as_deref(), self.chars.line())
    }
}
