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

//! Block comment filter.
//!
//! Sits directly on the [`Tokenizer`] and absorbs `/* ... */` comments that
//! start a token, together with the delimiters and line comments around
//! them. Everything absorbed becomes `format` of the next real token, so
//! comment text never reaches `data`.

use crate::error::{LoadError, LoadResult, SourceLocation};
use crate::lexer::{is_delimiter, Tokenizer};
use crate::token::{Token, TokenSource};
use std::path::Path;

/// Strips block comments from the front of every token.
#[derive(Debug)]
pub struct CommentFilter {
    inner: Tokenizer,
}

impl CommentFilter {
    pub fn new(inner: Tokenizer) -> Self {
        Self { inner }
    }

    pub fn path(&self) -> Option<&Path> {
        self.inner.path()
    }

    /// Consume a block comment body after its opening `/*`, up to and
    /// including `*/`.
    fn read_block_comment(&mut self, into: &mut String) -> LoadResult<()> {
        let start = self.inner.location();
        let mut last_was_star = false;
        loop {
            match self.inner.chars_mut().next_char() {
                None => {
                    return Err(self.inner.diagnostics().error(
                        LoadError::unterminated_comment("end of input before block comment closed")
                            .with_location(start),
                    ));
                }
                Some(c) => {
                    into.push(c);
                    if last_was_star && c == '/' {
                        return Ok(());
                    }
                    last_was_star = c == '*';
                }
            }
        }
    }
}

impl TokenSource for CommentFilter {
    fn next_token(&mut self) -> LoadResult<Token> {
        let mut leading = self.inner.take_pending_format();

        loop {
            let chars = self.inner.chars_mut();
            match chars.next_char() {
                Some(c) if is_delimiter(c) => leading.push(c),
                Some(';') => {
                    leading.push(';');
                    leading.push_str(chars.take_until_newline());
                }
                Some('/') => match chars.next_char() {
                    Some('*') => {
                        leading.push_str("/*");
                        self.read_block_comment(&mut leading)?;
                    }
                    Some(_) => {
                        chars.unread();
                        chars.unread();
                        break;
                    }
                    None => {
                        chars.unread();
                        break;
                    }
                },
                Some(_) => {
                    chars.unread();
                    break;
                }
                None => break,
            }
        }

        let mut token = self.inner.next_token()?;
        token.prepend_format(&leading);
        Ok(token)
    }

    fn location(&self) -> SourceLocation {
        self.inner.location()
    }
}
