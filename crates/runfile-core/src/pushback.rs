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

//! One token of lookahead.

use crate::error::{LoadResult, SourceLocation};
use crate::token::{Token, TokenSource};

/// Remembers the last token so it can be handed out once more.
#[derive(Debug)]
pub struct PushBackBuffer<S> {
    inner: S,
    last: Option<Token>,
    pushed_back: bool,
}

impl<S: TokenSource> PushBackBuffer<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            last: None,
            pushed_back: false,
        }
    }

    /// Make the next [`next_token`](TokenSource::next_token) return the token
    /// just read.
    ///
    /// # Panics
    ///
    /// Panics if no token has been read yet, or if the previous call was
    /// also a push-back. Both are caller bugs.
    pub fn push_back(&mut self) {
        assert!(
            self.last.is_some(),
            "push_back called before any token was read"
        );
        assert!(
            !self.pushed_back,
            "push_back called twice without an intervening read"
        );
        self.pushed_back = true;
    }
}

impl<S: TokenSource> TokenSource for PushBackBuffer<S> {
    fn next_token(&mut self) -> LoadResult<Token> {
        if self.pushed_back {
            if let Some(last) = &self.last {
                self.pushed_back = false;
                return Ok(last.clone());
            }
        }
        let token = self.inner.next_token()?;
        self.last = Some(token.clone());
        Ok(token)
    }

    fn location(&self) -> SourceLocation {
        self.inner.location()
    }

    fn include_depth(&self) -> usize {
        self.inner.include_depth()
    }
}
