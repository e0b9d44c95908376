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

//! Echo directives and transcript output.
//!
//! | Directive | Effect |
//! |-----------|--------|
//! | `#echo_on` | start writing tokens to the HTML transcript |
//! | `#echo_off` | stop writing tokens to the HTML transcript |
//! | `#echo_file <name>` | open an echo file receiving every following token |
//! | `#end_echo_file` | close the echo file |
//!
//! Directives are consumed. Their text moves into the `format` of the next
//! token returned.

use crate::diagnostics::Diagnostics;
use crate::error::{LoadError, LoadResult, SourceLocation};
use crate::token::{Token, TokenSource};
use std::path::Path;

pub const ECHO_ON: &str = "#echo_on";
pub const ECHO_OFF: &str = "#echo_off";
pub const ECHO_FILE: &str = "#echo_file";
pub const END_ECHO_FILE: &str = "#end_echo_file";

/// Handles echo directives on top of another stage.
#[derive(Debug)]
pub struct EchoLayer<S> {
    inner: S,
    echo: bool,
    diagnostics: Diagnostics,
    software_version: String,
}

impl<S: TokenSource> EchoLayer<S> {
    pub fn new(inner: S, diagnostics: Diagnostics, echo: bool, software_version: impl Into<String>) -> Self {
        Self {
            inner,
            echo,
            diagnostics,
            software_version: software_version.into(),
        }
    }

    pub fn echo(&self) -> bool {
        self.echo
    }

    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    fn open_echo_file(&mut self, carried: &mut String) -> LoadResult<()> {
        let name = self.inner.next_token()?;
        if name.is_end() {
            return Err(self.diagnostics.error(
                LoadError::echo("#echo_file without a file name").with_location(self.inner.location()),
            ));
        }
        carried.push_str(&name.all());

        self.diagnostics
            .open_echo_file(Path::new(name.data()), &self.software_version)
            .map_err(|e| self.diagnostics.error(e.with_location(self.inner.location())))
    }
}

impl<S: TokenSource> TokenSource for EchoLayer<S> {
    fn next_token(&mut self) -> LoadResult<Token> {
        let mut carried = String::new();

        let mut token = loop {
            let token = self.inner.next_token()?;
            if token.is_quoted() {
                break token;
            }
            match token.data() {
                ECHO_ON => self.echo = true,
                ECHO_OFF => self.echo = false,
                ECHO_FILE => {
                    carried.push_str(&token.all());
                    self.open_echo_file(&mut carried)?;
                    continue;
                }
                END_ECHO_FILE => self.diagnostics.close_echo_file(),
                _ => break token,
            }
            carried.push_str(&token.all());
        };

        token.prepend_format(&carried);

        if self.diagnostics.echo_file_open() {
            self.diagnostics.dump_echo(&token.all());
        }
        if self.echo {
            self.diagnostics
                .transcript_token(&token, self.inner.include_depth());
        }
        Ok(token)
    }

    fn location(&self) -> SourceLocation {
        self.inner.location()
    }

    fn include_depth(&self) -> usize {
        self.inner.include_depth()
    }
}
