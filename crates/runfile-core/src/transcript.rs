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

//! HTML transcripts of the token stream.
//!
//! A transcript is a single `<pre>` block: text is escaped and written as-is,
//! highlighted runs are wrapped in a background-colour `<FONT>` element.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Background colour for a highlighted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Errors in the main transcript.
    Red,
    /// Warnings in the main transcript.
    Green,
    /// Token data, and anything reported while an echo file is open.
    Yellow,
    /// Token formatting.
    Blue,
}

impl Highlight {
    fn css_name(self) -> &'static str {
        match self {
            Highlight::Red => "red",
            Highlight::Green => "green",
            Highlight::Yellow => "yellow",
            Highlight::Blue => "lightblue",
        }
    }
}

/// An open HTML transcript file.
///
/// The footer is written by [`finish`](Self::finish), or on drop if the
/// transcript was never finished explicitly.
#[derive(Debug)]
pub struct HtmlTranscript {
    writer: BufWriter<File>,
    path: PathBuf,
    finished: bool,
}

impl HtmlTranscript {
    /// Create `path` and write the document header.
    pub fn create(path: &Path, software_version: &str) -> io::Result<Self> {
        let file = File::create(path)?;
        let mut transcript = Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            finished: false,
        };
        write!(
            transcript.writer,
            "<html>\n<body bgcolor=dddddd>\n<pre>\nrunning {}\n",
            escape_html(software_version)
        )?;
        Ok(transcript)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append plain text.
    pub fn dump(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(escape_html(text).as_bytes())
    }

    /// Append text wrapped in a background highlight.
    pub fn highlight(&mut self, color: Highlight, text: &str) -> io::Result<()> {
        write!(
            self.writer,
            "<FONT style=\"BACKGROUND-COLOR: {}\">{}</FONT>",
            color.css_name(),
            escape_html(text)
        )
    }

    /// Write the footer and flush.
    pub fn finish(mut self) -> io::Result<()> {
        self.write_footer()
    }

    fn write_footer(&mut self) -> io::Result<()> {
        self.finished = true;
        self.writer.write_all(b"\n</pre>\n</body>\n</html>\n")?;
        self.writer.flush()
    }
}

impl Drop for HtmlTranscript {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.write_footer();
        }
    }
}

/// Escape the characters HTML treats specially.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>', '&', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
