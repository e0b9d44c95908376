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

//! Collected diagnostics and their transcript mirrors.
//!
//! Every pipeline stage of one load shares a single [`Diagnostics`] handle.
//! Reporting an error or warning records it, logs it through `tracing` and
//! copies it into whichever transcripts are open:
//!
//! | Sink | Errors | Warnings |
//! |------|--------|----------|
//! | HTML transcript | red | green |
//! | echo file | yellow | yellow |

use crate::error::{LoadError, LoadResult, SourceLocation};
use crate::token::Token;
use crate::transcript::{Highlight, HtmlTranscript};
use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, error, warn};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational (an optional tag fell back to its default).
    Note,
    /// Suspicious input that does not stop the load.
    Warning,
    /// The load failed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.location, self.message)
    }
}

#[derive(Debug, Default)]
struct Sinks {
    entries: Vec<Diagnostic>,
    transcript: Option<HtmlTranscript>,
    echo_file: Option<HtmlTranscript>,
}

/// Shared diagnostics sink for one include tree.
///
/// Cloning yields another handle to the same sink.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    inner: Rc<RefCell<Sinks>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error and hand it back for propagation.
    pub fn error(&self, err: LoadError) -> LoadError {
        error!(kind = %err.kind, location = %err.location, "{}", err.message);
        let text = format!("\n\nERROR: {}\n", err);
        self.mirror(&text, Highlight::Red);
        self.push(Severity::Error, err.message.clone(), err.location.clone());
        err
    }

    /// Record a warning; loading continues.
    pub fn warning(&self, message: impl Into<String>, location: SourceLocation) {
        let message = message.into();
        warn!(location = %location, "{}", message);
        let text = format!("\n\nWARNING at {}: {}\n", location, message);
        self.mirror(&text, Highlight::Green);
        self.push(Severity::Warning, message, location);
    }

    /// Record a note. Notes are logged at debug level and never mirrored.
    pub fn note(&self, message: impl Into<String>, location: SourceLocation) {
        let message = message.into();
        debug!(location = %location, "{}", message);
        self.push(Severity::Note, message, location);
    }

    /// Snapshot of everything reported so far, in order.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.inner.borrow().entries.clone()
    }

    /// Entries of one severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<Diagnostic> {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|d| d.severity == severity)
            .cloned()
            .collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Open the HTML transcript that receives echoed tokens.
    pub(crate) fn open_transcript(&self, path: &Path, software_version: &str) -> LoadResult<()> {
        let transcript = HtmlTranscript::create(path, software_version)
            .map_err(|e| LoadError::io(path, &e))?;
        debug!("opened transcript {}", path.display());
        self.inner.borrow_mut().transcript = Some(transcript);
        Ok(())
    }

    /// Write one token to the HTML transcript, formatting in blue and data
    /// in yellow, with newlines indented three spaces per include level.
    pub(crate) fn transcript_token(&self, token: &Token, depth: usize) {
        let mut sinks = self.inner.borrow_mut();
        let Some(transcript) = sinks.transcript.as_mut() else {
            return;
        };
        let indent = format!("\n{}", "   ".repeat(depth));
        let format = token.format().replace('\n', &indent);
        let mut result = Ok(());
        if !format.is_empty() {
            result = transcript.highlight(Highlight::Blue, &format);
        }
        if result.is_ok() && !token.data().is_empty() {
            result = transcript.highlight(Highlight::Yellow, token.data());
        }
        if let Err(e) = result {
            warn!("transcript write failed: {}", e);
        }
    }

    pub(crate) fn open_echo_file(&self, path: &Path, software_version: &str) -> LoadResult<()> {
        let file = HtmlTranscript::create(path, software_version)
            .map_err(|e| LoadError::echo(format!("could not open echo file {}: {}", path.display(), e)))?;
        debug!("opened echo file {}", path.display());
        self.inner.borrow_mut().echo_file = Some(file);
        Ok(())
    }

    pub(crate) fn close_echo_file(&self) {
        if let Some(file) = self.inner.borrow_mut().echo_file.take() {
            debug!("closing echo file {}", file.path().display());
            if let Err(e) = file.finish() {
                warn!("echo file close failed: {}", e);
            }
        }
    }

    pub(crate) fn echo_file_open(&self) -> bool {
        self.inner.borrow().echo_file.is_some()
    }

    /// Append raw token text to the open echo file, if any.
    pub(crate) fn dump_echo(&self, text: &str) {
        if let Some(file) = self.inner.borrow_mut().echo_file.as_mut() {
            if let Err(e) = file.dump(text) {
                warn!("echo file write failed: {}", e);
            }
        }
    }

    /// Finish both transcripts, writing their footers.
    pub fn close_transcripts(&self) {
        let (transcript, echo_file) = {
            let mut sinks = self.inner.borrow_mut();
            (sinks.transcript.take(), sinks.echo_file.take())
        };
        for file in transcript.into_iter().chain(echo_file) {
            if let Err(e) = file.finish() {
                warn!("transcript close failed: {}", e);
            }
        }
    }

    fn mirror(&self, text: &str, transcript_color: Highlight) {
        let mut sinks = self.inner.borrow_mut();
        if let Some(transcript) = sinks.transcript.as_mut() {
            if let Err(e) = transcript.highlight(transcript_color, text) {
                warn!("transcript write failed: {}", e);
            }
        }
        if let Some(echo_file) = sinks.echo_file.as_mut() {
            if let Err(e) = echo_file.highlight(Highlight::Yellow, text) {
                warn!("echo file write failed: {}", e);
            }
        }
    }

    fn push(&self, severity: Severity, message: String, location: SourceLocation) {
        self.inner.borrow_mut().entries.push(Diagnostic {
            severity,
            message,
            location,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_error_is_recorded_and_returned() {
        let diagnostics = Diagnostics::new();
        let err = diagnostics.error(LoadError::bracket("missing }"));
        assert_eq!(err.message, "missing }");
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.count(Severity::Error), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let diagnostics = Diagnostics::new();
        let other = diagnostics.clone();
        other.warning("deprecated", SourceLocation::new(None, 3));
        other.note("default used", SourceLocation::default());

        let entries = diagnostics.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity, Severity::Warning);
        assert_eq!(entries[0].location.line, 3);
        assert_eq!(diagnostics.with_severity(Severity::Note).len(), 1);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            severity: Severity::Warning,
            message: "tag 'x' loaded twice".to_string(),
            location: SourceLocation::new(None, 8),
        };
        assert_eq!(diagnostic.to_string(), "warning at line 8: tag 'x' loaded twice");
    }

    #[test]
    fn test_mirrors_into_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.html");
        let diagnostics = Diagnostics::new();
        diagnostics.open_transcript(&path, "v").unwrap();

        diagnostics.transcript_token(&Token::new("\n", "x"), 1);
        diagnostics.warning("careful", SourceLocation::default());
        let _ = diagnostics.error(LoadError::unknown_tag("nope"));
        diagnostics.close_transcripts();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("BACKGROUND-COLOR: lightblue\">\n   </FONT>"));
        assert!(html.contains("BACKGROUND-COLOR: yellow\">x</FONT>"));
        assert!(html.contains("BACKGROUND-COLOR: green"));
        assert!(html.contains("careful"));
        assert!(html.contains("BACKGROUND-COLOR: red"));
        assert!(html.contains("nope"));
    }

    #[test]
    fn test_echo_file_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("echo.html");
        let diagnostics = Diagnostics::new();
        assert!(!diagnostics.echo_file_open());

        diagnostics.open_echo_file(&path, "v").unwrap();
        assert!(diagnostics.echo_file_open());
        diagnostics.dump_echo(" value 1");
        diagnostics.warning("odd", SourceLocation::default());
        diagnostics.close_echo_file();
        assert!(!diagnostics.echo_file_open());

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains(" value 1"));
        assert!(html.contains("BACKGROUND-COLOR: yellow"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_echo_file_open_failure_is_echo_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("echo.html");
        let err = Diagnostics::new().open_echo_file(&path, "v").unwrap_err();
        assert_eq!(err.kind, crate::LoadErrorKind::Echo);
    }
}
