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

//! Tokens and the [`TokenSource`] capability shared by every pipeline stage.

use crate::error::{LoadResult, SourceLocation};

/// One unit of scenario text.
///
/// `format` holds everything that precedes the content (delimiters, comments,
/// quote marks, consumed directives) so transcripts and archive copies can
/// reproduce the input verbatim. `data` is the content itself; an empty
/// `data` marks the end of the stream.
///
/// A token read between quote marks is flagged as quoted. Its data is taken
/// verbatim and never acts as a directive or bracket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    format: String,
    data: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "std::ops::Not::not"))]
    quoted: bool,
}

impl Token {
    /// Create a token from its two parts.
    pub fn new(format: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            data: data.into(),
            quoted: false,
        }
    }

    /// The semantic content.
    #[inline]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The leading formatting text.
    #[inline]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Formatting followed by data, exactly as it appeared in the input.
    pub fn all(&self) -> String {
        let mut out = String::with_capacity(self.format.len() + self.data.len());
        out.push_str(&self.format);
        out.push_str(&self.data);
        out
    }

    /// Whether the data was read between quote marks.
    #[inline]
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    pub fn mark_quoted(&mut self) {
        self.quoted = true;
    }

    /// True when the data is exactly `keyword` and was not quoted.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        !self.quoted && self.data == keyword
    }

    /// True when this token signals the end of the stream.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push_data(&mut self, c: char) {
        self.data.push(c);
    }

    pub fn push_format(&mut self, c: char) {
        self.format.push(c);
    }

    pub fn push_format_str(&mut self, s: &str) {
        self.format.push_str(s);
    }

    /// Insert `prefix` in front of the existing formatting.
    pub fn prepend_format(&mut self, prefix: &str) {
        if !prefix.is_empty() {
            self.format.insert_str(0, prefix);
        }
    }

    pub fn set_data(&mut self, data: impl Into<String>) {
        self.data = data.into();
    }

    /// Move the content into the formatting, leaving an empty data part.
    ///
    /// Used when a directive is consumed but its text must survive in
    /// transcripts. Nothing is added, so `all()` is unchanged.
    pub fn merge_data_into_format(&mut self) {
        let data = std::mem::take(&mut self.data);
        self.format.push_str(&data);
        self.quoted = false;
    }

    /// Split into `(format, data)`.
    pub fn into_parts(self) -> (String, String) {
        (self.format, self.data)
    }
}

/// A stage of the token pipeline.
///
/// Every layer (tokenizer, comment filter, archive echo, include
/// preprocessor, echo decorator, push-back buffer) owns the layer below it and
/// implements this trait, so stages compose by wrapping.
pub trait TokenSource {
    /// Fetch the next token. An empty-data token means the input is exhausted;
    /// asking again keeps returning empty-data tokens.
    fn next_token(&mut self) -> LoadResult<Token>;

    /// Position of the most recently read character.
    fn location(&self) -> SourceLocation {
        SourceLocation::default()
    }

    /// How many `#include` levels deep the current token comes from.
    fn include_depth(&self) -> usize {
        0
    }
}

impl<S: TokenSource + ?Sized> TokenSource for Box<S> {
    fn next_token(&mut self) -> LoadResult<Token> {
        (**self).next_token()
    }

    fn location(&self) -> SourceLocation {
        (**self).location()
    }

    fn include_depth(&self) -> usize {
        (**self).include_depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_concatenates_format_and_data() {
        let token = Token::new("  ; note\n", "speed");
        assert_eq!(token.all(), "  ; note\nspeed");
        assert_eq!(token.format(), "  ; note\n");
        assert_eq!(token.data(), "speed");
    }

    #[test]
    fn test_empty_data_is_end() {
        assert!(Token::default().is_end());
        assert!(Token::new("\n\n", "").is_end());
        assert!(!Token::new("", "x").is_end());
    }

    #[test]
    fn test_builders() {
        let mut token = Token::default();
        token.push_format(' ');
        token.push_format_str("\t");
        token.push_data('a');
        token.push_data('b');
        token.prepend_format("/* c */");
        assert_eq!(token.format(), "/* c */ \t");
        assert_eq!(token.data(), "ab");

        token.set_data("xyz");
        assert_eq!(token.data(), "xyz");
    }

    #[test]
    fn test_merge_data_into_format() {
        let mut token = Token::new(" ", "#echo_on");
        token.merge_data_into_format();
        assert_eq!(token.format(), " #echo_on");
        assert!(token.is_end());
    }

    #[test]
    fn test_quoted_data_is_not_a_keyword() {
        let bare = Token::new(" ", "#echo_on");
        assert!(bare.is_keyword("#echo_on"));

        let mut quoted = Token::new(" \"", "#echo_on");
        quoted.mark_quoted();
        assert!(quoted.is_quoted());
        assert!(!quoted.is_keyword("#echo_on"));
        assert!(!quoted.is_keyword("}"));
    }

    #[test]
    fn test_into_parts() {
        let (format, data) = Token::new("\n", "wp").into_parts();
        assert_eq!(format, "\n");
        assert_eq!(data, "wp");
    }

    #[test]
    fn test_boxed_source_delegates() {
        struct Fixed(Vec<Token>);
        impl TokenSource for Fixed {
            fn next_token(&mut self) -> LoadResult<Token> {
                Ok(self.0.pop().unwrap_or_default())
            }
            fn include_depth(&self) -> usize {
                7
            }
        }

        let mut boxed: Box<dyn TokenSource> = Box::new(Fixed(vec![Token::new("", "a")]));
        assert_eq!(boxed.next_token().unwrap().data(), "a");
        assert!(boxed.next_token().unwrap().is_end());
        assert_eq!(boxed.include_depth(), 7);
    }
}
