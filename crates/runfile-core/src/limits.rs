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

//! Resource limits for scenario loading.

/// Configurable limits bounding what a single load may consume.
///
/// Include trees and nested blocks are recursive, so without these a file
/// that includes itself would recurse until the stack overflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum size of any one input file in bytes (default: 64MB).
    pub max_file_size: usize,
    /// Maximum length of a single token's data in bytes (default: 64KB).
    pub max_token_length: usize,
    /// Maximum depth of nested `#include` directives (default: 32).
    pub max_include_depth: usize,
    /// Maximum depth of nested `{ ... }` blocks (default: 128).
    pub max_nest_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 64 * 1024 * 1024, // 64MB
            max_token_length: 64 * 1024,     // 64KB
            max_include_depth: 32,
            max_nest_depth: 128,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_file_size: usize::MAX,
            max_token_length: usize::MAX,
            max_include_depth: usize::MAX,
            max_nest_depth: usize::MAX,
        }
    }
}
