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

//! Path decomposition and include target resolution.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A file path with the decompositions the include and archive layers need.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilePath(PathBuf);

impl FilePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Containing directory; empty for a bare file name.
    pub fn directory(&self) -> FilePath {
        Self(self.0.parent().map(Path::to_path_buf).unwrap_or_default())
    }

    /// File name without its extension.
    pub fn name(&self) -> Option<&str> {
        self.0.file_stem().and_then(|s| s.to_str())
    }

    /// Extension without the dot.
    pub fn extension(&self) -> Option<&str> {
        self.0.extension().and_then(|s| s.to_str())
    }

    /// Number of named segments, the file name included.
    ///
    /// `a/b/c.txt` has three, `c.txt` has one.
    pub fn segment_count(&self) -> usize {
        self.0
            .components()
            .filter(|c| matches!(c, Component::Normal(_) | Component::ParentDir))
            .count()
    }

    /// Absolute, or anchored to a drive or root.
    pub fn is_absolute(&self) -> bool {
        self.0.is_absolute() || self.0.has_root()
    }

    /// Whether the path climbs out of its base directory first.
    pub fn starts_with_parent(&self) -> bool {
        matches!(self.0.components().next(), Some(Component::ParentDir))
    }

    /// Append `more` below this path.
    pub fn push(&self, more: impl AsRef<Path>) -> FilePath {
        Self(self.0.join(more))
    }

    /// Resolve an include target written inside a file that lives in
    /// `current_dir`.
    ///
    /// 1. Absolute targets are used unchanged.
    /// 2. Targets starting with `..` are taken relative to `current_dir`.
    /// 3. Targets with more than one segment and an extension are complete
    ///    paths (relative to the working directory).
    /// 4. Anything else is joined onto `current_dir`.
    pub fn resolve_include(current_dir: &Path, target: &str) -> FilePath {
        let target_path = FilePath::new(target);
        if target_path.is_absolute() {
            return target_path;
        }
        if target_path.starts_with_parent() {
            return FilePath::new(current_dir).push(target);
        }
        if target_path.segment_count() > 1 && target_path.extension().is_some() {
            return target_path;
        }
        FilePath::new(current_dir).push(target)
    }
}

impl From<&Path> for FilePath {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl AsRef<Path> for FilePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
