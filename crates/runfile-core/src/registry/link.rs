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

//! Bindings between a tag and the part of a target it fills.

use crate::error::LoadResult;
use crate::stream::ScenarioStream;
use std::fmt;

/// Reads the value for one tag occurrence into the target.
pub(crate) type Handler<T> = Box<dyn Fn(&mut T, &mut ScenarioStream) -> LoadResult<()>>;

/// What a link consumes after its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// One datum.
    Field,
    /// One number interpreted in a fixed unit.
    Quantity,
    /// A nested object reading whatever it needs.
    Object,
    /// A nested object between `{` and `}`.
    BracketedObject,
    /// One `{ ... }` block per occurrence, appended to a sequence.
    NamedItem,
    /// One or more `{ ... }` blocks after a single tag.
    List,
}

impl LinkKind {
    /// List links may appear any number of times.
    pub fn is_list(self) -> bool {
        matches!(self, LinkKind::NamedItem | LinkKind::List)
    }
}

/// Why a tag is still accepted but should no longer be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deprecation {
    Plain,
    /// Another tag replaces this one.
    Superseded(String),
    /// The value is read and then ignored.
    Unused,
    /// The value is now fixed in code.
    HardCoded,
}

impl Deprecation {
    pub(crate) fn warning(&self, tag: &str) -> String {
        match self {
            Deprecation::Plain => format!("tag '{}' is deprecated", tag),
            Deprecation::Superseded(replacement) => {
                format!("tag '{}' is deprecated; use '{}' instead", tag, replacement)
            }
            Deprecation::Unused => format!("tag '{}' is deprecated and its value is ignored", tag),
            Deprecation::HardCoded => {
                format!("tag '{}' is deprecated; its value is now fixed", tag)
            }
        }
    }
}

pub(crate) struct LoaderLink<T> {
    pub(crate) kind: LinkKind,
    pub(crate) handler: Handler<T>,
    pub(crate) loaded: bool,
    pub(crate) required: bool,
    pub(crate) once: bool,
    pub(crate) deprecation: Option<Deprecation>,
}

impl<T> LoaderLink<T> {
    pub(crate) fn new(kind: LinkKind, handler: Handler<T>) -> Self {
        Self {
            kind,
            handler,
            loaded: false,
            required: false,
            once: false,
            deprecation: None,
        }
    }
}

impl<T> fmt::Debug for LoaderLink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderLink")
            .field("kind", &self.kind)
            .field("loaded", &self.loaded)
            .field("required", &self.required)
            .field("once", &self.once)
            .field("deprecation", &self.deprecation)
            .finish_non_exhaustive()
    }
}

/// Flags for a link just registered.
///
/// ```
/// # use runfile_core::{Loadable, LoadResult, Registry, ScenarioStream};
/// #[derive(Default)]
/// struct Runway {
///     heading: f64,
///     length: f64,
/// }
///
/// impl Loadable for Runway {
///     fn load(&mut self, stream: &mut ScenarioStream) -> LoadResult<()> {
///         let mut registry = Registry::new();
///         registry.var("heading", |r: &mut Runway| &mut r.heading).required();
///         registry.var("rwy_length", |r: &mut Runway| &mut r.length).superseded_by("length");
///         registry.complete(self, stream)
///     }
/// }
/// ```
pub struct LinkOptions<'a, T> {
    link: &'a mut LoaderLink<T>,
}

impl<'a, T> LinkOptions<'a, T> {
    pub(crate) fn new(link: &'a mut LoaderLink<T>) -> Self {
        Self { link }
    }

    /// Loading fails if the tag never appears. Clears any deprecation.
    pub fn required(self) -> Self {
        self.link.required = true;
        self.link.deprecation = None;
        self
    }

    /// A second occurrence of the tag is a `DuplicateTag` error instead of
    /// a warning. Has no effect on list links.
    pub fn once(self) -> Self {
        self.link.once = true;
        self
    }

    pub fn deprecated(self) -> Self {
        self.deprecate(Deprecation::Plain)
    }

    pub fn superseded_by(self, tag: impl Into<String>) -> Self {
        self.deprecate(Deprecation::Superseded(tag.into()))
    }

    pub fn unused(self) -> Self {
        self.deprecate(Deprecation::Unused)
    }

    pub fn hard_coded(self) -> Self {
        self.deprecate(Deprecation::HardCoded)
    }

    fn deprecate(self, deprecation: Deprecation) -> Self {
        self.link.required = false;
        self.link.deprecation = Some(deprecation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> LoaderLink<()> {
        LoaderLink::new(LinkKind::Field, Box::new(|_, _| Ok(())))
    }

    #[test]
    fn test_list_kinds() {
        assert!(LinkKind::List.is_list());
        assert!(LinkKind::NamedItem.is_list());
        assert!(!LinkKind::BracketedObject.is_list());
        assert!(!LinkKind::Field.is_list());
    }

    #[test]
    fn test_required_and_deprecated_exclude_each_other() {
        let mut l = link();
        LinkOptions::new(&mut l).deprecated().required();
        assert!(l.required);
        assert_eq!(l.deprecation, None);

        LinkOptions::new(&mut l).superseded_by("new_tag");
        assert!(!l.required);
        assert_eq!(l.deprecation, Some(Deprecation::Superseded("new_tag".into())));
    }

    #[test]
    fn test_deprecation_warnings() {
        assert!(Deprecation::Plain.warning("x").contains("'x' is deprecated"));
        assert!(Deprecation::Superseded("y".into())
            .warning("x")
            .contains("use 'y' instead"));
        assert!(Deprecation::Unused.warning("x").contains("ignored"));
        assert!(Deprecation::HardCoded.warning("x").contains("fixed"));
    }
}
