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

//! Tag bindings for domain objects.
//!
//! A domain object implements [`Loadable`]. Inside `load` it builds a
//! [`Registry`] naming each tag it understands and where the value goes,
//! then calls [`Registry::complete`], which reads tags until end of input or
//! the `}` closing the enclosing block and dispatches each one to its link.
//! A `}` outside every block is a `Bracket` error.
//!
//! ```
//! use runfile_core::{Loadable, LoadResult, LoaderOptions, Registry, ScenarioStream};
//!
//! #[derive(Default)]
//! struct Waypoint {
//!     name: String,
//!     lat: f64,
//! }
//!
//! impl Loadable for Waypoint {
//!     fn load(&mut self, stream: &mut ScenarioStream) -> LoadResult<()> {
//!         let mut registry = Registry::new();
//!         registry.var("name", |w: &mut Waypoint| &mut w.name);
//!         registry.var("lat", |w: &mut Waypoint| &mut w.lat).required();
//!         registry.complete(self, stream)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Route {
//!     waypoints: Vec<Waypoint>,
//! }
//!
//! impl Loadable for Route {
//!     fn load(&mut self, stream: &mut ScenarioStream) -> LoadResult<()> {
//!         let mut registry = Registry::new();
//!         registry.named_item("wp", |r: &mut Route| &mut r.waypoints);
//!         registry.complete(self, stream)
//!     }
//! }
//!
//! # fn main() -> LoadResult<()> {
//! let mut stream = ScenarioStream::from_text(
//!     "wp { name ALPHA lat 10 } wp { lat 20 }",
//!     LoaderOptions::default(),
//! )?;
//! let mut route = Route::default();
//! route.load(&mut stream)?;
//! assert_eq!(route.waypoints.len(), 2);
//! assert_eq!(route.waypoints[1].lat, 20.0);
//! # Ok(())
//! # }
//! ```

mod link;

pub use link::{Deprecation, LinkKind, LinkOptions};

use crate::datum::Datum;
use crate::error::{LoadError, LoadResult};
use crate::stream::ScenarioStream;
use crate::units::Quantity;
use link::{Handler, LoaderLink};
use std::collections::BTreeMap;
use tracing::debug;

/// A domain object that can be filled from a scenario stream.
pub trait Loadable {
    /// Read this object's tags from `stream`.
    fn load(&mut self, stream: &mut ScenarioStream) -> LoadResult<()>;
}

/// Where a registry is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Registering,
    Loading,
    Complete,
    Failed,
}

/// Normalise a tag for lookup: surrounding whitespace removed, ASCII
/// lowercased.
pub fn clean_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}

/// Tag table for one target of type `T`.
pub struct Registry<T> {
    links: BTreeMap<String, LoaderLink<T>>,
    state: LoadState,
}

impl<T: 'static> Registry<T> {
    pub fn new() -> Self {
        Self {
            links: BTreeMap::new(),
            state: LoadState::Registering,
        }
    }

    /// A single datum.
    pub fn var<V, F>(&mut self, tag: &str, accessor: F) -> LinkOptions<'_, T>
    where
        V: Datum + 'static,
        F: Fn(&mut T) -> &mut V + 'static,
    {
        self.insert(
            tag,
            LinkKind::Field,
            Box::new(move |target, stream| {
                *accessor(target) = stream.read::<V>()?;
                Ok(())
            }),
        )
    }

    /// A number read in `unit`.
    pub fn quantity<Q, F>(&mut self, tag: &str, unit: Q::Unit, accessor: F) -> LinkOptions<'_, T>
    where
        Q: Quantity + 'static,
        Q::Unit: 'static,
        F: Fn(&mut T) -> &mut Q + 'static,
    {
        self.insert(
            tag,
            LinkKind::Quantity,
            Box::new(move |target, stream| {
                *accessor(target) = stream.read_quantity::<Q>(unit)?;
                Ok(())
            }),
        )
    }

    /// A nested object that reads its own input after the tag, with no
    /// brackets required.
    pub fn loadable<L, F>(&mut self, tag: &str, accessor: F) -> LinkOptions<'_, T>
    where
        L: Loadable + 'static,
        F: Fn(&mut T) -> &mut L + 'static,
    {
        self.insert(
            tag,
            LinkKind::Object,
            Box::new(move |target, stream| accessor(target).load(stream)),
        )
    }

    /// A nested object written as `tag { ... }`.
    pub fn loadable_with_brackets<L, F>(&mut self, tag: &str, accessor: F) -> LinkOptions<'_, T>
    where
        L: Loadable + 'static,
        F: Fn(&mut T) -> &mut L + 'static,
    {
        self.insert(
            tag,
            LinkKind::BracketedObject,
            Box::new(move |target, stream| load_block(accessor(target), stream)),
        )
    }

    /// Each `tag { ... }` appends one element.
    pub fn named_item<L, F>(&mut self, tag: &str, accessor: F) -> LinkOptions<'_, T>
    where
        L: Loadable + Default + 'static,
        F: Fn(&mut T) -> &mut Vec<L> + 'static,
    {
        self.insert(
            tag,
            LinkKind::NamedItem,
            Box::new(move |target, stream| {
                let mut item = L::default();
                load_block(&mut item, stream)?;
                accessor(target).push(item);
                Ok(())
            }),
        )
    }

    /// `tag { ... } { ... } ...`, appending one element per block. The list
    /// ends at the first token that is not `{`.
    pub fn list<L, F>(&mut self, tag: &str, accessor: F) -> LinkOptions<'_, T>
    where
        L: Loadable + Default + 'static,
        F: Fn(&mut T) -> &mut Vec<L> + 'static,
    {
        self.insert(
            tag,
            LinkKind::List,
            Box::new(move |target, stream| {
                loop {
                    let mut item = L::default();
                    load_block(&mut item, stream)?;
                    accessor(target).push(item);
                    if !stream.peek_is("{")? {
                        return Ok(());
                    }
                }
            }),
        )
    }

    fn insert(&mut self, tag: &str, kind: LinkKind, handler: Handler<T>) -> LinkOptions<'_, T> {
        assert_eq!(
            self.state,
            LoadState::Registering,
            "tags must be registered before loading starts"
        );
        let tag = clean_tag(tag);
        assert!(
            !self.links.contains_key(&tag),
            "tag '{}' registered twice",
            tag
        );
        let link = self
            .links
            .entry(tag)
            .or_insert_with(|| LoaderLink::new(kind, handler));
        LinkOptions::new(link)
    }

    /// Read tags from `stream` into `target` until end of input or the `}`
    /// closing the enclosing block, which is left in the stream.
    ///
    /// # Errors
    ///
    /// - `Bracket` for a `}` outside any block (see
    ///   [`ScenarioStream::enter_block`])
    /// - `UnknownTag` for a tag that was never registered
    /// - `DuplicateTag` for a second occurrence of a [`once`](LinkOptions::once) tag
    /// - `MissingRequired` if a [`required`](LinkOptions::required) tag never appeared
    /// - anything the links themselves fail with
    pub fn complete(&mut self, target: &mut T, stream: &mut ScenarioStream) -> LoadResult<()> {
        self.state = LoadState::Loading;
        let result = self.dispatch(target, stream).and_then(|()| self.check_loaded(stream));
        self.state = if result.is_ok() {
            LoadState::Complete
        } else {
            LoadState::Failed
        };
        result
    }

    fn dispatch(&mut self, target: &mut T, stream: &mut ScenarioStream) -> LoadResult<()> {
        loop {
            let token = stream.next_token()?;
            if token.is_end() {
                return Ok(());
            }
            if token.is_keyword("}") {
                if stream.nest_depth() == 0 {
                    return Err(stream.raise(LoadError::bracket("unmatched }")));
                }
                stream.push_back();
                return Ok(());
            }

            let tag = clean_tag(token.data());
            let Some(link) = self.links.get_mut(&tag) else {
                return Err(stream.raise(LoadError::unknown_tag(format!(
                    "tag '{}' is not recognised here",
                    token.data()
                ))));
            };

            if let Some(deprecation) = &link.deprecation {
                stream.warn(deprecation.warning(&tag));
            }
            if link.loaded && !link.kind.is_list() {
                if link.once {
                    return Err(stream.raise(LoadError::duplicate_tag(format!(
                        "tag '{}' may only be given once",
                        tag
                    ))));
                }
                stream.warn(format!(
                    "tag '{}' given more than once; the last value is used",
                    tag
                ));
            }

            debug!(tag = %tag, kind = ?link.kind, "loading");
            (link.handler)(target, stream)?;
            link.loaded = true;
        }
    }

    fn check_loaded(&self, stream: &ScenarioStream) -> LoadResult<()> {
        for (tag, link) in &self.links {
            if link.loaded {
                continue;
            }
            if link.required {
                return Err(stream.raise(LoadError::missing_required(format!(
                    "required tag '{}' was not given",
                    tag
                ))));
            }
            if link.deprecation.is_none() {
                stream.note(format!(
                    "optional tag '{}' was not given; its default value is used",
                    tag
                ));
            }
        }
        Ok(())
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// True only after [`complete`](Self::complete) succeeded.
    pub fn loaded_successfully(&self) -> bool {
        self.state == LoadState::Complete
    }

    /// Whether `tag` appeared during loading.
    pub fn is_loaded(&self, tag: &str) -> bool {
        self.links
            .get(&clean_tag(tag))
            .map_or(false, |link| link.loaded)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }
}

impl<T: 'static> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("links", &self.links)
            .field("state", &self.state)
            .finish()
    }
}

/// `{`, the object's own load, `}`.
fn load_block<L: Loadable>(item: &mut L, stream: &mut ScenarioStream) -> LoadResult<()> {
    stream.expect("{")?;
    stream.enter_block()?;
    let result = item.load(stream).and_then(|()| stream.expect("}"));
    stream.leave_block();
    result
}
