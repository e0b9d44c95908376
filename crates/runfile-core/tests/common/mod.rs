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


//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use runfile_core::units::{Speed, SpeedUnit};
use runfile_core::{Loadable, LoadResult, LoaderOptions, Registry, ScenarioStream};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory of scenario files.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` under the fixture, creating parent
    /// directories.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).expect("read fixture file")
    }
}

/// In-memory stream with default options.
pub fn stream(text: &str) -> ScenarioStream {
    ScenarioStream::from_text(text, LoaderOptions::default()).expect("open stream")
}

/// Every token's data until end of input.
pub fn data(stream: &mut ScenarioStream) -> Vec<String> {
    let mut out = Vec::new();
    loop {
        let token = stream.next_token().expect("next token");
        if token.is_end() {
            return out;
        }
        out.push(token.data().to_string());
    }
}

/// `speed { value 250 unit knots }`
#[derive(Debug, Default)]
pub struct SpeedSetting {
    pub value: f64,
    pub unit: String,
}

impl Loadable for SpeedSetting {
    fn load(&mut self, stream: &mut ScenarioStream) -> LoadResult<()> {
        let mut registry = Registry::new();
        registry.var("value", |s: &mut SpeedSetting| &mut s.value).required();
        registry.var("unit", |s: &mut SpeedSetting| &mut s.unit);
        registry.complete(self, stream)
    }
}

#[derive(Debug, Default)]
pub struct Waypoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Loadable for Waypoint {
    fn load(&mut self, stream: &mut ScenarioStream) -> LoadResult<()> {
        let mut registry = Registry::new();
        registry.var("name", |w: &mut Waypoint| &mut w.name);
        registry.var("lat", |w: &mut Waypoint| &mut w.lat);
        registry.var("lon", |w: &mut Waypoint| &mut w.lon);
        registry.complete(self, stream)
    }
}

/// Top-level scenario used across the tests.
#[derive(Debug, Default)]
pub struct Scenario {
    pub x: i32,
    pub y: i32,
    pub label: String,
    pub speed: SpeedSetting,
    pub cruise: Speed,
    pub route: Vec<Waypoint>,
    pub alternates: Vec<Waypoint>,
}

impl Loadable for Scenario {
    fn load(&mut self, stream: &mut ScenarioStream) -> LoadResult<()> {
        let mut registry = Registry::new();
        registry.var("x", |s: &mut Scenario| &mut s.x);
        registry.var("y", |s: &mut Scenario| &mut s.y);
        registry.var("label", |s: &mut Scenario| &mut s.label);
        registry.loadable_with_brackets("speed", |s: &mut Scenario| &mut s.speed);
        registry.quantity("cruise", SpeedUnit::Knots, |s: &mut Scenario| &mut s.cruise);
        registry.named_item("wp", |s: &mut Scenario| &mut s.route);
        registry.list("alternates", |s: &mut Scenario| &mut s.alternates);
        registry.complete(self, stream)
    }
}
