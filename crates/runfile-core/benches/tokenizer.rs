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


//! Token pipeline benchmarks.
//!
//! Measures raw tokenization, the full stream with comment and directive
//! handling, and registry-driven loading of generated scenarios.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use runfile_core::{
    Diagnostics, Limits, Loadable, LoadResult, LoaderOptions, Registry, ScenarioStream,
    TokenSource, Tokenizer,
};

/// A route with `count` waypoint blocks and a comment on every third one.
fn generate_route(count: usize) -> String {
    let mut text = String::from("; generated route\nlabel \"benchmark route\"\n");
    for i in 0..count {
        if i % 3 == 0 {
            text.push_str("/* checkpoint */\n");
        }
        text.push_str(&format!(
            "wp {{ name WP{} lat {}.25 lon -{}.5 }} ; leg {}\n",
            i,
            i % 90 + 1,
            i % 180 + 1,
            i
        ));
    }
    text
}

#[derive(Default)]
struct Waypoint {
    name: String,
    lat: f64,
    lon: f64,
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

#[derive(Default)]
struct Route {
    label: String,
    waypoints: Vec<Waypoint>,
}

impl Loadable for Route {
    fn load(&mut self, stream: &mut ScenarioStream) -> LoadResult<()> {
        let mut registry = Registry::new();
        registry.var("label", |r: &mut Route| &mut r.label);
        registry.named_item("wp", |r: &mut Route| &mut r.waypoints);
        registry.complete(self, stream)
    }
}

// ============================================================================
// Tokenizer Benchmarks
// ============================================================================

fn bench_tokenizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer");

    for count in [10, 100, 1_000] {
        let text = generate_route(count);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| {
                let mut tokenizer =
                    Tokenizer::from_text(text.as_str(), Diagnostics::new(), &Limits::default());
                let mut tokens = 0usize;
                while !tokenizer.next_token().unwrap().is_end() {
                    tokens += 1;
                }
                black_box(tokens)
            })
        });
    }

    group.finish();
}

// ============================================================================
// Full Stream Benchmarks
// ============================================================================

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");

    for count in [10, 100, 1_000] {
        let text = generate_route(count);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| {
                let mut stream =
                    ScenarioStream::from_text(text.as_str(), LoaderOptions::default()).unwrap();
                black_box(stream.drain().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for count in [10, 100, 1_000] {
        let text = generate_route(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| {
                let mut stream =
                    ScenarioStream::from_text(text.as_str(), LoaderOptions::default()).unwrap();
                let mut route = Route::default();
                route.load(&mut stream).unwrap();
                black_box(route.waypoints.len() + route.label.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenizer, bench_stream, bench_load);
criterion_main!(benches);
