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


//! Include trees, archive copies and transcripts on disk.

mod common;

use common::{data, Fixture, Scenario};
use runfile_core::{Loadable, LoadErrorKind, LoaderOptions, ScenarioStream, Severity};
use std::fs;

// ==================== Include tests ====================

#[test]
fn test_nested_includes_splice_in_order() {
    let fixture = Fixture::new();
    fixture.write("leaf.txt", "c d");
    fixture.write("middle.txt", "b\n#include leaf.txt\ne");
    let main = fixture.write("main.txt", "a #include middle.txt f");

    let mut s = ScenarioStream::open(&main, LoaderOptions::default()).unwrap();
    assert_eq!(data(&mut s), vec!["a", "b", "c", "d", "e", "f"]);
    assert_eq!(s.opened_files().len(), 3);
    assert_eq!(s.opened_files()[0], main);
}

#[test]
fn test_include_depth_tracks_nesting() {
    let fixture = Fixture::new();
    fixture.write("leaf.txt", "deep");
    fixture.write("middle.txt", "#include leaf.txt");
    let main = fixture.write("main.txt", "#include middle.txt top");

    let mut s = ScenarioStream::open(&main, LoaderOptions::default()).unwrap();
    assert_eq!(s.next_token().unwrap().data(), "deep");
    assert_eq!(s.include_depth(), 2);
    assert_eq!(s.next_token().unwrap().data(), "top");
    assert_eq!(s.include_depth(), 0);
}

#[test]
fn test_parent_relative_include() {
    let fixture = Fixture::new();
    fixture.write("shared/common.txt", "y 9");
    let main = fixture.write("runs/main.txt", "#include ../shared/common.txt");

    let mut s = ScenarioStream::open(&main, LoaderOptions::default()).unwrap();
    let mut scenario = Scenario::default();
    scenario.load(&mut s).unwrap();
    assert_eq!(scenario.y, 9);
}

#[test]
fn test_self_include_hits_depth_limit() {
    let fixture = Fixture::new();
    let main = fixture.write("loop.txt", "#include loop.txt");
    let options = LoaderOptions::builder().max_include_depth(4).build();

    let mut s = ScenarioStream::open(&main, options).unwrap();
    let err = s.next_token().unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::Security);
}

#[test]
fn test_include_without_target() {
    let fixture = Fixture::new();
    let main = fixture.write("main.txt", "x 1 #include");

    let mut s = ScenarioStream::open(&main, LoaderOptions::default()).unwrap();
    let err = s.drain().unwrap_err();
    assert_eq!(err.kind, LoadErrorKind::Include);
}

#[test]
fn test_empty_include_falls_through() {
    let fixture = Fixture::new();
    fixture.write("empty.txt", "; nothing here\n");
    let main = fixture.write("main.txt", "#include empty.txt\nx 5");

    let mut s = ScenarioStream::open(&main, LoaderOptions::default()).unwrap();
    let token = s.next_token().unwrap();
    assert_eq!(token.data(), "x");
    assert!(token.format().contains("#include empty.txt"));
    assert!(token.format().contains("; nothing here"));
}

// ==================== Archive tests ====================

#[test]
fn test_archive_copies_and_relinks() {
    let fixture = Fixture::new();
    fixture.write("other.txt", "x 1\n");
    let lib = fixture.write("lib/other.txt", "y 2\n");
    let main_text = format!(
        "; scenario\n#include other.txt\n#include {}\nlabel done\n",
        lib.display()
    );
    let main = fixture.write("main.txt", &main_text);
    let dest = fixture.path().join("archive");

    let options = LoaderOptions::builder().archive_dir(&dest).build();
    let mut s = ScenarioStream::open(&main, options).unwrap();
    let mut scenario = Scenario::default();
    scenario.load(&mut s).unwrap();
    assert_eq!((scenario.x, scenario.y), (1, 2));

    let names: Vec<String> = s
        .archive_director()
        .entries()
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"other_1.txt".to_string()));

    let main_copy = fs::read_to_string(dest.join("main.txt")).unwrap();
    assert!(main_copy.starts_with("; This file is an archive copy of a file formerly called: \""));
    assert!(main_copy.ends_with(
        "; scenario\n#include other.txt\n#include other_1.txt\nlabel done\n"
    ));

    let other_copy = fs::read_to_string(dest.join("other.txt")).unwrap();
    assert!(other_copy.ends_with("\n\nx 1\n"));
    let lib_copy = fs::read_to_string(dest.join("other_1.txt")).unwrap();
    assert!(lib_copy.ends_with("\n\ny 2\n"));
}

#[test]
fn test_archive_reloads_identically() {
    let fixture = Fixture::new();
    fixture.write("wps.txt", "wp { lat 10 }\nwp { lat 20 }\n");
    let main = fixture.write("main.txt", "x 3 /* keep */\n#include wps.txt\n");
    let dest = fixture.path().join("copy");

    let options = LoaderOptions::builder().archive_dir(&dest).build();
    let mut s = ScenarioStream::open(&main, options).unwrap();
    s.drain().unwrap();

    let mut s = ScenarioStream::open(dest.join("main.txt"), LoaderOptions::default()).unwrap();
    let mut scenario = Scenario::default();
    scenario.load(&mut s).unwrap();
    assert_eq!(scenario.x, 3);
    assert_eq!(scenario.route.len(), 2);
}

#[test]
fn test_repeated_include_archived_once() {
    let fixture = Fixture::new();
    fixture.write("part.txt", "p");
    let main = fixture.write("main.txt", "#include part.txt #include part.txt");
    let dest = fixture.path().join("out");

    let options = LoaderOptions::builder().archive_dir(&dest).build();
    let mut s = ScenarioStream::open(&main, options).unwrap();
    assert_eq!(s.drain().unwrap(), 2);
    assert_eq!(s.archive_director().entries().len(), 2);
    assert!(!dest.join("part_1.txt").exists());
}

// ==================== Transcript tests ====================

#[test]
fn test_html_transcript() {
    let fixture = Fixture::new();
    fixture.write("inc.txt", "inner <b>\n");
    let main = fixture.write("main.txt", "outer\n#include inc.txt\n");
    let html = fixture.path().join("run.html");

    let options = LoaderOptions::builder()
        .html_transcript(&html)
        .echo(true)
        .software_version("runfile test")
        .build();
    let mut s = ScenarioStream::open(&main, options).unwrap();
    s.drain().unwrap();
    s.finish();

    let text = fs::read_to_string(&html).unwrap();
    assert!(text.starts_with("<html>\n<body bgcolor=dddddd>\n<pre>\nrunning runfile test\n"));
    assert!(text.contains("<FONT style=\"BACKGROUND-COLOR: yellow\">outer</FONT>"));
    assert!(text.contains("<FONT style=\"BACKGROUND-COLOR: yellow\">&lt;b&gt;</FONT>"));
    assert!(text.ends_with("</pre>\n</body>\n</html>\n"));
}

#[test]
fn test_errors_mirrored_into_transcript() {
    let fixture = Fixture::new();
    let main = fixture.write("main.txt", "x 1 q 2");
    let html = fixture.path().join("run.html");

    let options = LoaderOptions::builder().html_transcript(&html).build();
    let mut s = ScenarioStream::open(&main, options).unwrap();
    assert!(Scenario::default().load(&mut s).is_err());
    s.finish();

    let text = fs::read_to_string(&html).unwrap();
    assert!(text.contains("<FONT style=\"BACKGROUND-COLOR: red\">"));
    assert!(text.contains("UnknownTagError"));
}

#[test]
fn test_echo_file_directive() {
    let fixture = Fixture::new();
    let echo = fixture.path().join("echo.html");
    let main = fixture.write(
        "main.txt",
        &format!("x 1\n#echo_file {}\ny 2\n#end_echo_file\nlabel z\n", echo.display()),
    );

    let mut s = ScenarioStream::open(&main, LoaderOptions::default()).unwrap();
    let mut scenario = Scenario::default();
    scenario.load(&mut s).unwrap();
    assert_eq!(scenario.label, "z");

    let text = fs::read_to_string(&echo).unwrap();
    assert!(text.contains("y 2"));
    assert!(!text.contains("label"));
}

#[test]
fn test_quote_spanning_newline_warns() {
    let fixture = Fixture::new();
    let main = fixture.write("main.txt", "label \"two\nlines\"");

    let mut s = ScenarioStream::open(&main, LoaderOptions::default()).unwrap();
    let mut scenario = Scenario::default();
    scenario.load(&mut s).unwrap();
    assert_eq!(scenario.label, "two\nlines");
    assert_eq!(s.diagnostics().count(Severity::Warning), 1);
}

#[test]
fn test_file_size_limit() {
    let fixture = Fixture::new();
    let main = fixture.write("big.txt", &"x 1\n".repeat(64));
    let options = LoaderOptions::builder().max_file_size(16).build();

    let err = ScenarioStream::open(&main, options).err().unwrap();
    assert_eq!(err.kind, LoadErrorKind::Security);
}
