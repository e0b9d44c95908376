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


//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

// Test helper to create a runfile command
fn runfile_cmd() -> Command {
    Command::cargo_bin("runfile").expect("Failed to find runfile binary")
}

// Test helper to create a temporary scenario file
fn create_temp_file(content: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

// Test helper to write a file inside a temp directory
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write file");
    path
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    runfile_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Runfile - scenario description language toolkit"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    runfile_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("runfile"));
}

#[test]
fn test_no_subcommand_fails() {
    runfile_cmd().assert().failure();
}

// ===== Check Command Tests =====

#[test]
fn test_check_valid_file() {
    let file = create_temp_file("speed { value 250 unit knots } ; cruise\n");

    runfile_cmd()
        .arg("check")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("Tokens: 7"))
        .stdout(predicate::str::contains("Files: 1"))
        .stdout(predicate::str::contains("Warnings: 0"));
}

#[test]
fn test_check_counts_included_files() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "other.txt", "x 1\n");
    let main = write_file(&dir, "main.txt", "#include other.txt\ny 2\n");

    runfile_cmd()
        .arg("check")
        .arg(&main)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tokens: 4"))
        .stdout(predicate::str::contains("Files: 2"));
}

#[test]
fn test_check_unterminated_comment() {
    let file = create_temp_file("x 1 /* never closed");

    runfile_cmd()
        .arg("check")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗"))
        .stderr(predicate::str::contains("UnterminatedCommentError"));
}

#[test]
fn test_check_missing_include_reported() {
    let dir = TempDir::new().unwrap();
    let main = write_file(&dir, "main.txt", "#include absent.txt\ny 2\n");

    runfile_cmd()
        .arg("check")
        .arg(&main)
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗"))
        .stdout(predicate::str::contains("absent.txt"))
        .stderr(predicate::str::contains("1 error(s) reported"));
}

#[test]
fn test_check_missing_include_strict() {
    let dir = TempDir::new().unwrap();
    let main = write_file(&dir, "main.txt", "#include absent.txt\ny 2\n");

    runfile_cmd()
        .arg("check")
        .arg(&main)
        .arg("--strict-includes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IncludeError"));
}

#[test]
fn test_check_lists_warnings() {
    let file = create_temp_file("label \"first\nsecond\"\n");

    runfile_cmd()
        .arg("check")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"))
        .stdout(predicate::str::contains("newline before end of quote"))
        .stdout(predicate::str::contains("Warnings: 1"));
}

#[test]
fn test_check_nonexistent_file() {
    runfile_cmd()
        .arg("check")
        .arg("/nonexistent/scenario.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_check_respects_max_file_size() {
    let file = create_temp_file(&"x 1\n".repeat(100));

    runfile_cmd()
        .env("RUNFILE_MAX_FILE_SIZE", "50")
        .arg("check")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

// ===== Tokens Command Tests =====

#[test]
fn test_tokens_text() {
    let file = create_temp_file("speed 250\n/* note */ label \"a b\"\n");

    runfile_cmd()
        .arg("tokens")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1:0 \"speed\""))
        .stdout(predicate::str::contains("\"a b\""))
        .stdout(predicate::str::contains("note").not());
}

#[test]
fn test_tokens_json() {
    let file = create_temp_file("speed 250\n");

    let output = runfile_cmd()
        .arg("tokens")
        .arg(file.path())
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tokens = value.as_array().unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0]["data"], "speed");
    assert_eq!(tokens[1]["data"], "250");
    assert_eq!(tokens[0]["line"], 1);
    assert!(tokens[0].get("format").is_none());
}

#[test]
fn test_tokens_json_with_format() {
    let file = create_temp_file("; header\nspeed 250\n");

    let output = runfile_cmd()
        .arg("tokens")
        .arg(file.path())
        .arg("--format")
        .arg("json")
        .arg("--show-format")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tokens = value.as_array().unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0]["format"], "; header\n");
    assert_eq!(tokens[2]["data"], "");
    assert_eq!(tokens[2]["format"], "\n");
}

#[test]
fn test_tokens_unknown_format() {
    let file = create_temp_file("x 1");

    runfile_cmd()
        .arg("tokens")
        .arg(file.path())
        .arg("--format")
        .arg("yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown token format"));
}

// ===== Archive Command Tests =====

#[test]
fn test_archive_writes_relinked_copy() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "fixes.txt", "wp { lat 10 }\n");
    let main = write_file(&dir, "main.txt", "#include fixes.txt\nx 1\n");
    let dest = dir.path().join("archive");

    runfile_cmd()
        .arg("archive")
        .arg(&main)
        .arg("--dest")
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("archived 2 file(s)"))
        .stdout(predicate::str::contains("-> fixes.txt"));

    let copy = fs::read_to_string(dest.join("main.txt")).unwrap();
    assert!(copy.contains("#include fixes.txt\nx 1\n"));
    assert!(dest.join("fixes.txt").exists());
}

// ===== Transcript Command Tests =====

#[test]
fn test_transcript_writes_html() {
    let file = create_temp_file("speed 250 #echo_off hidden\n");
    let dir = TempDir::new().unwrap();
    let html = dir.path().join("run.html");

    runfile_cmd()
        .arg("transcript")
        .arg(file.path())
        .arg("--output")
        .arg(&html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tokens: 3"));

    let text = fs::read_to_string(&html).unwrap();
    assert!(text.starts_with("<html>"));
    assert!(text.contains(">speed</FONT>"));
    assert!(!text.contains("hidden"));
    assert!(text.trim_end().ends_with("</html>"));
}

// ===== Completion Command Tests =====

#[test]
fn test_completion_bash() {
    runfile_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("runfile"));
}

#[test]
fn test_completion_install_instructions() {
    runfile_cmd()
        .arg("completion")
        .arg("fish")
        .arg("--install")
        .assert()
        .success()
        .stdout(predicate::str::contains("runfile.fish"));
}

#[test]
fn test_completion_unsupported_shell() {
    runfile_cmd()
        .arg("completion")
        .arg("tcsh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported shell"));
}
