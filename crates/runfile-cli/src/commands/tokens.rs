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


//! Tokens command - list a scenario's tokens

use super::{loader_options, open_scenario};
use crate::error::CliError;
use serde_json::Value;
use std::str::FromStr;

/// Output format of the `tokens` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFormat {
    Text,
    Json,
}

impl FromStr for TokenFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(TokenFormat::Text),
            "json" => Ok(TokenFormat::Json),
            _ => Err(CliError::InvalidInput(format!(
                "Unknown token format: '{}'. Supported formats: text, json",
                s
            ))),
        }
    }
}

/// List every data-carrying token of a scenario, with its line number and
/// include depth.
///
/// Text output is one `line:depth data` row per token, the data in Rust
/// debug quoting. JSON output is an array of objects with `line`, `depth`
/// and `data` keys, plus `format` when `show_format` is set.
///
/// # Errors
///
/// Returns `Err` if the scenario cannot be read or the JSON cannot be
/// produced.
pub fn tokens(file: &str, format: TokenFormat, show_format: bool) -> Result<(), CliError> {
    let mut stream = open_scenario(file, loader_options().build())?;

    let mut records = Vec::new();
    loop {
        let token = stream.next_token()?;
        if token.is_end() && !show_format {
            break;
        }
        let line = stream.location().line;
        let depth = stream.include_depth();

        match format {
            TokenFormat::Text => {
                if show_format {
                    println!("{}:{} {:?} {:?}", line, depth, token.format(), token.data());
                } else {
                    println!("{}:{} {:?}", line, depth, token.data());
                }
            }
            TokenFormat::Json => {
                let mut record = serde_json::to_value(&token).map_err(CliError::json_format)?;
                if let Value::Object(map) = &mut record {
                    if !show_format {
                        map.remove("format");
                    }
                    map.insert("line".to_string(), Value::from(line));
                    map.insert("depth".to_string(), Value::from(depth));
                }
                records.push(record);
            }
        }

        if token.is_end() {
            break;
        }
    }

    if format == TokenFormat::Json {
        let out = serde_json::to_string_pretty(&records).map_err(CliError::json_format)?;
        println!("{}", out);
    }
    stream.finish();
    Ok(())
}
