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

//! Typed values read from token text.
//!
//! # Numeric validation
//!
//! Numbers are checked character by character before they are parsed: the
//! first character must be a digit or `-`, the rest digits (integers) or
//! digits and `.` (floating point). No exponents, no leading `+`.
//!
//! After parsing, three rules treat suspicious results as failures:
//!
//! - a value equal to the type's maximum (or, for signed types, minimum) is
//!   taken as an overflow signal;
//! - text other than a literal zero that parses to zero is rejected, so
//!   `00` and `0.00` fail while `0` passes (floating point also accepts
//!   `0.0`, `-0` and `-0.0`);
//! - out-of-range and non-finite values fail.
//!
//! The zero rule rejects some well-formed input such as `0.00`.
//!
//! `i64` is exempt from the max/min and zero rules and only needs to fit.

use crate::error::{LoadError, LoadResult};

/// A value that can be read from a single token.
pub trait Datum: Sized {
    /// Human-readable type name used in error messages.
    const DESCRIPTION: &'static str;

    /// Convert token data into a value.
    fn from_token(text: &str) -> LoadResult<Self>;
}

/// Zero spellings accepted by floating-point reads.
const FLOAT_ZERO_LITERALS: [&str; 4] = ["0", "0.0", "-0", "-0.0"];

fn check_numeric_chars(text: &str, allow_point: bool, description: &str) -> LoadResult<()> {
    let mut chars = text.chars();
    let first_ok = chars
        .next()
        .map_or(false, |c| c.is_ascii_digit() || c == '-');
    let rest_ok = chars.all(|c| c.is_ascii_digit() || (allow_point && c == '.'));
    if first_ok && rest_ok {
        Ok(())
    } else {
        Err(LoadError::numeric(format!(
            "'{}' is not a valid {}",
            text, description
        )))
    }
}

macro_rules! impl_integer_datum {
    ($($ty:ty => $description:literal, signed: $signed:literal);* $(;)?) => {
        $(
            impl Datum for $ty {
                const DESCRIPTION: &'static str = $description;

                fn from_token(text: &str) -> LoadResult<Self> {
                    check_numeric_chars(text, false, Self::DESCRIPTION)?;
                    let value: i128 = text.parse().map_err(|_| {
                        LoadError::numeric(format!("'{}' is not a valid {}", text, Self::DESCRIPTION))
                    })?;

                    if value > <$ty>::MAX as i128 || value < <$ty>::MIN as i128 {
                        return Err(LoadError::numeric(format!(
                            "'{}' is out of range for {}",
                            text,
                            Self::DESCRIPTION
                        )));
                    }
                    if value == <$ty>::MAX as i128 || ($signed && value == <$ty>::MIN as i128) {
                        return Err(LoadError::numeric(format!(
                            "'{}' is at the limit of {} and treated as overflow",
                            text,
                            Self::DESCRIPTION
                        )));
                    }
                    if value == 0 && text != "0" {
                        return Err(LoadError::numeric(format!(
                            "'{}' converts to zero but is not a zero literal",
                            text
                        )));
                    }

                    Ok(value as $ty)
                }
            }
        )*
    };
}

impl_integer_datum! {
    i16 => "short integer", signed: true;
    u16 => "unsigned short integer", signed: false;
    i32 => "integer", signed: true;
    u32 => "unsigned integer", signed: false;
    u64 => "unsigned long integer", signed: false;
}

impl Datum for i64 {
    const DESCRIPTION: &'static str = "long integer";

    fn from_token(text: &str) -> LoadResult<Self> {
        check_numeric_chars(text, false, Self::DESCRIPTION)?;
        text.parse().map_err(|_| {
            LoadError::numeric(format!("'{}' is not a valid {}", text, Self::DESCRIPTION))
        })
    }
}

impl Datum for f64 {
    const DESCRIPTION: &'static str = "number";

    fn from_token(text: &str) -> LoadResult<Self> {
        check_numeric_chars(text, true, Self::DESCRIPTION)?;
        let value: f64 = text.parse().map_err(|_| {
            LoadError::numeric(format!("'{}' is not a valid {}", text, Self::DESCRIPTION))
        })?;

        if value == 0.0 && !FLOAT_ZERO_LITERALS.contains(&text) {
            return Err(LoadError::numeric(format!(
                "'{}' converts to zero but is not a zero literal",
                text
            )));
        }
        if !value.is_finite() || value == f64::MAX || value == f64::MIN {
            return Err(LoadError::numeric(format!(
                "'{}' is out of range for {}",
                text,
                Self::DESCRIPTION
            )));
        }
        Ok(value)
    }
}

impl Datum for f32 {
    const DESCRIPTION: &'static str = "single precision number";

    fn from_token(text: &str) -> LoadResult<Self> {
        let value = f64::from_token(text)?;
        let out_of_range = value.abs() >= f64::from(f32::MAX);
        if out_of_range {
            return Err(LoadError::numeric(format!(
                "'{}' is out of range for {}",
                text,
                Self::DESCRIPTION
            )));
        }
        let narrowed = value as f32;
        if narrowed == 0.0 && value != 0.0 {
            return Err(LoadError::numeric(format!(
                "'{}' converts to zero but is not a zero literal",
                text
            )));
        }
        Ok(narrowed)
    }
}

impl Datum for bool {
    const DESCRIPTION: &'static str = "boolean";

    fn from_token(text: &str) -> LoadResult<Self> {
        match text {
            "yes" | "true" | "1" => Ok(true),
            "no" | "false" | "0" => Ok(false),
            _ => Err(LoadError::boolean(format!(
                "'{}' is not one of yes, no, true, false, 0, 1",
                text
            ))),
        }
    }
}

impl Datum for String {
    const DESCRIPTION: &'static str = "string";

    fn from_token(text: &str) -> LoadResult<Self> {
        Ok(text.to_string())
    }
}
