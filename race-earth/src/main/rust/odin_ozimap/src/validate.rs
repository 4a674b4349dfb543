/*
 * Copyright (c) 2024, United States Government, as represented by the
 * Administrator of the National Aeronautics and Space Administration.
 * All rights reserved.
 *
 * The RACE - Runtime for Airspace Concept Evaluation platform is licensed
 * under the Apache License, Version 2.0 (the "License"); you may not use
 * this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! primitive field validators. All of them are pure functions that either return the typed value
//! or a ValidationError carrying the (truncated) offending value and what was expected

use odin_common::strings::{mk_string, truncate_chars};
use crate::errors::ValidationError;

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

const MAX_VALUE_CHARS: usize = 50;

fn validation_error (message: String, value: &str, expected: impl Into<String>) -> ValidationError {
    ValidationError {
        message,
        value: truncate_chars(value, MAX_VALUE_CHARS).to_string(),
        expected: expected.into(),
    }
}

fn trunc (s: &str) -> &str { truncate_chars(s, MAX_VALUE_CHARS) }

/// parse an integer number (the empty string is not a number)
pub fn validate_number (value: &str) -> ValidationResult<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        validation_error(format!("\"{}\" is not a number", trunc(value)), value, "integer number")
    })
}

pub fn validate_float (value: &str) -> ValidationResult<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        validation_error(format!("\"{}\" is not a floating point number", trunc(value)), value, "floating point number")
    })
}

pub fn validate_string_start <'a> (value: &'a str, pattern: &str) -> ValidationResult<&'a str> {
    if value.starts_with(pattern) {
        Ok(value)
    } else {
        Err(validation_error(format!("\"{}\" does not start with \"{}\"", trunc(value), trunc(pattern)), value, pattern))
    }
}

/// check for literal match
pub fn validate_value <'a> (value: &'a str, pattern: &str) -> ValidationResult<&'a str> {
    if value == pattern {
        Ok(value)
    } else {
        Err(validation_error(format!("\"{}\" instead of \"{}\"", trunc(value), trunc(pattern)), value, pattern))
    }
}

/// check for membership in a set of literals
pub fn validate_values <'a> (value: &'a str, patterns: &[&str]) -> ValidationResult<&'a str> {
    if patterns.contains(&value) {
        Ok(value)
    } else {
        let quoted: Vec<String> = patterns.iter().map(|p| format!("\"{}\"", p)).collect();
        let expected = mk_string(quoted.iter(), ", ").unwrap_or_default();
        Err(validation_error(format!("\"{}\" is not one of {}", trunc(value), expected), value, expected))
    }
}

pub fn validate_notempty (value: &str) -> ValidationResult<&str> {
    if value.is_empty() {
        Err(validation_error("String empty".to_string(), value, "non-empty string"))
    } else {
        Ok(value)
    }
}
