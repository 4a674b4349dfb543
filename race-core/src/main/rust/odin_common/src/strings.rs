/*
 * Copyright (c) 2023, United States Government, as represented by the
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

use std::fmt;
use std::fmt::{Display,Write};

/// stringify iterator for Display elements with given delimiter without per-element allocation
pub fn mk_string<T: Display> (it: std::slice::Iter<'_,T>, delim: &str) -> Result<String,fmt::Error> {
    let mut s = String::new();

    for e in it {
        if !s.is_empty() { s.push_str(delim); }
        write!(s,"{}",e)?
    }
    Ok(s)
}

/// split a str with char separated values into whitespace trimmed fields. If there are less than
/// `min_len` fields the result is padded with empty strings, i.e. missing trailing fields are not an error
pub fn padded_fields (s: &str, delim: char, min_len: usize) -> Vec<&str> {
    let mut fields: Vec<&str> = s.split(delim).map(|x| x.trim()).collect();
    if fields.len() < min_len {
        fields.resize(min_len, "");
    }
    fields
}

/// return the prefix of s that has at most max_chars chars (never splits a multi-byte char)
pub fn truncate_chars (s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx,_)) => &s[..idx],
        None => s
    }
}

/// split text into lines at "\r\n", "\n" or a bare "\r". A trailing line break does not produce an
/// empty last line
pub fn split_lines (s: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = s;

    while !rest.is_empty() {
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let len = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx+len..];
            }
            None => {
                lines.push(rest);
                break
            }
        }
    }
    lines
}

/// strip space, tab, CR and LF from both ends of a line
pub fn trim_line (s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t' || c == '\r' || c == '\n')
}

/// return the last path component of a pathname that might use either '/' or '\' as separator
pub fn last_path_component (s: &str) -> &str {
    s.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(s)
}
