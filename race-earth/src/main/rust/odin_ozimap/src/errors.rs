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

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OziMapError>;

#[derive(Error,Debug)]
pub enum OziMapError {
    #[error("{0}")]
    Format( #[from] FormatError),

    #[error("unsupported datum or projection: '{0}'")]
    UnsupportedCrs(String),

    #[error("projection parameters not fully defined: '{projection}' requires {param}")]
    MissingProjectionParameter { projection: String, param: &'static str },

    #[error("at least 2 gcps are required, got {0}")]
    InsufficientGcps(usize),

    #[error("cannot compute geotransform: {0}")]
    DegenerateGcps(String),

    #[error("image \"{0}\" not found")]
    ImageNotFound(String),

    #[error("ambiguous image file name \"{0}\"")]
    AmbiguousImage(String),

    #[error("coordinate transformation failed: {0}")]
    Transform(String),

    #[error("config error {0}")]
    ConfigError(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("RON error {0}")]
    RonError( #[from] ron::Error),
}

/// field level validation failure. The offending value is truncated to 50 chars
#[derive(Error,Debug,Clone,PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub value: String,
    pub expected: String,
}

/// structural or field level error in a map file, with positional context fragments in outer-to-inner order
#[derive(Debug,Clone,PartialEq)]
pub struct FormatError {
    messages: Vec<String>,
}

impl FormatError {
    pub fn new (msg: impl Into<String>) -> FormatError {
        FormatError { messages: vec![msg.into()] }
    }

    /// prepend an outer context fragment
    pub fn within (mut self, context: impl Into<String>) -> FormatError {
        self.messages.insert(0, context.into());
        self
    }

    pub fn messages (&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for FormatError {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in map file")?;
        for msg in &self.messages {
            write!(f, ": {}", msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormatError {}

impl From<ValidationError> for FormatError {
    fn from (e: ValidationError) -> FormatError {
        FormatError::new(e.message)
    }
}

/// run f within a positional context. Validation and nested format errors raised by f are
/// annotated with the context label and surface as a single FormatError
pub fn with_context <T,E,F> (context: &str, f: F) -> std::result::Result<T,FormatError>
    where E: Into<FormatError>, F: FnOnce() -> std::result::Result<T,E>
{
    f().map_err(|e| e.into().within(context))
}

pub fn config_error (msg: impl ToString) -> OziMapError {
    OziMapError::ConfigError(msg.to_string())
}

pub fn transform_error (msg: impl ToString) -> OziMapError {
    OziMapError::Transform(msg.to_string())
}
