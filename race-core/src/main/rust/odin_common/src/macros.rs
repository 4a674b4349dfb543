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

/// create a std::io::Error of given kind with a formatted message
///
/// # Examples
/// ```
/// use std::io::ErrorKind::NotFound;
/// let e = odin_common::io_error!(NotFound, "file {} not found", "x.map");
/// assert_eq!(e.to_string(), "file x.map not found");
/// ```
#[macro_export]
macro_rules! io_error {
    ( $kind:expr, $fmt:literal $(, $arg:expr)* ) =>
    {
        std::io::Error::new( $kind, format!($fmt $(,$arg)*))
    }
}
pub use crate::io_error; // preserve 'macros' module across crates
