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

use std::path::{Path,PathBuf};
use odin_common::fs::{absolute_path, find_files_ci};
use odin_common::strings::last_path_component;

use crate::errors::{OziMapError, Result};

/// locate the image a map file refers to. The name is matched case insensitively against the regular
/// files in dir (map files are mostly written on case insensitive file systems)
pub fn find_image_file (dir: impl AsRef<Path>, image_name: &str) -> Result<PathBuf> {
    let name = last_path_component(image_name);
    let mut matches = find_files_ci(dir.as_ref(), name)?;

    match matches.len() {
        0 => Err(OziMapError::ImageNotFound(name.to_string())),
        1 => Ok(absolute_path(matches.remove(0))?),
        _ => Err(OziMapError::AmbiguousImage(name.to_string()))
    }
}
