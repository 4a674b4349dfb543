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

use std::io;
use std::fs;
use std::io::{Read, Write};
use io::ErrorKind::*;
use std::fs::File;
use std::path::{Path,PathBuf};

use crate::macros::{io_error};

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (dir: impl AsRef<Path>) -> io::Result<()> {
    let path = dir.as_ref();

    if path.is_dir() {
        let md = fs::metadata(path)?;
        if md.permissions().readonly() {
            Err(io_error!(PermissionDenied, "output_dir {:?} not writable", path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

/// read the whole contents of a regular file
pub fn file_contents_as_bytes (path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(io_error!(NotFound, "not a regular file {:?}", path))
    }

    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let mut contents = Vec::with_capacity(len as usize);
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

pub fn set_filepath_contents (path: impl AsRef<Path>, new_contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(new_contents)
}

/// return all regular files in dir whose name matches filename ignoring case.
/// Note the result is sorted so that callers get a deterministic order
pub fn find_files_ci (dir: impl AsRef<Path>, filename: &str) -> io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let wanted = filename.to_lowercase();
    let mut matches = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                if name.to_lowercase() == wanted {
                    matches.push(path);
                }
            }
        }
    }

    matches.sort();
    Ok(matches)
}

/// make path absolute (relative to the current dir) without resolving symlinks
pub fn absolute_path (path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// return path relative to base dir if path is inside of base, or the unmodified path otherwise
pub fn relative_to (path: &Path, base: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path.to_path_buf()
    }
}
