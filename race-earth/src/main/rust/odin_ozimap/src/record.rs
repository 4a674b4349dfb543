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
use serde::{Serialize,Deserialize};
use log::info;
use odin_common::fs::{absolute_path, relative_to, set_filepath_contents};

use crate::crs::SrsPair;
use crate::cutline::Cutline;
use crate::errors::Result;
use crate::geotransform::{AffineTransform, Gcp};
use crate::map::Projection;

/// the georeferencing of one map image, assembled from a map file
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct GeoreferencingRecord {
    pub image_path: PathBuf,
    pub title: String,
    /// short datum id
    pub datum: String,
    pub projection: Projection,
    pub srs: SrsPair,
    /// ground coordinates are in srs.projected
    pub gcps: Vec<Gcp>,
    pub transform: AffineTransform,
    pub units_per_pixel: f64,
    pub cutline: Option<Cutline>,
}

/// write record as RON. If relative_image_path is set and the image is in (or below) the directory of
/// the record file, the image path is stored relative to it
pub fn write_record (record: &GeoreferencingRecord, pathname: impl AsRef<Path>, relative_image_path: bool) -> Result<()> {
    let path = absolute_path(pathname.as_ref())?;

    let mut rec = record.clone();
    if relative_image_path {
        if let Some(dir) = path.parent() {
            rec.image_path = relative_to(&record.image_path, dir);
        }
    }

    let pretty_config = ron::ser::PrettyConfig::default().struct_names(true);
    let serialized = ron::ser::to_string_pretty(&rec, pretty_config)?;
    set_filepath_contents(&path, serialized.as_bytes())?;

    info!("record for {} written to {}", rec.image_path.display(), path.display());
    Ok(())
}
