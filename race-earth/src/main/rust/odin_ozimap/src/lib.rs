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

//! conversion of OziExplorer map files into georeferencing records: reading and validating the fixed
//! line format, resolving datum/projection names into proj definitions, fitting affine pixel/ground
//! transforms from ground control points and normalizing the optional cutline polygon

pub mod errors;
pub mod validate;
pub mod map;
pub mod reader;
pub mod config;
pub mod crs;
pub mod transform;
pub mod geotransform;
pub mod cutline;
pub mod image;
pub mod record;

use std::path::Path;
use log::{debug,info};
use odin_common::fs::file_contents_as_bytes;

use crate::config::OziMapConfig;
use crate::crs::{CrsResolver, SrsPair};
use crate::cutline::{normalize_cutline, CutlineSpace};
use crate::errors::Result;
use crate::geotransform::{fit_affine, resolution, Gcp};
use crate::image::find_image_file;
use crate::map::{RawGcp, RawMap};
use crate::reader::read_map_bytes;
use crate::record::GeoreferencingRecord;
use crate::transform::CoordTransform;

pub use crate::errors::{OziMapError, FormatError, ValidationError};
pub use crate::map::Point;

/// bring all GCP ground coordinates into the projected CRS of the map
pub fn convert_gcps (raw_gcps: &[RawGcp], srs: &SrsPair, transformer: &dyn CoordTransform) -> Result<Vec<Gcp>> {
    raw_gcps.iter().map(|raw| -> Result<Gcp> {
        let ground = if raw.ground.is_projected() {
            raw.ground.point()
        } else {
            transformer.transform_point(&srs.geographic, &srs.projected, raw.ground.point())?
        };
        Ok(Gcp::new(raw.pixel, ground))
    }).collect()
}

/// the conversion pipeline. Holds no mutable state, i.e. the same converter can be used for any
/// number of map files
pub struct OziMapConverter<'a> {
    config: &'a OziMapConfig,
    resolver: CrsResolver<'a>,
    transformer: &'a dyn CoordTransform,
}

impl <'a> OziMapConverter<'a> {
    pub fn new (config: &'a OziMapConfig, transformer: &'a dyn CoordTransform) -> OziMapConverter<'a> {
        OziMapConverter { config, resolver: CrsResolver::new(config), transformer }
    }

    pub fn resolver (&self) -> &CrsResolver<'a> { &self.resolver }

    /// convert a map file. The image it refers to has to be in the same directory.
    /// If cutline is None no cutline is computed
    pub fn convert_file (&self, map_path: impl AsRef<Path>, cutline: Option<CutlineSpace>) -> Result<GeoreferencingRecord> {
        let map_path = map_path.as_ref();
        debug!("reading {}", map_path.display());

        let data = file_contents_as_bytes(map_path)?;
        let raw = read_map_bytes(&data, self.config.encoding()?)?;

        let dir = match map_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new(".")
        };
        let image_path = find_image_file(dir, &raw.file_name)?;

        let record = self.build_record(&raw, image_path, cutline)?;
        info!("converted {}: {} gcps, {:.3} units/pixel", map_path.display(), record.gcps.len(), record.units_per_pixel);
        Ok(record)
    }

    pub fn build_record (&self, raw: &RawMap, image_path: std::path::PathBuf, cutline: Option<CutlineSpace>) -> Result<GeoreferencingRecord> {
        let srs = self.resolver.resolve_crs(&raw.datum, &raw.projection)?;
        let datum = self.resolver.datum_id(&raw.datum)?.to_string();

        let gcps = convert_gcps(&raw.gcps, &srs, self.transformer)?;
        let transform = fit_affine(&gcps)?;
        let units_per_pixel = resolution(&transform.forward, None)?;

        let cutline = match cutline {
            Some(space) => {
                let points = if space == CutlineSpace::Pixel { &raw.cutline_pixels } else { &raw.cutline };
                normalize_cutline(points, space, &srs, &transform.forward, self.transformer)?
            }
            None => None
        };

        Ok( GeoreferencingRecord {
            image_path,
            title: raw.title.clone(),
            datum,
            projection: raw.projection.clone(),
            srs,
            gcps,
            transform,
            units_per_pixel,
            cutline,
        })
    }
}
