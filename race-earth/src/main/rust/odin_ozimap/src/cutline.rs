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

use std::str::FromStr;
use serde::{Serialize,Deserialize};
use log::warn;

use crate::crs::SrsPair;
use crate::errors::{config_error, transform_error, OziMapError, Result};
use crate::geotransform::{resolution, GeoTransform};
use crate::map::Point;
use crate::transform::CoordTransform;

/// coordinate space in which a cutline is reported
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum CutlineSpace {
    /// the projected CRS of the map
    Projected,
    /// lon/lat on the datum of the map
    Geographic,
    /// raw image pixels, no CRS
    Pixel,
}

impl FromStr for CutlineSpace {
    type Err = OziMapError;

    fn from_str (s: &str) -> Result<CutlineSpace> {
        match s {
            "projected" | "proj" => Ok(CutlineSpace::Projected),
            "latlon" | "geographic" => Ok(CutlineSpace::Geographic),
            "raw" | "pixel" => Ok(CutlineSpace::Pixel),
            _ => Err(config_error(format!("unknown cutline space '{}'", s)))
        }
    }
}

/// closed ring (first point == last point) and the CRS/units it is expressed in
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Cutline {
    pub points: Vec<Point>,
    /// None for pixel space cutlines
    pub srs: Option<String>,
    pub units_per_pixel: f64,
}

/// Returns None if there are less than 3 points. `points` are lon/lat for projected and geographic
/// targets, or image pixels for the pixel target
pub fn normalize_cutline (points: &[Point], space: CutlineSpace, srs: &SrsPair, gt: &GeoTransform,
                          transformer: &dyn CoordTransform) -> Result<Option<Cutline>> {
    if points.len() < 3 {
        if !points.is_empty() {
            warn!("ignoring cutline with only {} points", points.len());
        }
        return Ok(None)
    }

    let (mut ring, srs, units_per_pixel) = match space {
        CutlineSpace::Projected => {
            let ring = transformer.transform(&srs.geographic, &srs.projected, points)?;
            if ring.len() != points.len() {
                return Err(transform_error(format!("expected {} cutline points, got {}", points.len(), ring.len())))
            }
            (ring, Some(srs.projected.clone()), resolution(gt, None)?)
        }
        CutlineSpace::Geographic => {
            let upp = resolution(gt, Some((transformer, srs.projected.as_str(), srs.geographic.as_str())))?;
            (points.to_vec(), Some(srs.geographic.clone()), upp)
        }
        CutlineSpace::Pixel => (points.to_vec(), None, 1.0)
    };

    ring.push(ring[0]);
    Ok(Some(Cutline { points: ring, srs, units_per_pixel }))
}
