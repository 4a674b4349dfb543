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

//! the coordinate transformation capability that converts points between two proj definitions.
//! Geographic coordinates are always passed as (lon,lat) in degrees

use proj4rs::proj::Proj;

use crate::crs::is_latlong;
use crate::errors::{transform_error, Result};
use crate::map::Point;

pub trait CoordTransform {
    fn transform (&self, src_srs: &str, tgt_srs: &str, points: &[Point]) -> Result<Vec<Point>>;

    fn transform_point (&self, src_srs: &str, tgt_srs: &str, p: Point) -> Result<Point> {
        let mut res = self.transform(src_srs, tgt_srs, &[p])?;
        res.pop().ok_or_else(|| transform_error("no point returned"))
    }
}

/// pure Rust transformation based on proj4rs
#[derive(Debug,Default,Clone,Copy)]
pub struct Proj4Transformer;

fn parse_proj (srs: &str) -> Result<Proj> {
    Proj::from_proj_string(srs).map_err(|e| transform_error(format!("invalid definition '{}': {:?}", srs, e)))
}

impl CoordTransform for Proj4Transformer {
    fn transform (&self, src_srs: &str, tgt_srs: &str, points: &[Point]) -> Result<Vec<Point>> {
        if src_srs == tgt_srs {
            return Ok(points.to_vec())
        }

        let src = parse_proj(src_srs)?;
        let tgt = parse_proj(tgt_srs)?;
        let src_is_geo = is_latlong(src_srs);
        let tgt_is_geo = is_latlong(tgt_srs);

        points.iter().map(|p| -> Result<Point> {
            let mut point = if src_is_geo { (p.x.to_radians(), p.y.to_radians(), 0.0) } else { (p.x, p.y, 0.0) };

            proj4rs::transform::transform(&src, &tgt, &mut point)
                .map_err(|e| transform_error(format!("({},{}) from '{}' to '{}': {:?}", p.x, p.y, src_srs, tgt_srs, e)))?;

            if tgt_is_geo {
                Ok(Point::new(point.0.to_degrees(), point.1.to_degrees()))
            } else {
                Ok(Point::new(point.0, point.1))
            }
        }).collect()
    }
}

#[cfg(feature = "gdal")]
pub use gdal_transform::GdalTransformer;

#[cfg(feature = "gdal")]
mod gdal_transform {
    use gdal::spatial_ref::{CoordTransform as OsrTransform, SpatialRef};
    use super::*;

    /// transformation through GDAL/OSR, using traditional GIS (lon,lat) axis order
    #[derive(Debug,Default,Clone,Copy)]
    pub struct GdalTransformer;

    fn spatial_ref (srs: &str) -> Result<SpatialRef> {
        let sr = SpatialRef::from_proj4(srs).map_err(|e| transform_error(format!("invalid definition '{}': {}", srs, e)))?;
        unsafe {
            gdal_sys::OSRSetAxisMappingStrategy(sr.to_c_hsrs(), gdal_sys::OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER);
        }
        Ok(sr)
    }

    impl CoordTransform for GdalTransformer {
        fn transform (&self, src_srs: &str, tgt_srs: &str, points: &[Point]) -> Result<Vec<Point>> {
            if src_srs == tgt_srs {
                return Ok(points.to_vec())
            }

            let src = spatial_ref(src_srs)?;
            let tgt = spatial_ref(tgt_srs)?;
            let ct = OsrTransform::new(&src, &tgt).map_err(transform_error)?;

            let mut xs: Vec<f64> = points.iter().map(|p| p.x).collect();
            let mut ys: Vec<f64> = points.iter().map(|p| p.y).collect();
            let mut zs: Vec<f64> = vec![0.0; points.len()];
            ct.transform_coords(&mut xs, &mut ys, &mut zs).map_err(transform_error)?;

            Ok( xs.into_iter().zip(ys).map(|(x,y)| Point::new(x,y)).collect() )
        }
    }
}
