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

//! affine pixel -> ground transforms from ground control points.
//!
//! Coefficients follow the GDAL geotransform layout:
//! ```text
//!   gx = c0 + c1*px + c2*py
//!   gy = c3 + c4*px + c5*py
//! ```
//! Two GCPs give an exact axis aligned scale+offset solution, three or more a least squares fit of
//! all six parameters. Inverse transforms are fitted the same way with pixel and ground roles swapped

use serde::{Serialize,Deserialize};
use log::debug;

use crate::errors::{transform_error, OziMapError, Result};
use crate::map::Point;
use crate::transform::CoordTransform;

/// a control point whose ground coordinate is in the common (projected) CRS of the map
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Gcp {
    pub pixel: Point,
    pub ground: Point,
}

impl Gcp {
    pub fn new (pixel: Point, ground: Point) -> Gcp { Gcp { pixel, ground } }

    pub fn swapped (&self) -> Gcp { Gcp { pixel: self.ground, ground: self.pixel } }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoTransform (pub [f64;6]);

impl GeoTransform {
    pub fn coefficients (&self) -> &[f64;6] { &self.0 }

    pub fn apply (&self, p: Point) -> Point {
        let c = &self.0;
        Point::new( c[0] + c[1]*p.x + c[2]*p.y, c[3] + c[4]*p.x + c[5]*p.y)
    }
}

/// forward (pixel -> ground) transform and its separately fitted inverse (ground -> pixel)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct AffineTransform {
    pub forward: GeoTransform,
    pub inverse: GeoTransform,
}

impl AffineTransform {
    pub fn pixel_to_ground (&self, p: Point) -> Point { self.forward.apply(p) }

    pub fn ground_to_pixel (&self, p: Point) -> Point { self.inverse.apply(p) }
}

/// fit forward and inverse transforms for the given GCPs
pub fn fit_affine (gcps: &[Gcp]) -> Result<AffineTransform> {
    let forward = gcps_to_geotransform(gcps)?;
    let swapped: Vec<Gcp> = gcps.iter().map(Gcp::swapped).collect();
    let inverse = gcps_to_geotransform(&swapped)?;

    Ok( AffineTransform { forward, inverse } )
}

pub fn gcps_to_geotransform (gcps: &[Gcp]) -> Result<GeoTransform> {
    match gcps.len() {
        n if n < 2 => Err(OziMapError::InsufficientGcps(n)),
        2 => two_point_geotransform(&gcps[0], &gcps[1]),
        _ => least_squares_geotransform(gcps)
    }
}

fn two_point_geotransform (g0: &Gcp, g1: &Gcp) -> Result<GeoTransform> {
    if g1.pixel.x == g0.pixel.x || g1.pixel.y == g0.pixel.y {
        return Err(OziMapError::DegenerateGcps("2 gcps must not lie on a horizontal or vertical line".to_string()))
    }
    debug!("exact 2 gcp geotransform");

    let mut gt = [0.0f64;6];
    gt[1] = (g1.ground.x - g0.ground.x) / (g1.pixel.x - g0.pixel.x);
    gt[2] = 0.0;
    gt[4] = 0.0;
    gt[5] = (g1.ground.y - g0.ground.y) / (g1.pixel.y - g0.pixel.y);
    gt[0] = g0.ground.x - g0.pixel.x * gt[1] - g0.pixel.y * gt[2];
    gt[3] = g0.ground.y - g0.pixel.x * gt[4] - g0.pixel.y * gt[5];

    Ok(GeoTransform(gt))
}

/// closed form normal equation solution over the accumulated moment sums. The evaluation order is
/// fixed so that results are reproducible for identical input order
fn least_squares_geotransform (gcps: &[Gcp]) -> Result<GeoTransform> {
    let n = gcps.len() as f64;

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    let mut sum_gx = 0.0;
    let mut sum_gx_x = 0.0;
    let mut sum_gx_y = 0.0;
    let mut sum_gy = 0.0;
    let mut sum_gy_x = 0.0;
    let mut sum_gy_y = 0.0;

    for gcp in gcps {
        let (x, y) = (gcp.pixel.x, gcp.pixel.y);
        let (gx, gy) = (gcp.ground.x, gcp.ground.y);

        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
        sum_yy += y * y;
        sum_gx += gx;
        sum_gx_x += gx * x;
        sum_gx_y += gx * y;
        sum_gy += gy;
        sum_gy_x += gy * x;
        sum_gy_y += gy * y;
    }

    let divisor = n * (sum_xx * sum_yy - sum_xy * sum_xy)
        + 2.0 * sum_x * sum_y * sum_xy - sum_y * sum_y * sum_xx - sum_x * sum_x * sum_yy;

    if divisor == 0.0 {
        return Err(OziMapError::DegenerateGcps(format!("{} gcps are collinear", gcps.len())))
    }
    debug!("least squares geotransform for {} gcps", gcps.len());

    // cofactors shared by both ground axes
    let a0 = sum_xx * sum_yy - sum_xy * sum_xy;
    let a1 = sum_y * sum_xy - sum_x * sum_yy;
    let a2 = sum_x * sum_xy - sum_y * sum_xx;
    let b1 = n * sum_yy - sum_y * sum_y;
    let b2 = sum_x * sum_y - sum_xy * n;
    let c1 = sum_x * sum_y - n * sum_xy;
    let c2 = n * sum_xx - sum_x * sum_x;

    let mut gt = [0.0f64;6];
    gt[0] = (sum_gx * a0 + sum_gx_x * a1 + sum_gx_y * a2) / divisor;
    gt[3] = (sum_gy * a0 + sum_gy_x * a1 + sum_gy_y * a2) / divisor;
    gt[1] = (sum_gx * a1 + sum_gx_x * b1 + sum_gx_y * b2) / divisor;
    gt[2] = (sum_gx * a2 + sum_gx_x * c1 + sum_gx_y * c2) / divisor;
    gt[4] = (sum_gy * a1 + sum_gy_x * b1 + sum_gy_y * b2) / divisor;
    gt[5] = (sum_gy * a2 + sum_gy_x * c1 + sum_gy_y * c2) / divisor;

    Ok(GeoTransform(gt))
}

/// ground units per pixel: the larger of the ground distances covered by a one pixel step in x and in y.
/// If a conversion is given, the three sample points are transformed into the target CRS first
pub fn resolution (gt: &GeoTransform, conversion: Option<(&dyn CoordTransform, &str, &str)>) -> Result<f64> {
    let mut pts = vec![
        gt.apply( Point::new(0.0, 0.0)),
        gt.apply( Point::new(1.0, 0.0)),
        gt.apply( Point::new(0.0, 1.0)),
    ];

    if let Some((transformer, src_srs, tgt_srs)) = conversion {
        pts = transformer.transform(src_srs, tgt_srs, &pts)?;
        if pts.len() != 3 {
            return Err(transform_error(format!("expected 3 points from '{}' to '{}', got {}", src_srs, tgt_srs, pts.len())))
        }
    }

    let dx = pts[0].distance(&pts[1]);
    let dy = pts[0].distance(&pts[2]);
    Ok(dx.max(dy))
}
