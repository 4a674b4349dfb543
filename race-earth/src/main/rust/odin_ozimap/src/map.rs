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

use serde::{Serialize,Deserialize};

/// name of the purely geographic projection (no projection parameters)
pub const LATLONG_PROJECTION: &str = "Latitude/Longitude";

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new (x: f64, y: f64) -> Point { Point { x, y } }

    pub fn distance (&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// the optional numeric projection parameters of a map file, in the order in which they appear
/// on the "Projection Setup" line
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjParam {
    LatOrigin,
    LonOrigin,
    KFactor,
    FalseEasting,
    FalseNorthing,
    Lat1,
    Lat2,
    Height,
}

impl ProjParam {
    pub const ALL: [ProjParam;8] = [
        ProjParam::LatOrigin, ProjParam::LonOrigin, ProjParam::KFactor, ProjParam::FalseEasting,
        ProjParam::FalseNorthing, ProjParam::Lat1, ProjParam::Lat2, ProjParam::Height
    ];

    pub fn name (&self) -> &'static str {
        match self {
            ProjParam::LatOrigin => "lat_origin",
            ProjParam::LonOrigin => "lon_origin",
            ProjParam::KFactor => "k_factor",
            ProjParam::FalseEasting => "false_easting",
            ProjParam::FalseNorthing => "false_northing",
            ProjParam::Lat1 => "lat1",
            ProjParam::Lat2 => "lat2",
            ProjParam::Height => "height",
        }
    }
}

/// projection name plus the sparse set of parameters that were present in the map file
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct Projection {
    pub name: String,
    pub lat_origin: Option<f64>,
    pub lon_origin: Option<f64>,
    pub k_factor: Option<f64>,
    pub false_easting: Option<f64>,
    pub false_northing: Option<f64>,
    pub lat1: Option<f64>,
    pub lat2: Option<f64>,
    pub height: Option<f64>,
}

impl Projection {
    pub fn new (name: impl Into<String>) -> Projection {
        Projection { name: name.into(), ..Default::default() }
    }

    pub fn param (&self, p: ProjParam) -> Option<f64> {
        match p {
            ProjParam::LatOrigin => self.lat_origin,
            ProjParam::LonOrigin => self.lon_origin,
            ProjParam::KFactor => self.k_factor,
            ProjParam::FalseEasting => self.false_easting,
            ProjParam::FalseNorthing => self.false_northing,
            ProjParam::Lat1 => self.lat1,
            ProjParam::Lat2 => self.lat2,
            ProjParam::Height => self.height,
        }
    }

    pub fn set_param (&mut self, p: ProjParam, v: f64) {
        let slot = match p {
            ProjParam::LatOrigin => &mut self.lat_origin,
            ProjParam::LonOrigin => &mut self.lon_origin,
            ProjParam::KFactor => &mut self.k_factor,
            ProjParam::FalseEasting => &mut self.false_easting,
            ProjParam::FalseNorthing => &mut self.false_northing,
            ProjParam::Lat1 => &mut self.lat1,
            ProjParam::Lat2 => &mut self.lat2,
            ProjParam::Height => &mut self.height,
        };
        *slot = Some(v);
    }

    /// the geographic counterpart that shares the datum, with all parameters dropped
    pub fn to_latlong (&self) -> Projection {
        Projection::new(LATLONG_PROJECTION)
    }
}

/// ground coordinate of a GCP in whichever space the map file specified it
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum GroundRef {
    /// longitude (x) and latitude (y) in signed decimal degrees
    Geographic(Point),
    /// grid coordinates in linear units, with optional UTM style zone
    Projected { point: Point, zone: Option<i64> },
}

impl GroundRef {
    pub fn point (&self) -> Point {
        match self {
            GroundRef::Geographic(p) => *p,
            GroundRef::Projected { point, .. } => *point,
        }
    }

    pub fn is_projected (&self) -> bool {
        matches!(self, GroundRef::Projected{..})
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct RawGcp {
    pub pixel: Point,
    pub ground: GroundRef,
}

/// the structured contents of a map file as read, before any CRS resolution
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RawMap {
    pub title: String,
    pub file_name: String,
    pub datum: String,
    pub projection: Projection,
    pub gcps: Vec<RawGcp>,
    /// lon/lat cutline points from MMPLL lines
    pub cutline: Vec<Point>,
    /// pixel cutline points from MMPXY lines
    pub cutline_pixels: Vec<Point>,
}
