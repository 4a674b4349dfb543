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

//! the lookup tables that map OziExplorer datum and projection names to proj definitions. They are
//! plain data, built once (either from defaults or a RON file) and passed by reference

use std::path::Path;
use std::io::Read;
use std::fs::File;
use encoding_rs::Encoding;
use serde::{Serialize,Deserialize};

use crate::cutline::CutlineSpace;
use crate::errors::{config_error, OziMapError, Result};
use crate::map::{ProjParam, LATLONG_PROJECTION};

pub const WGS84_PROJ4: &str = "+datum=WGS84";
pub const SK42_PROJ4: &str = "+ellps=krass +towgs84=23.9,-141.3,-80.9,0,-0.37,-0.85,-0.12 +no_defs";

/// a datum definition and the OziExplorer names that refer to it
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct DatumDef {
    /// short datum identifier
    pub id: String,
    pub proj4: String,
    pub names: Vec<String>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ParamDef {
    /// proj key prefix such as "+lat_0="
    pub key: String,
    pub param: ProjParam,
    pub required: bool,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ProjectionDef {
    pub name: String,
    /// base fragment that is emitted before the parameters
    pub proj4: String,
    pub params: Vec<ParamDef>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct OziMapConfig {
    pub datums: Vec<DatumDef>,
    pub projections: Vec<ProjectionDef>,
    /// single byte code page label for title and image file name lines
    pub encoding: String,
    pub cutline: CutlineSpace,
}

fn param (key: &str, param: ProjParam, required: bool) -> ParamDef {
    ParamDef { key: key.to_string(), param, required }
}

fn datum (id: &str, proj4: &str, names: &[&str]) -> DatumDef {
    DatumDef { id: id.to_string(), proj4: proj4.to_string(), names: names.iter().map(|s| s.to_string()).collect() }
}

impl Default for OziMapConfig {
    fn default() -> Self {
        use ProjParam::*;

        OziMapConfig {
            datums: vec![
                datum("wgs84", WGS84_PROJ4, &["WGS 84"]),
                datum("sk42", SK42_PROJ4, &["Pulkovo 1942 (1)", "Pulkovo 1942 (2)", "Pulkovo 1942"]),
            ],
            projections: vec![
                ProjectionDef {
                    name: LATLONG_PROJECTION.to_string(),
                    proj4: "+proj=latlong".to_string(),
                    params: vec![]
                },
                ProjectionDef {
                    name: "Transverse Mercator".to_string(),
                    proj4: "+proj=tmerc +units=m".to_string(),
                    params: vec![
                        param("+lat_0=", LatOrigin, true),
                        param("+lon_0=", LonOrigin, true),
                        param("+k=", KFactor, true),
                        param("+x_0=", FalseEasting, true),
                        param("+y_0=", FalseNorthing, true),
                    ]
                },
                ProjectionDef {
                    name: "Lambert Conformal Conic".to_string(),
                    proj4: "+proj=lcc +units=m".to_string(),
                    params: vec![
                        param("+lat_0=", LatOrigin, true),
                        param("+lon_0=", LonOrigin, true),
                        param("+lat_1=", Lat1, true),
                        param("+lat_2=", Lat2, true),
                        param("+x_0=", FalseEasting, false),
                        param("+y_0=", FalseNorthing, false),
                    ]
                },
                ProjectionDef {
                    name: "Mercator".to_string(),
                    proj4: "+proj=merc".to_string(),
                    params: vec![
                        param("+lon_0=", LonOrigin, true),
                        param("+k=", KFactor, true),
                        param("+x_0=", FalseEasting, true),
                        param("+y_0=", FalseNorthing, true),
                    ]
                },
            ],
            encoding: "windows-1251".to_string(),
            cutline: CutlineSpace::Geographic,
        }
    }
}

impl OziMapConfig {
    pub fn encoding (&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.encoding.as_bytes())
            .ok_or_else(|| config_error(format!("unknown encoding '{}'", self.encoding)))
    }
}

pub fn load_config (pathname: impl AsRef<Path>) -> Result<OziMapConfig> {
    let path = pathname.as_ref();
    if !path.is_file() {
        Err( config_error(format!("config file not found: {}", path.display())) )
    } else {
        let mut file = File::open(path)?;

        let len = file.metadata()?.len();
        let mut contents = String::with_capacity(len as usize);
        file.read_to_string(&mut contents)?;

        ron::from_str::<OziMapConfig>(contents.as_str()).map_err(|e| config_error(format!("config parse error {}", e)))
    }
}

pub fn store_config (conf: &OziMapConfig, pathname: impl AsRef<Path>) -> Result<()> {
    let pretty_config = ron::ser::PrettyConfig::default().struct_names(true);
    let serialized = ron::ser::to_string_pretty(conf, pretty_config)?;
    odin_common::fs::set_filepath_contents(pathname, serialized.as_bytes()).map_err(OziMapError::from)
}
