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

use std::collections::HashMap;
use serde::{Serialize,Deserialize};
use log::debug;

use crate::config::{DatumDef, OziMapConfig, ProjectionDef};
use crate::errors::{OziMapError, Result};
use crate::map::Projection;

/// the full (projected) CRS of a map and its purely geographic counterpart on the same datum
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SrsPair {
    pub projected: String,
    pub geographic: String,
}

/// maps datum and projection names to proj definition strings. The configured tables are the only
/// extension point, new projection families are added there
pub struct CrsResolver<'a> {
    datums: HashMap<&'a str, &'a DatumDef>,
    projections: HashMap<&'a str, &'a ProjectionDef>,
}

impl <'a> CrsResolver<'a> {
    pub fn new (config: &'a OziMapConfig) -> CrsResolver<'a> {
        let mut datums = HashMap::new();
        for def in &config.datums {
            for name in &def.names {
                datums.insert(name.as_str(), def);
            }
        }

        let projections = config.projections.iter().map(|def| (def.name.as_str(), def)).collect();

        CrsResolver { datums, projections }
    }

    fn datum (&self, datum_name: &str) -> Result<&'a DatumDef> {
        self.datums.get(datum_name).copied().ok_or_else(|| OziMapError::UnsupportedCrs(datum_name.to_string()))
    }

    /// short identifier of the datum (e.g. "wgs84")
    pub fn datum_id (&self, datum_name: &str) -> Result<&'a str> {
        Ok(self.datum(datum_name)?.id.as_str())
    }

    /// datum fragment, base projection fragment and the fragments of all parameters present in the
    /// projection record, space separated in table order
    pub fn srs_string (&self, datum_name: &str, projection: &Projection) -> Result<String> {
        let datum = self.datum(datum_name)?;
        let proj_def = self.projections.get(projection.name.as_str())
            .ok_or_else(|| OziMapError::UnsupportedCrs(projection.name.clone()))?;

        let mut srs = vec![ datum.proj4.clone(), proj_def.proj4.clone() ];
        for param_def in &proj_def.params {
            match projection.param(param_def.param) {
                Some(v) => srs.push(format!("{}{}", param_def.key, v)),
                None => if param_def.required {
                    return Err(OziMapError::MissingProjectionParameter {
                        projection: projection.name.clone(),
                        param: param_def.param.name()
                    })
                }
            }
        }

        Ok(srs.join(" "))
    }

    pub fn resolve_crs (&self, datum_name: &str, projection: &Projection) -> Result<SrsPair> {
        let projected = self.srs_string(datum_name, projection)?;
        let geographic = self.srs_string(datum_name, &projection.to_latlong())?;
        debug!("resolved '{}'/'{}' to '{}'", datum_name, projection.name, projected);

        Ok(SrsPair { projected, geographic })
    }
}

/// does a proj definition describe a geographic (degree based) CRS
pub fn is_latlong (proj4: &str) -> bool {
    proj4.split_whitespace().any(|t| {
        matches!(t, "+proj=latlong" | "+proj=longlat" | "+proj=latlon" | "+proj=lonlat")
    })
}
