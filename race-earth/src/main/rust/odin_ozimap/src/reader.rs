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

//! reader for the fixed line layout of OziExplorer map files. Fields are bound by line position,
//! every validation is done within a "line N" context so that errors report where they occurred

use std::io::Read;
use encoding_rs::Encoding;
use log::{debug,warn};
use odin_common::strings::{padded_fields, split_lines, trim_line, last_path_component};

use crate::errors::{FormatError, Result, with_context};
use crate::map::{GroundRef, Point, ProjParam, Projection, RawGcp, RawMap};
use crate::validate::*;

pub const SIGNATURE: &str = "OziExplorer Map Data File Version 2.";

const N_GCP_SLOTS: usize = 30;
const GCP_FIELDS: usize = 17;
const PROJ_SETUP_LINE: usize = 40;
const PROJ_SETUP_FIELDS: usize = 10;
const CUTLINE_FIELDS: usize = 4;

type FormatResult<T> = std::result::Result<T, FormatError>;

/// line access by 1-based line number. Running out of lines means the document is truncated
struct Lines<'a> (Vec<&'a str>);

impl <'a> Lines<'a> {
    fn line (&self, line_no: usize) -> FormatResult<&'a str> {
        self.0.get(line_no - 1).copied().ok_or_else(|| FormatError::new("Document too short"))
    }

    fn fields (&self, line_no: usize, min_len: usize) -> FormatResult<Vec<&'a str>> {
        Ok(padded_fields(self.line(line_no)?, ',', min_len))
    }
}

/// read a map file from a stream, decoding title and image file name with the given single byte code page
pub fn read_map_from <R: Read> (mut reader: R, encoding: &'static Encoding) -> Result<RawMap> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(read_map_bytes(&buf, encoding)?)
}

pub fn read_map_bytes (data: &[u8], encoding: &'static Encoding) -> FormatResult<RawMap> {
    // all lines except title and file name are ASCII, which every supported code page maps to itself
    let (text, had_errors) = encoding.decode_without_bom_handling(data);
    if had_errors {
        warn!("map file contains characters that are not valid {}", encoding.name());
    }
    read_map(&text)
}

pub fn read_map (text: &str) -> FormatResult<RawMap> {
    let lines = Lines( split_lines(text).into_iter().map(trim_line).collect());
    if lines.0.is_empty() {
        return Err(FormatError::new("Document empty"))
    }

    let first = lines.line(1)?;
    with_context("line 1", || validate_string_start(first, SIGNATURE))?;

    let title = lines.line(2)?.to_string();
    let file_name = last_path_component(lines.line(3)?).to_string();

    let datum_fields = lines.fields(5, 1)?;
    let datum = with_context("line 5, datum name", || validate_notempty(datum_fields[0]))?.to_string();

    let projection = read_projection(&lines)?;
    let gcps = read_gcps(&lines)?;
    let (cutline, cutline_pixels) = read_cutline(&lines)?;

    debug!("read map '{}' for image {}: datum '{}', projection '{}', {} gcps, {} cutline points",
           title, file_name, datum, projection.name, gcps.len(), cutline.len());

    Ok( RawMap { title, file_name, datum, projection, gcps, cutline, cutline_pixels } )
}

fn read_projection (lines: &Lines) -> FormatResult<Projection> {
    let name_fields = lines.fields(9, 2)?;
    with_context("line 9", || validate_value(name_fields[0], "Map Projection"))?;
    let name = with_context("line 9, projection name", || validate_notempty(name_fields[1]))?;
    let mut projection = Projection::new(name);

    let setup = lines.fields(PROJ_SETUP_LINE, PROJ_SETUP_FIELDS)?;
    with_context(&format!("line {}", PROJ_SETUP_LINE), || {
        validate_value(setup[0], "Projection Setup")?;
        for (i, param) in ProjParam::ALL.iter().enumerate() {
            let value = setup[i+1];
            if !value.is_empty() {
                projection.set_param(*param, validate_float(value)?);
            }
        }
        Ok::<_,FormatError>(())
    })?;

    Ok(projection)
}

fn read_gcps (lines: &Lines) -> FormatResult<Vec<RawGcp>> {
    let mut gcps = Vec::new();

    for slot in 1..=N_GCP_SLOTS {
        let line_no = slot + 9;
        if lines.line(line_no)?.is_empty() {
            continue
        }

        let fields = lines.fields(line_no, GCP_FIELDS)?;
        if let Some(gcp) = with_context(&format!("line {}", line_no), || read_gcp(slot, &fields))? {
            gcps.push(gcp);
        }
    }

    Ok(gcps)
}

/// parse a single "PointNN" line. Returns None for excluded or pixel-less slots
fn read_gcp (slot: usize, f: &[&str]) -> FormatResult<Option<RawGcp>> {
    validate_value(f[0], &format!("Point{:02}", slot))?;
    validate_value(f[1], "xy")?;
    validate_value(f[5], "deg")?;
    validate_value(f[12], "grid")?;
    validate_values(f[4], &["in", "ex"])?;

    if f[4] != "in" || f[2].is_empty() || f[3].is_empty() {
        return Ok(None)
    }

    let pixel = Point::new( validate_number(f[2])? as f64, validate_number(f[3])? as f64);

    let ground = if !f[6].is_empty() && !f[7].is_empty() && !f[9].is_empty() && !f[10].is_empty() {
        validate_values(f[8], &["S", "N"])?;
        validate_values(f[11], &["W", "E"])?;

        let mut lon = validate_number(f[9])? as f64 + validate_float(f[10])? / 60.0;
        let mut lat = validate_number(f[6])? as f64 + validate_float(f[7])? / 60.0;
        if f[11] == "W" { lon = -lon }
        if f[8] == "S" { lat = -lat }
        GroundRef::Geographic( Point::new(lon, lat))

    } else if !f[14].is_empty() && !f[15].is_empty() {
        validate_values(f[16], &["N", "S"])?;

        let x = validate_float(f[14])?;
        let mut y = validate_float(f[15])?;
        if f[16] == "S" { y = -y }
        let zone = if f[13].is_empty() { None } else { Some(validate_number(f[13])?) };
        GroundRef::Projected { point: Point::new(x, y), zone }

    } else {
        return Err(FormatError::new("incomplete gcp definition"))
    };

    Ok(Some(RawGcp { pixel, ground }))
}

/// MMPLL lines give lon/lat cutline points, MMPXY lines pixel points. Everything else after the
/// projection setup line is ignored
fn read_cutline (lines: &Lines) -> FormatResult<(Vec<Point>,Vec<Point>)> {
    let mut cutline = Vec::new();
    let mut cutline_pixels = Vec::new();

    for (i, line) in lines.0.iter().enumerate().skip(PROJ_SETUP_LINE) {
        let f = padded_fields(line, ',', CUTLINE_FIELDS);
        let context = format!("line {}", i + 1);

        match f[0] {
            "MMPLL" => {
                let p = with_context(&context, || {
                    let lon = validate_float(f[2])?;
                    let lat = validate_float(f[3])?;
                    Ok::<_,FormatError>(Point::new(lon, lat))
                })?;
                cutline.push(p);
            }
            "MMPXY" => {
                let p = with_context(&context, || {
                    let x = validate_number(f[2])?;
                    let y = validate_number(f[3])?;
                    Ok::<_,FormatError>(Point::new(x as f64, y as f64))
                })?;
                cutline_pixels.push(p);
            }
            _ => {}
        }
    }

    Ok((cutline, cutline_pixels))
}
