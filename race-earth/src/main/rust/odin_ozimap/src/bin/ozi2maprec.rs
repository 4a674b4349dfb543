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

//! ozi2maprec - convert OziExplorer .map files into georeferencing records
//!
//! Each input file is converted independently. Failures are reported with their full error chain and
//! do not stop processing of the remaining files. The exit code is non-zero if any file failed.

use std::path::{Path,PathBuf};
use structopt::StructOpt;
use anyhow::{anyhow,Context,Result};
use log::{info,error};
use lazy_static::lazy_static;

use odin_common::fs::ensure_writable_dir;
use odin_ozimap::{
    OziMapConverter,
    config::{load_config, store_config, OziMapConfig},
    cutline::CutlineSpace,
    record::write_record,
    transform::Proj4Transformer,
};

/// command line argument structure
#[derive(StructOpt,Clone,Debug)]
struct Opt {
    /// cutline space: 'latlon', 'projected', 'raw' (image pixels) or 'none'. Defaults to config value
    #[structopt(long)]
    cutline: Option<String>,

    /// RON file with datum/projection tables (built-in tables are used if not set)
    #[structopt(long)]
    config: Option<PathBuf>,

    /// write the built-in config to the given file and exit
    #[structopt(long)]
    generate_config: Option<PathBuf>,

    /// directory to write records to (default is the directory of each input file)
    #[structopt(long)]
    output_dir: Option<PathBuf>,

    /// write absolute image path (otherwise relative to record file)
    #[structopt(long)]
    abs_path: bool,

    /// increase logging level (can also be set with RUST_LOG env var)
    #[structopt(short,long)]
    verbose: bool,

    /// OziExplorer .map files to convert
    #[structopt(parse(from_os_str))]
    map_files: Vec<PathBuf>,
}

lazy_static! {
    static ref OPT: Opt = Opt::from_args();
}

fn cutline_space (config: &OziMapConfig) -> Result<Option<CutlineSpace>> {
    match OPT.cutline.as_deref() {
        None => Ok(Some(config.cutline)),
        Some("none") => Ok(None),
        Some(s) => Ok(Some(s.parse::<CutlineSpace>()?))
    }
}

fn record_path (map_file: &Path) -> Result<PathBuf> {
    let stem = map_file.file_stem().ok_or_else(|| anyhow!("not a file name {:?}", map_file))?;
    let filename = format!("{}.maprec.ron", stem.to_string_lossy());

    let dir = match &OPT.output_dir {
        Some(dir) => dir.clone(),
        None => map_file.parent().map(|p| p.to_path_buf()).unwrap_or_default()
    };
    Ok(dir.join(filename))
}

fn convert (converter: &OziMapConverter, map_file: &Path, cutline: Option<CutlineSpace>) -> Result<()> {
    let record = converter.convert_file(map_file, cutline)?;
    let path = record_path(map_file)?;
    write_record(&record, &path, !OPT.abs_path).with_context(|| format!("writing {:?} failed", path))
}

fn main() -> Result<()> {
    if OPT.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if let Some(path) = &OPT.generate_config {
        store_config(&OziMapConfig::default(), path)?;
        info!("default config written to {:?}", path);
        return Ok(())
    }

    let config = match &OPT.config {
        Some(path) => load_config(path)?,
        None => OziMapConfig::default()
    };
    let cutline = cutline_space(&config)?;

    if let Some(dir) = &OPT.output_dir {
        ensure_writable_dir(dir)?;
    }

    let transformer = Proj4Transformer;
    let converter = OziMapConverter::new(&config, &transformer);

    let mut n_failed = 0;
    for map_file in &OPT.map_files {
        if let Err(e) = convert(&converter, map_file, cutline) {
            error!("{:?}: {:#}", map_file, e);
            n_failed += 1;
        }
    }

    if n_failed > 0 {
        Err(anyhow!("{} of {} map files failed", n_failed, OPT.map_files.len()))
    } else {
        Ok(())
    }
}
