/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! command line converter for georeferenced rasters into JavaScript transformation objects
//! example: tif2js --input dem.tif --output dem.js --band 1 --variable dem

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tif2js::{ConvertOptions, CrsResolver, Tif2JsConfig, convert, load_config};
use tif2js_gdal::GdalBackend;

/// convert a georeferenced raster (GeoTIFF or any other GDAL readable format) into a JavaScript
/// object with its bounds, projection, coordinate conversion functions and band data
#[derive(Parser,Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// path of the raster to convert
    #[arg(short, long)]
    input: PathBuf,

    /// path of the JavaScript file to generate (has to end with ".js")
    #[arg(short, long)]
    output: PathBuf,

    /// 1-based band to include (can be repeated, defaults to 1)
    #[arg(short, long)]
    band: Vec<usize>,

    /// name of the generated JavaScript variable
    #[arg(long, default_value = tif2js::DEFAULT_VARIABLE)]
    variable: String,

    /// optional RON config file (EPSG lookup URL, timeouts, cache dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let opts = ConvertOptions::new( &args.input, &args.output)
        .with_bands( args.band)
        .with_variable( &args.variable);
    opts.validate()?;

    let config = match &args.config {
        Some(path) => load_config( path)?,
        None => Tif2JsConfig::default()
    };
    let resolver = CrsResolver::from_config( &config)?;

    match convert( &GdalBackend, &resolver, &opts, &config) {
        Ok(desc) => {
            info!("converted {}x{} raster into variable '{}'", desc.width, desc.height, opts.variable);
            Ok(())
        }
        Err(e) => {
            error!("conversion of {:?} failed: {e}", opts.input);
            Err(e.into())
        }
    }
}
