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
#![allow(unused)]

//! tif2js - convert georeferenced rasters into self contained JavaScript objects that carry the
//! raster bounds, projection, pixel/projected/geographic conversion functions and the (integer
//! rounded) band data, for use with Leaflet, OpenLayers and similar web mapping clients.
//!
//! The decoding of rasters and the projected<->geographic transformation are provided by a
//! [`Tif2JsBackend`] (see the `tif2js_gdal` crate for a GDAL based one).

use std::path::{Path,PathBuf};
use tracing::{debug, info, warn};
use tif2js_common::fs::{filename, has_filename_extension};

pub mod errors;
pub mod config;
pub mod source;
pub mod crs;
pub mod bounds;
pub mod transform;
pub mod band;
pub mod descriptor;
pub mod render;

use errors::{Result, invalid_input};
pub use errors::Tif2JsError;
pub use config::{Tif2JsConfig, load_config};
pub use source::{RasterSource, RasterMetadata, OriginBounds, MemRaster};
pub use crs::{CrsDescriptor, ProjectionString, CrsResolver, EpsgLookup, HttpEpsgLookup, CachedEpsgLookup};
pub use bounds::{Coord, CornerSet};
pub use transform::{LonLatTransform, AxisOrder, PixelGrid, CoordinateTransformer};
pub use band::{BandGrid, round_half_up, encode_band};
pub use descriptor::{TransformDescriptor, BandData};
pub use render::{render_js, DEFAULT_VARIABLE};

/// the required filename extension of generated artifacts
pub const OUTPUT_EXTENSION: &str = "js";

/// the band that is converted if none is requested
pub const DEFAULT_BAND: usize = 1;

/// what to convert. This is what the command line gets parsed into
#[derive(Debug,Clone,PartialEq)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,

    /// 1-based band indices, empty means DEFAULT_BAND
    pub bands: Vec<usize>,

    /// name of the generated JavaScript variable
    pub variable: String,
}

impl ConvertOptions {
    pub fn new (input: impl Into<PathBuf>, output: impl Into<PathBuf>)->Self {
        ConvertOptions { input: input.into(), output: output.into(), bands: Vec::new(), variable: DEFAULT_VARIABLE.to_string() }
    }

    pub fn with_bands (mut self, bands: Vec<usize>)->Self {
        self.bands = bands;
        self
    }

    pub fn with_variable (mut self, variable: impl ToString)->Self {
        self.variable = variable.to_string();
        self
    }

    /// the requested band indices without duplicates, in request order
    pub fn band_indices (&self)->Vec<usize> {
        if self.bands.is_empty() {
            vec![DEFAULT_BAND]
        } else {
            let mut indices: Vec<usize> = Vec::with_capacity(self.bands.len());
            for b in &self.bands {
                if !indices.contains(b) { indices.push(*b) }
            }
            indices
        }
    }

    /// checks that do not require opening the raster
    pub fn validate (&self)->Result<()> {
        let output = self.output.to_str()
            .ok_or_else( || invalid_input( format!("output path {:?} is not valid UTF-8", self.output)))?;
        let is_js = filename( &self.output)
            .map( |f| f.len() > OUTPUT_EXTENSION.len() + 1 && has_filename_extension( f, OUTPUT_EXTENSION))
            .unwrap_or(false);
        if !is_js {
            return Err( invalid_input( format!("{output} is not a JavaScript file - it should be named in the form \"*.{OUTPUT_EXTENSION}\"")))
        }

        render::check_variable_name( &self.variable)?;

        if self.bands.iter().any( |b| *b == 0) {
            return Err( invalid_input("band numbers start at 1"))
        }
        Ok(())
    }
}

/// the external collaborators of a conversion: raster decoding and projected<->geographic transformation
pub trait Tif2JsBackend {
    type Raster: RasterSource;
    type Geo: LonLatTransform;

    fn open_raster (&self, path: &Path)->Result<Self::Raster>;

    /// transform between `geographic_proj` (lng,lat) and the projected CRS `proj`
    fn geo_transform (&self, geographic_proj: &str, proj: &ProjectionString)->Result<Self::Geo>;
}

/// read and encode the requested bands. Band index errors are raised by the raster source
pub fn encode_requested_bands<R: RasterSource> (raster: &R, band_indices: &[usize])->Result<Vec<BandGrid>> {
    band::encode_bands( band_indices, |band_index| raster.read_band( band_index))
}

/// build the TransformDescriptor for a raster without rendering it
pub fn build_descriptor<R: RasterSource> (raster: &R, resolver: &CrsResolver, band_indices: &[usize])->Result<TransformDescriptor> {
    let meta = raster.metadata()?;
    meta.check()?;
    debug!("raster {}x{} with {} bands, resolution {}, crs {}", meta.width, meta.height, raster.band_count(), meta.resolution_x, meta.crs);

    let proj = resolver.resolve( &meta.crs)?;
    info!("projection: {proj}");

    let grids = encode_requested_bands( raster, band_indices)?;
    TransformDescriptor::build( &meta, proj, grids)
}

/// the complete conversion of one raster into one JavaScript file. The output file is only
/// created if all steps succeed
pub fn convert<B: Tif2JsBackend> (backend: &B, resolver: &CrsResolver, opts: &ConvertOptions, config: &Tif2JsConfig)->Result<TransformDescriptor> {
    opts.validate()?;

    let raster = backend.open_raster( &opts.input)?;
    info!("opened {:?}", opts.input);

    let desc = build_descriptor( &raster, resolver, &opts.band_indices())?;

    // this makes sure the projection is usable before we hand it to clients
    let geo = backend.geo_transform( &config.geographic_proj, &desc.proj)?;
    let bbox = desc.geo_bounding_box( &geo)?;
    info!("geographic bounds: west={:.6} south={:.6} east={:.6} north={:.6}", bbox.west, bbox.south, bbox.east, bbox.north);

    let js = render_js( &desc, &opts.variable, &config.geographic_proj)?;
    tif2js_common::fs::write_file_atomically( &opts.output, js.as_bytes())?;
    info!("{} bytes written to {:?}", js.len(), opts.output);

    Ok(desc)
}
