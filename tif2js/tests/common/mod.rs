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

//! test collaborators that do not require GDAL or network access

use std::{cell::Cell, path::Path, rc::Rc};
use ndarray::Array2;
use tif2js::{*, errors::{Result, projection_failed}};

/// a simple linear "projection" with 1 degree == 100km
pub struct ScaleTransform { pub scale: f64 }

impl LonLatTransform for ScaleTransform {
    fn forward (&self, lng_lat: Coord)->Result<Coord> {
        Ok([lng_lat[0] * self.scale, lng_lat[1] * self.scale])
    }

    fn inverse (&self, proj: Coord)->Result<Coord> {
        Ok([proj[0] / self.scale, proj[1] / self.scale])
    }
}

pub fn scale_transform()->ScaleTransform { ScaleTransform { scale: 100_000.0 } }

/// returns a fixed definition and counts how often it was called
#[derive(Clone)]
pub struct FixedLookup {
    pub def: Option<String>,
    pub calls: Rc<Cell<usize>>
}

impl FixedLookup {
    pub fn new (def: Option<&str>)->Self {
        FixedLookup { def: def.map(|s| s.to_string()), calls: Rc::new(Cell::new(0)) }
    }
}

impl EpsgLookup for FixedLookup {
    fn lookup (&self, code: u32)->Result<String> {
        self.calls.set( self.calls.get() + 1);
        self.def.clone().ok_or_else( || projection_failed( format!("lookup service unavailable for EPSG:{code}")))
    }
}

pub struct MemBackend {
    pub raster: MemRaster,
    pub opened: Cell<usize>,
}

impl MemBackend {
    pub fn new (raster: MemRaster)->Self { MemBackend { raster, opened: Cell::new(0) } }
}

impl Tif2JsBackend for MemBackend {
    type Raster = MemRaster;
    type Geo = ScaleTransform;

    fn open_raster (&self, path: &Path)->Result<MemRaster> {
        self.opened.set( self.opened.get() + 1);
        Ok( self.raster.clone() )
    }

    fn geo_transform (&self, geographic_proj: &str, proj: &ProjectionString)->Result<ScaleTransform> {
        Ok( scale_transform() )
    }
}

pub fn metadata (width: usize, height: usize, resolution: f64, left: f64, bottom: f64, crs: CrsDescriptor)->RasterMetadata {
    RasterMetadata {
        width, height,
        resolution_x: resolution,
        resolution_y: resolution,
        bounds: OriginBounds::new( left, left + width as f64 * resolution, bottom + height as f64 * resolution, bottom),
        crs
    }
}

pub const CUSTOM_PROJ: &str = "+proj=aea +lat_1=29.5 +lat_2=45.5 +lat_0=23 +lon_0=-96 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs";

/// the 2x2 raster with resolution 10 and bounds (0,0)..(20,20)
pub fn small_raster (crs: CrsDescriptor)->MemRaster {
    let band = ndarray::array![[1.4, 2.6],[3.5, 4.49]];
    MemRaster::new( metadata( 2, 2, 10.0, 0.0, 0.0, crs), vec![band]).unwrap()
}
