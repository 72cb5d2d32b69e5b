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

//! the raster decoding seam. Everything the conversion needs from a georeferenced raster is
//! obtained through [`RasterSource`] so that the core does not depend on a specific decoder

use ndarray::Array2;
use crate::crs::CrsDescriptor;
use crate::errors::{Result, band_index_error, open_failed};

/// projected CRS extent of the raster, in CRS units
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct OriginBounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64
}

impl OriginBounds {
    pub fn new (left: f64, right: f64, top: f64, bottom: f64)->Self {
        OriginBounds { left, right, top, bottom }
    }
}

/// immutable per-run raster metadata. We assume square pixels and only use `resolution_x`
/// for pixel math, `resolution_y` is informational
#[derive(Debug,Clone,PartialEq)]
pub struct RasterMetadata {
    pub width: usize,
    pub height: usize,
    pub resolution_x: f64,
    pub resolution_y: f64,
    pub bounds: OriginBounds,
    pub crs: CrsDescriptor,
}

impl RasterMetadata {
    pub fn check (&self)->Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err( open_failed( format!("empty raster {}x{}", self.width, self.height)))
        }
        if !(self.resolution_x.is_finite() && self.resolution_x > 0.0) {
            return Err( open_failed( format!("invalid resolution {}", self.resolution_x)))
        }
        let b = &self.bounds;
        if ![b.left, b.right, b.top, b.bottom].iter().all( |v| v.is_finite()) {
            return Err( open_failed( format!("invalid bounds {b:?}")))
        }
        Ok(())
    }
}

pub trait RasterSource {
    fn metadata (&self)->Result<RasterMetadata>;

    fn band_count (&self)->usize;

    /// read the samples of a 1-based band index in native row-major (row,col) = (y,x) order.
    /// Indices outside of [1,band_count] are reported as `BandIndexError`
    fn read_band (&self, band_index: usize)->Result<Array2<f64>>;
}

/// a RasterSource that keeps all its bands in memory
#[derive(Debug,Clone)]
pub struct MemRaster {
    pub metadata: RasterMetadata,
    pub bands: Vec<Array2<f64>>,
}

impl MemRaster {
    pub fn new (metadata: RasterMetadata, bands: Vec<Array2<f64>>)->Result<Self> {
        metadata.check()?;
        for (i,band) in bands.iter().enumerate() {
            if band.dim() != (metadata.height, metadata.width) {
                return Err( open_failed( format!("band {} has shape {:?}, expected ({},{})", 
                                                 i+1, band.dim(), metadata.height, metadata.width)))
            }
        }
        Ok( MemRaster { metadata, bands } )
    }
}

impl RasterSource for MemRaster {
    fn metadata (&self)->Result<RasterMetadata> {
        Ok( self.metadata.clone() )
    }

    fn band_count (&self)->usize {
        self.bands.len()
    }

    fn read_band (&self, band_index: usize)->Result<Array2<f64>> {
        if band_index == 0 || band_index > self.bands.len() {
            Err( band_index_error( band_index, self.bands.len()))
        } else {
            Ok( self.bands[band_index-1].clone() )
        }
    }
}
