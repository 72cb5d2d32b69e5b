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

//! encoding of raster bands into integer grids that are indexed the same way as pixel
//! coordinates, i.e. grid[x][y] with x running along the horizontal image extent

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use tracing::debug;

use crate::errors::{Result, open_failed};

/// round half up (ties go towards positive infinity): 2.5 -> 3, -2.5 -> -2, -2.6 -> -3.
/// This is floor(v + 0.5) but does not suffer from the precision loss of the addition
#[inline] pub fn round_half_up (v: f64)->f64 {
    let f = v.floor();
    if v - f >= 0.5 { f + 1.0 } else { f }
}

/// the encoded samples of one band. The shape is (width,height), the transpose of the native
/// row-major (height,width) layout
#[derive(Debug,Clone,PartialEq)]
pub struct BandGrid {
    band_index: usize,
    data: Array2<i64>,
}

impl BandGrid {
    pub fn band_index (&self)->usize { self.band_index }

    pub fn width (&self)->usize { self.data.nrows() }

    pub fn height (&self)->usize { self.data.ncols() }

    /// the sample at pixel position (x,y)
    pub fn get (&self, x: usize, y: usize)->Option<i64> {
        self.data.get((x,y)).copied()
    }

    /// iterate over the columns (x), each yielding the values for all rows (y)
    pub fn columns (&self)->impl Iterator<Item=ArrayView1<'_,i64>> {
        self.data.axis_iter(Axis(0))
    }

    pub fn to_nested_vec (&self)->Vec<Vec<i64>> {
        self.columns().map( |col| col.to_vec()).collect()
    }

    pub fn as_array (&self)->&Array2<i64> { &self.data }
}

/// largest integer magnitude that JavaScript numbers represent exactly (Number.MAX_SAFE_INTEGER)
pub const MAX_SAFE_SAMPLE: f64 = 9_007_199_254_740_991.0;

/// transpose a row-major band and round each sample. Non-finite samples (NaN, +-inf) and samples
/// that round to values outside of +-MAX_SAFE_SAMPLE cannot be represented in the integer grid
/// and are rejected
pub fn encode_band (band_index: usize, raw: ArrayView2<f64>)->Result<BandGrid> {
    if let Some(((y,x),v)) = raw.indexed_iter().find( |(_,v)| !v.is_finite()) {
        return Err( open_failed( format!("band {band_index} has non-numeric sample {v} at x={x},y={y}")))
    }
    if let Some(((y,x),v)) = raw.indexed_iter().find( |(_,v)| round_half_up(**v).abs() > MAX_SAFE_SAMPLE) {
        return Err( open_failed( format!("band {band_index} sample {v} at x={x},y={y} exceeds the integer range")))
    }

    let transposed = raw.t();
    let mut data: Array2<i64> = Array2::zeros( transposed.raw_dim());
    data.zip_mut_with( &transposed, |d,v| *d = round_half_up(*v) as i64);

    debug!("encoded band {band_index} ({}x{})", data.nrows(), data.ncols());
    Ok( BandGrid { band_index, data } )
}

/// read bands sequentially on the calling thread and encode each one on the rayon pool as soon as it
/// is read, so that a raw band is dropped once its grid is done. Results are in `band_indices` order.
/// `read` does not have to be Send/Sync since it never leaves the calling thread
pub fn encode_bands<F> (band_indices: &[usize], mut read: F)->Result<Vec<BandGrid>>
    where F: FnMut(usize)->Result<Array2<f64>>
{
    let mut slots: Vec<Option<Result<BandGrid>>> = band_indices.iter().map( |_| None).collect();

    rayon::in_place_scope( |s| -> Result<()> {
        for (band_index, slot) in band_indices.iter().copied().zip( slots.iter_mut()) {
            let raw = read( band_index)?;
            s.spawn( move |_| { *slot = Some( encode_band( band_index, raw.view())) });
        }
        Ok(())
    })?;

    slots.into_iter().zip( band_indices)
        .map( |(slot,band_index)| slot.unwrap_or_else( || Err( open_failed( format!("band {band_index} was not encoded")))))
        .collect()
}
