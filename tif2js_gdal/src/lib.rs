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

//! GDAL based collaborators for tif2js: raster decoding, CRS descriptors and the
//! projected<->geographic transformation

pub mod errors;

use std::path::Path;
use ndarray::{Array2, Axis};
use tracing::debug;

// we re-export these so that other crates don't need a direct gdal dependency
pub use gdal::{self, Dataset, GeoTransform, errors::GdalError};
pub use gdal::raster::{Buffer, RasterBand};
pub use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};

use tif2js::{Coord, CrsDescriptor, LonLatTransform, OriginBounds, ProjectionString, RasterMetadata, RasterSource, Tif2JsBackend};
use tif2js::errors::band_index_error;
use crate::errors::{Result, dataset_error, misc_error, projection_error, unsupported_grid};

#[derive(Debug)]
pub struct RasterInfo {
    pub cols: usize,
    pub left: f64,
    pub right: f64,
    pub dx: f64,

    pub rows: usize,
    pub top: f64,
    pub bottom: f64,
    pub dy: f64
}

impl RasterInfo {
    /// stored rows run south to north
    pub fn is_bottom_up (&self)->bool { self.dy > 0.0 }

    /// stored columns run east to west
    pub fn is_right_to_left (&self)->bool { self.dx < 0.0 }
}

/// extent and (signed) pixel size of a dataset. The extent is always normalized to left < right and
/// bottom < top, the signs of dx and dy tell the storage order. Rotated grids are rejected
pub fn get_raster_info (ds: &Dataset)->Result<RasterInfo> {
    let (cols,rows) = ds.raster_size();
    let a = ds.geo_transform()?;

    if a[2] != 0.0 || a[4] != 0.0 {
        return Err( unsupported_grid( format!("rotated geotransform {a:?}")))
    }

    let x0 = a[0];
    let dx = a[1];
    let x1 = x0 + (dx * cols as f64);
    let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };

    let y0 = a[3];
    let dy = a[5];
    let y1 = y0 + (dy * rows as f64);
    let (top, bottom) = if y0 >= y1 { (y0, y1) } else { (y1, y0) };

    Ok( RasterInfo { cols, left, right, dx, rows, top, bottom, dy } )
}

/// EPSG if GDAL identified an EPSG authority for the root node, the proj4 definition otherwise
pub fn crs_descriptor (srs: &SpatialRef)->Result<CrsDescriptor> {
    if let (Ok(name), Ok(code)) = (srs.auth_name(), srs.auth_code()) {
        if name.eq_ignore_ascii_case("EPSG") && code > 0 {
            return Ok( CrsDescriptor::Epsg( code as u32) )
        }
    }
    let def = srs.to_proj4()?;
    Ok( CrsDescriptor::from_proj4( &def) )
}

/// spatial ref with (lon,lat) / (easting,northing) axis order, independent of authority axis definitions
pub fn gis_order_srs (definition: &str)->Result<SpatialRef> {
    let mut srs = SpatialRef::from_definition( definition)?;
    srs.set_axis_mapping_strategy( AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

pub fn transform_point_2d (transform: &CoordTransform, x: f64, y: f64) -> Result<(f64,f64)> {
    let mut ax: [f64;1] = [x];
    let mut ay: [f64;1] = [y];
    let mut az: [f64;0] = [];

    transform.transform_coords(&mut ax, &mut ay, &mut az)?;
    Ok((ax[0],ay[0]))
}

/* #region raster source ***********************************************************************************/

pub struct GdalRaster {
    ds: Dataset,
}

impl GdalRaster {
    pub fn open (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        let ds = Dataset::open(path).map_err( |e| misc_error( format!("{:?} is not a valid raster dataset: {e}", path)))?;
        Ok( GdalRaster { ds } )
    }

    pub fn from_dataset (ds: Dataset)->Self {
        GdalRaster { ds }
    }

    pub fn dataset (&self)->&Dataset { &self.ds }

    /// band values in north-up, west-to-east (row,col) order regardless of how they are stored
    fn read_band_values (&self, band_index: usize)->Result<Array2<f64>> {
        let info = get_raster_info( &self.ds)?;
        let band = self.ds.rasterband( band_index)?;
        let (cols,rows) = band.size();
        let buf: Buffer<f64> = band.read_as( (0,0), (cols,rows), (cols,rows), None)?;
        let mut values = Array2::from_shape_vec( (rows,cols), buf.data().to_vec())
            .map_err( |e| misc_error( format!("band {band_index} has inconsistent size: {e}")))?;

        if info.is_bottom_up() { values.invert_axis( Axis(0)) }
        if info.is_right_to_left() { values.invert_axis( Axis(1)) }
        Ok(values)
    }
}

impl RasterSource for GdalRaster {
    fn metadata (&self)->tif2js::errors::Result<RasterMetadata> {
        let info = get_raster_info( &self.ds).map_err( dataset_error)?;
        let srs = self.ds.spatial_ref().map_err( |e| projection_error( misc_error( format!("dataset has no spatial reference: {e}"))))?;
        let crs = crs_descriptor( &srs).map_err( projection_error)?;

        Ok( RasterMetadata {
            width: info.cols,
            height: info.rows,
            resolution_x: info.dx.abs(),
            resolution_y: info.dy.abs(),
            bounds: OriginBounds::new( info.left, info.right, info.top, info.bottom),
            crs
        })
    }

    fn band_count (&self)->usize {
        self.ds.raster_count()
    }

    fn read_band (&self, band_index: usize)->tif2js::errors::Result<Array2<f64>> {
        let count = self.band_count();
        if band_index == 0 || band_index > count {
            return Err( band_index_error( band_index, count))
        }
        debug!("reading band {band_index}/{count}");
        self.read_band_values( band_index).map_err( dataset_error)
    }
}

/* #endregion raster source */

/* #region geographic transform ****************************************************************************/

/// projected<->geographic conversion based on GDAL/PROJ coordinate transformations
pub struct GdalLonLatTransform {
    to_projected: CoordTransform,
    to_geographic: CoordTransform,
}

impl GdalLonLatTransform {
    pub fn new (geographic_proj: &str, proj: &str)->Result<Self> {
        let geo_srs = gis_order_srs( geographic_proj)?;
        let proj_srs = gis_order_srs( proj)?;

        let to_projected = CoordTransform::new( &geo_srs, &proj_srs)?;
        let to_geographic = CoordTransform::new( &proj_srs, &geo_srs)?;
        Ok( GdalLonLatTransform { to_projected, to_geographic } )
    }
}

impl LonLatTransform for GdalLonLatTransform {
    fn forward (&self, lng_lat: Coord)->tif2js::errors::Result<Coord> {
        let (x,y) = transform_point_2d( &self.to_projected, lng_lat[0], lng_lat[1]).map_err( projection_error)?;
        Ok([x,y])
    }

    fn inverse (&self, proj: Coord)->tif2js::errors::Result<Coord> {
        let (lng,lat) = transform_point_2d( &self.to_geographic, proj[0], proj[1]).map_err( projection_error)?;
        Ok([lng,lat])
    }
}

/* #endregion geographic transform */

/// the GDAL backend for tif2js::convert
#[derive(Debug,Default,Clone,Copy)]
pub struct GdalBackend;

impl Tif2JsBackend for GdalBackend {
    type Raster = GdalRaster;
    type Geo = GdalLonLatTransform;

    fn open_raster (&self, path: &Path)->tif2js::errors::Result<GdalRaster> {
        GdalRaster::open(path).map_err( dataset_error)
    }

    fn geo_transform (&self, geographic_proj: &str, proj: &ProjectionString)->tif2js::errors::Result<GdalLonLatTransform> {
        GdalLonLatTransform::new( geographic_proj, proj.as_str()).map_err( projection_error)
    }
}
