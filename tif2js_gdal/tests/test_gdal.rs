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

//! these tests require a GDAL installation but no network access (EPSG lookups are stubbed)

use std::{cell::Cell, path::Path, rc::Rc};
use tempfile::tempdir;
use tif2js::{*, errors::{Result, projection_failed}};
use tif2js_gdal::{*, gdal::{DriverManager, raster::Buffer}};

const UTM10: &str = "+proj=utm +zone=10 +datum=WGS84 +units=m +no_defs";
const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs";

struct Utm10Lookup { calls: Rc<Cell<usize>> }

impl EpsgLookup for Utm10Lookup {
    fn lookup (&self, code: u32)->Result<String> {
        self.calls.set( self.calls.get() + 1);
        if code == 32610 { Ok(UTM10.to_string()) } else { Err( projection_failed( format!("unexpected EPSG:{code}"))) }
    }
}

/// single band UTM zone 10 GeoTIFF with row-major values
fn create_tif (path: &Path, gt: [f64;6], cols: usize, rows: usize, values: Vec<f64>) {
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = driver.create_with_band_type::<f64,_>( path, cols, rows, 1).unwrap();
    ds.set_geo_transform( &gt).unwrap();
    ds.set_spatial_ref( &SpatialRef::from_epsg(32610).unwrap()).unwrap();

    let mut band = ds.rasterband(1).unwrap();
    let mut buf = Buffer::new( (cols,rows), values);
    band.write( (0,0), (cols,rows), &mut buf).unwrap();
}

/// 3x2 north-up raster with 30m pixels
fn create_test_tif (path: &Path) {
    create_tif( path, [500000.0, 30.0, 0.0, 4200060.0, 0.0, -30.0], 3, 2, vec![1.4, 2.6, 3.5,  4.49, -0.5, 10.0]);
}

#[test]
fn test_raster_metadata() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("utm10.tif");
    create_test_tif( &path);

    let raster = GdalRaster::open( &path).unwrap();
    let meta = raster.metadata().unwrap();
    assert_eq!( (meta.width, meta.height), (3,2));
    assert_eq!( meta.resolution_x, 30.0);
    assert_eq!( meta.bounds, OriginBounds::new( 500000.0, 500090.0, 4200060.0, 4200000.0));
    assert_eq!( meta.crs, CrsDescriptor::Epsg(32610));
    assert_eq!( raster.band_count(), 1);

    let values = raster.read_band(1).unwrap();
    assert_eq!( values.dim(), (2,3)); // rows x cols
    assert_eq!( values[[1,2]], 10.0);

    assert!( matches!( raster.read_band(2), Err(Tif2JsError::BandIndexError{index:2,count:1})));
}

#[test]
fn test_convert_geotiff() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("utm10.tif");
    let output = dir.path().join("utm10.js");
    create_test_tif( &input);

    let calls = Rc::new( Cell::new(0));
    let resolver = CrsResolver::new( Utm10Lookup { calls: calls.clone() });
    let opts = ConvertOptions::new( &input, &output).with_variable("utm");

    let desc = convert( &GdalBackend, &resolver, &opts, &Tif2JsConfig::default()).unwrap();
    assert_eq!( calls.get(), 1);
    assert_eq!( desc.resolution, 30);
    assert_eq!( (desc.width, desc.height), (3,2));
    assert_eq!( desc.corners.top_left, [500000.0, 4200060.0]);
    assert_eq!( desc.proj.as_str(), UTM10);

    let js = std::fs::read_to_string( &output).unwrap();
    assert!( js.starts_with("const utm = {\n"));
    assert!( js.contains("\ndata: [[1,4],[3,0],[4,10]]\n};"));
}

#[test]
fn test_bottom_up_raster() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bottom_up.tif");
    // stored row 0 is the southern row y=[4200000,4200010]
    create_tif( &path, [500000.0, 10.0, 0.0, 4200000.0, 0.0, 10.0], 1, 2, vec![1.0, 2.0]);

    let raster = GdalRaster::open( &path).unwrap();
    let meta = raster.metadata().unwrap();
    assert_eq!( meta.bounds, OriginBounds::new( 500000.0, 500010.0, 4200020.0, 4200000.0));
    assert_eq!( meta.resolution_y, 10.0);

    let values = raster.read_band(1).unwrap();
    assert_eq!( values[[0,0]], 2.0); // top row
    assert_eq!( values[[1,0]], 1.0);

    let grid = encode_band( 1, values.view()).unwrap();
    assert_eq!( grid.to_nested_vec(), vec![vec![2,1]]);
}

#[test]
fn test_right_to_left_raster() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("right_to_left.tif");
    create_tif( &path, [500020.0, -10.0, 0.0, 4200010.0, 0.0, -10.0], 2, 1, vec![1.0, 2.0]);

    let raster = GdalRaster::open( &path).unwrap();
    let meta = raster.metadata().unwrap();
    assert_eq!( meta.bounds, OriginBounds::new( 500000.0, 500020.0, 4200010.0, 4200000.0));
    assert_eq!( meta.resolution_x, 10.0);

    let values = raster.read_band(1).unwrap();
    assert_eq!( values.row(0).to_vec(), vec![2.0, 1.0]); // west to east
}

#[test]
fn test_geographic_transform() {
    let geo = GdalLonLatTransform::new( WGS84, UTM10).unwrap();

    // easting 500000 is the central meridian of zone 10
    let [lng,lat] = geo.inverse( [500000.0, 4200000.0]).unwrap();
    assert!( (lng - -123.0).abs() < 1e-6, "lng={lng}");
    assert!( lat > 37.9 && lat < 38.0, "lat={lat}");

    let [x,y] = geo.forward( [lng,lat]).unwrap();
    assert!( (x - 500000.0).abs() < 1e-3 && (y - 4200000.0).abs() < 1e-3);
}

#[test]
fn test_missing_dataset() {
    let dir = tempdir().unwrap();
    let opts = ConvertOptions::new( dir.path().join("nope.tif"), dir.path().join("nope.js"));
    let resolver = CrsResolver::new( Utm10Lookup { calls: Rc::new( Cell::new(0)) });

    let res = convert( &GdalBackend, &resolver, &opts, &Tif2JsConfig::default());
    assert!( matches!( res, Err(Tif2JsError::DatasetOpenFailure(_))));
    assert!( !dir.path().join("nope.js").exists());
}

#[test]
fn test_unusable_projection() {
    assert!( matches!( GdalBackend.geo_transform( WGS84, &ProjectionString::new("+proj=bogus").unwrap()),
                       Err(Tif2JsError::ProjectionResolutionFailure(_))));
}
