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

//! conversions between pixel (image index) space, projected CRS space and geographic space.
//!
//! Pixel row 0 is the top of the image, i.e. the y axis is flipped with respect to projected space.
//! All conversions are defined for arbitrary pixel coordinates, values outside of the image simply
//! extrapolate linearly.
//!
//! Geographic coordinates come in two axis orders: (longitude,latitude) for the plain functions and
//! (latitude,longitude) for the `_lat_lng` variants. Both families share one implementation that is
//! parameterized with [`AxisOrder`].

use crate::bounds::{Coord, CornerSet};
use crate::errors::Result;

/// snap tolerance (in pixels) for projected->pixel conversion
pub const PIXEL_SNAP_EPS: f64 = 1e-6;

/// the projected<->geographic primitive. Geographic coordinates are always (lng,lat) here
pub trait LonLatTransform {
    /// geographic (lng,lat) -> projected (x,y)
    fn forward (&self, lng_lat: Coord)->Result<Coord>;

    /// projected (x,y) -> geographic (lng,lat)
    fn inverse (&self, proj: Coord)->Result<Coord>;
}

impl <T: LonLatTransform + ?Sized> LonLatTransform for Box<T> {
    fn forward (&self, lng_lat: Coord)->Result<Coord> { (**self).forward(lng_lat) }
    fn inverse (&self, proj: Coord)->Result<Coord> { (**self).inverse(proj) }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum AxisOrder {
    LngLat,
    LatLng
}

impl AxisOrder {
    /// convert a (lng,lat) coordinate into this order
    #[inline] pub fn from_lng_lat (self, c: Coord)->Coord {
        match self {
            AxisOrder::LngLat => c,
            AxisOrder::LatLng => [c[1], c[0]]
        }
    }

    /// convert a coordinate in this order into (lng,lat). Swapping is its own inverse
    #[inline] pub fn to_lng_lat (self, c: Coord)->Coord {
        self.from_lng_lat(c)
    }
}

/// the parameters of the affine pixel<->projected mapping
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct PixelGrid {
    pub bottom_left: Coord,
    pub top_right: Coord,
    pub resolution: i64,
    pub width: usize,
    pub height: usize,
}

impl PixelGrid {
    pub fn new (corners: &CornerSet, resolution: i64, width: usize, height: usize)->Self {
        PixelGrid { bottom_left: corners.bottom_left, top_right: corners.top_right, resolution, width, height }
    }
}

/// truncation towards zero, except for quotients that are within PIXEL_SNAP_EPS of an integer.
/// This keeps projected_to_pixel(pixel_to_projected(p)) == p in the presence of floating point
/// noise from the corner arithmetic
#[inline] pub fn pixel_index (q: f64)->i64 {
    let r = q.round();
    if (q - r).abs() <= PIXEL_SNAP_EPS { r as i64 } else { q.trunc() as i64 }
}

pub fn pixel_to_projected (grid: &PixelGrid, px: [i64;2])->Coord {
    let res = grid.resolution as f64;
    [
        grid.bottom_left[0] + px[0] as f64 * res,
        grid.bottom_left[1] + (grid.height as f64 - px[1] as f64) * res
    ]
}

/// note this is only an inverse of `pixel_to_projected` for coordinates on pixel boundaries. Points
/// inside of a pixel map to the pixel boundary towards the grid origin (bottom left). Indices of
/// points beyond the i64 range saturate
pub fn projected_to_pixel (grid: &PixelGrid, p: Coord)->[i64;2] {
    let res = grid.resolution as f64;
    [
        pixel_index( (p[0] - grid.bottom_left[0]) / res),
        (grid.height as i64).saturating_sub( pixel_index( (p[1] - grid.bottom_left[1]) / res))
    ]
}

pub fn projected_to_geographic<G: LonLatTransform + ?Sized> (geo: &G, p: Coord, order: AxisOrder)->Result<Coord> {
    Ok( order.from_lng_lat( geo.inverse(p)?) )
}

pub fn geographic_to_projected<G: LonLatTransform + ?Sized> (geo: &G, c: Coord, order: AxisOrder)->Result<Coord> {
    geo.forward( order.to_lng_lat(c))
}

pub fn pixel_to_geographic<G: LonLatTransform + ?Sized> (grid: &PixelGrid, geo: &G, px: [i64;2], order: AxisOrder)->Result<Coord> {
    projected_to_geographic( geo, pixel_to_projected( grid, px), order)
}

pub fn geographic_to_pixel<G: LonLatTransform + ?Sized> (grid: &PixelGrid, geo: &G, c: Coord, order: AxisOrder)->Result<[i64;2]> {
    Ok( projected_to_pixel( grid, geographic_to_projected( geo, c, order)?) )
}

/// [geographic(bottom_left), geographic(top_right)]
pub fn geo_bounds<G: LonLatTransform + ?Sized> (grid: &PixelGrid, geo: &G, order: AxisOrder)->Result<[Coord;2]> {
    Ok([
        projected_to_geographic( geo, grid.bottom_left, order)?,
        projected_to_geographic( geo, grid.top_right, order)?
    ])
}

/// the named conversion operations for one pixel grid and geographic transform. 
/// Plain methods use (lng,lat), `_lat_lng` methods use (lat,lng)
pub struct CoordinateTransformer<'a, G: LonLatTransform + ?Sized> {
    grid: PixelGrid,
    geo: &'a G
}

impl <'a, G: LonLatTransform + ?Sized> CoordinateTransformer<'a,G> {
    pub fn new (grid: PixelGrid, geo: &'a G)->Self {
        CoordinateTransformer { grid, geo }
    }

    pub fn grid (&self)->&PixelGrid { &self.grid }

    pub fn pixel_to_projected (&self, px: [i64;2])->Coord { pixel_to_projected( &self.grid, px) }

    pub fn projected_to_pixel (&self, p: Coord)->[i64;2] { projected_to_pixel( &self.grid, p) }

    //--- (lng,lat)

    pub fn projected_to_geographic (&self, p: Coord)->Result<Coord> {
        projected_to_geographic( self.geo, p, AxisOrder::LngLat)
    }

    pub fn geographic_to_projected (&self, lng_lat: Coord)->Result<Coord> {
        geographic_to_projected( self.geo, lng_lat, AxisOrder::LngLat)
    }

    pub fn pixel_to_geographic (&self, px: [i64;2])->Result<Coord> {
        pixel_to_geographic( &self.grid, self.geo, px, AxisOrder::LngLat)
    }

    pub fn geographic_to_pixel (&self, lng_lat: Coord)->Result<[i64;2]> {
        geographic_to_pixel( &self.grid, self.geo, lng_lat, AxisOrder::LngLat)
    }

    pub fn geo_bounds (&self)->Result<[Coord;2]> {
        geo_bounds( &self.grid, self.geo, AxisOrder::LngLat)
    }

    //--- (lat,lng)

    pub fn projected_to_lat_lng (&self, p: Coord)->Result<Coord> {
        projected_to_geographic( self.geo, p, AxisOrder::LatLng)
    }

    pub fn lat_lng_to_projected (&self, lat_lng: Coord)->Result<Coord> {
        geographic_to_projected( self.geo, lat_lng, AxisOrder::LatLng)
    }

    pub fn pixel_to_lat_lng (&self, px: [i64;2])->Result<Coord> {
        pixel_to_geographic( &self.grid, self.geo, px, AxisOrder::LatLng)
    }

    pub fn lat_lng_to_pixel (&self, lat_lng: Coord)->Result<[i64;2]> {
        geographic_to_pixel( &self.grid, self.geo, lat_lng, AxisOrder::LatLng)
    }

    pub fn geo_bounds_lat_lng (&self)->Result<[Coord;2]> {
        geo_bounds( &self.grid, self.geo, AxisOrder::LatLng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_index() {
        assert_eq!( pixel_index(3.0), 3);
        assert_eq!( pixel_index(2.9999999999999996), 3);
        assert_eq!( pixel_index(3.0000000000000004), 3);
        assert_eq!( pixel_index(3.7), 3);
        assert_eq!( pixel_index(-0.5), 0); // towards zero
        assert_eq!( pixel_index(-1.5), -1);
    }

    #[test]
    fn test_axis_order() {
        assert_eq!( AxisOrder::LngLat.from_lng_lat([1.0,2.0]), [1.0,2.0]);
        assert_eq!( AxisOrder::LatLng.from_lng_lat([1.0,2.0]), [2.0,1.0]);
        assert_eq!( AxisOrder::LatLng.to_lng_lat( AxisOrder::LatLng.from_lng_lat([1.0,2.0])), [1.0,2.0]);
    }
}
