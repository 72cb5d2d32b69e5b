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

//! corner coordinates, bounding box and integer resolution derived from raster metadata

use tif2js_common::BoundingBox;
use crate::errors::{Result, invalid_input};
use crate::source::OriginBounds;

/// a projected (x,y) or geographic coordinate pair
pub type Coord = [f64;2];

/// the four corners of an axis aligned raster extent, in projected CRS units
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct CornerSet {
    pub top_left: Coord,
    pub bottom_left: Coord,
    pub top_right: Coord,
    pub bottom_right: Coord,
}

impl CornerSet {
    /// the combined bounding box as [southwest,northeast]
    pub fn bounding_box (&self)->[Coord;2] {
        [self.bottom_left, self.top_right]
    }

    pub fn to_bounding_box (&self)->BoundingBox<f64> {
        BoundingBox::from_corners( self.bottom_left, self.top_right)
    }
}

/// exact combinations of the bounds scalars, no rounding
pub fn corners (b: &OriginBounds)->CornerSet {
    CornerSet {
        top_left:     [b.left,  b.top],
        bottom_left:  [b.left,  b.bottom],
        top_right:    [b.right, b.top],
        bottom_right: [b.right, b.bottom],
    }
}

/// the pixel size as an integer divisor. This truncates (not rounds) - sub-unit resolutions
/// cannot be expressed and are rejected
pub fn integer_resolution (resolution_x: f64)->Result<i64> {
    let res = resolution_x.trunc();
    if res.is_finite() && res >= 1.0 && res <= i64::MAX as f64 {
        Ok( res as i64 )
    } else {
        Err( invalid_input( format!("resolution {resolution_x} does not truncate to a positive integer")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        let c = corners( &OriginBounds::new( 500000.0, 500200.0, 4200100.0, 4200000.0));
        assert_eq!( c.top_left, [500000.0, 4200100.0]);
        assert_eq!( c.bottom_left, [500000.0, 4200000.0]);
        assert_eq!( c.top_right, [500200.0, 4200100.0]);
        assert_eq!( c.bottom_right, [500200.0, 4200000.0]);

        // axis aligned rectangle
        assert_eq!( c.bottom_left[0], c.top_left[0]);
        assert_eq!( c.top_right[1], c.top_left[1]);
        assert_eq!( c.bottom_right[0], c.top_right[0]);
        assert_eq!( c.bottom_right[1], c.bottom_left[1]);

        assert_eq!( c.bounding_box(), [[500000.0, 4200000.0], [500200.0, 4200100.0]]);
        let bbox = c.to_bounding_box();
        assert_eq!( (bbox.west, bbox.south, bbox.east, bbox.north), (500000.0, 4200000.0, 500200.0, 4200100.0));
        assert_eq!( (bbox.width(), bbox.height()), (200.0, 100.0));
    }

    #[test]
    fn test_integer_resolution() {
        assert_eq!( integer_resolution(30.0).unwrap(), 30);
        assert_eq!( integer_resolution(29.9999).unwrap(), 29); // truncation, not rounding
        assert_eq!( integer_resolution(10.5).unwrap(), 10);
        assert!( integer_resolution(0.5).is_err());
        assert!( integer_resolution(f64::NAN).is_err());
    }
}
