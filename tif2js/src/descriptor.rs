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

use tif2js_common::BoundingBox;

use crate::band::BandGrid;
use crate::bounds::{Coord, CornerSet, corners, integer_resolution};
use crate::crs::ProjectionString;
use crate::errors::{Result, invalid_input, open_failed};
use crate::source::RasterMetadata;
use crate::transform::{CoordinateTransformer, LonLatTransform, PixelGrid};

/// the encoded band data of a descriptor. A single requested band is stored under a default
/// name, multiple bands are keyed by their (1-based) band index
#[derive(Debug,Clone,PartialEq)]
pub enum BandData {
    Single(BandGrid),
    Multiple(Vec<BandGrid>)
}

impl BandData {
    pub fn grids (&self)->&[BandGrid] {
        match self {
            BandData::Single(grid) => std::slice::from_ref(grid),
            BandData::Multiple(grids) => grids.as_slice()
        }
    }

    pub fn get (&self, band_index: usize)->Option<&BandGrid> {
        self.grids().iter().find( |g| g.band_index() == band_index)
    }
}

/// the aggregate output of a conversion. Built once and never mutated. Coordinate conversions
/// are obtained through [`TransformDescriptor::transformer`]
#[derive(Debug,Clone,PartialEq)]
pub struct TransformDescriptor {
    pub corners: CornerSet,
    pub bounds: [Coord;2],
    pub resolution: i64,
    pub width: usize,
    pub height: usize,
    pub proj: ProjectionString,
    pub bands: BandData,
}

impl TransformDescriptor {
    pub fn build (meta: &RasterMetadata, proj: ProjectionString, mut grids: Vec<BandGrid>)->Result<Self> {
        meta.check()?;
        let corners = corners( &meta.bounds);
        let resolution = integer_resolution( meta.resolution_x)?;

        for grid in &grids {
            if grid.width() != meta.width || grid.height() != meta.height {
                return Err( open_failed( format!("band {} is {}x{}, raster is {}x{}", 
                    grid.band_index(), grid.width(), grid.height(), meta.width, meta.height)))
            }
        }

        let bands = match grids.len() {
            0 => return Err( invalid_input("no bands to encode")),
            1 => BandData::Single( grids.remove(0)),
            _ => BandData::Multiple( grids)
        };

        Ok( TransformDescriptor {
            corners,
            bounds: corners.bounding_box(),
            resolution,
            width: meta.width,
            height: meta.height,
            proj,
            bands
        })
    }

    pub fn pixel_grid (&self)->PixelGrid {
        PixelGrid::new( &self.corners, self.resolution, self.width, self.height)
    }

    pub fn transformer<'a,G: LonLatTransform + ?Sized> (&self, geo: &'a G)->CoordinateTransformer<'a,G> {
        CoordinateTransformer::new( self.pixel_grid(), geo)
    }

    /// geographic (west,south,east,north) bounds
    pub fn geo_bounding_box<G: LonLatTransform + ?Sized> (&self, geo: &G)->Result<BoundingBox<f64>> {
        let [sw,ne] = self.transformer(geo).geo_bounds()?;
        Ok( BoundingBox::from_corners( sw, ne) )
    }
}
