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

//! rendering of TransformDescriptors as self contained JavaScript objects that can be loaded by
//! web mapping clients (requires proj4js on the client side)

use tif2js_common::js_writer::{JsWriter, is_js_identifier, write_js_string};

use crate::band::BandGrid;
use crate::bounds::Coord;
use crate::descriptor::{BandData, TransformDescriptor};
use crate::errors::{Result, invalid_input};
use crate::transform::PIXEL_SNAP_EPS;

/// the variable name used if none is specified
pub const DEFAULT_VARIABLE: &str = "data";

/// the property name of a single band grid
pub const SINGLE_BAND_FIELD: &str = "data";

/// the property name of the band index keyed grid map for multiple bands
pub const MULTI_BAND_FIELD: &str = "bands";

pub fn check_variable_name (variable: &str)->Result<()> {
    if is_js_identifier( variable) { Ok(()) } else {
        Err( invalid_input( format!("'{variable}' is not a valid JavaScript variable name")))
    }
}

/// render the descriptor as `const <variable> = {..};`. The client side transformer maps between
/// `geographic_proj` and the descriptor projection
pub fn render_js (desc: &TransformDescriptor, variable: &str, geographic_proj: &str)->Result<String> {
    check_variable_name( variable)?;

    let n_samples: usize = desc.bands.grids().iter().map( |g| g.width() * g.height()).sum();
    let mut w = JsWriter::with_capacity( 4096 + n_samples * 4);

    w.write_const_decl( variable, |w| {
        let c = &desc.corners;
        write_coord_field( w, "tl", c.top_left);
        write_coord_field( w, "bl", c.bottom_left);
        write_coord_field( w, "tr", c.top_right);
        write_coord_field( w, "br", c.bottom_right);
        w.write_array_field( "bounds", |w| {
            for coord in &desc.bounds { write_coord( w, *coord) }
        });
        w.write_field( "resolution", desc.resolution);
        w.write_field( "width", desc.width);
        w.write_field( "height", desc.height);
        w.write_str_field( "proj", desc.proj.as_str());
        w.write_expr_field( "transformer", &transformer_expr( geographic_proj, desc.proj.as_str()));

        write_conversion_fns( w);

        match &desc.bands {
            BandData::Single(grid) => {
                w.write_array_field( SINGLE_BAND_FIELD, |w| write_grid( w, grid));
            }
            BandData::Multiple(grids) => {
                w.write_object_field( MULTI_BAND_FIELD, |w| {
                    for grid in grids {
                        w.write_array_field( &grid.band_index().to_string(), |w| write_grid( w, grid));
                    }
                });
            }
        }
    });

    Ok( w.to_string() )
}

fn transformer_expr (geographic_proj: &str, proj: &str)->String {
    let mut s = String::from("proj4(");
    write_js_string( &mut s, geographic_proj);
    s.push_str(", ");
    write_js_string( &mut s, proj);
    s.push(')');
    s
}

fn write_coord (w: &mut JsWriter, c: Coord) {
    w.write_array( |w| {
        w.write_value( c[0]);
        w.write_value( c[1]);
    });
}

fn write_coord_field (w: &mut JsWriter, name: &str, c: Coord) {
    w.write_array_field( name, |w| {
        w.write_value( c[0]);
        w.write_value( c[1]);
    });
}

/// columns first, each column holds the values of all rows
fn write_grid (w: &mut JsWriter, grid: &BandGrid) {
    for col in grid.columns() {
        w.write_int_array( col.iter().copied());
    }
}

// these mirror crate::transform. Mirrored (lat,lng) variants never modify their arguments
fn write_conversion_fns (w: &mut JsWriter) {
    w.write_fn_field( "pixelIndex", "q", 
        &format!("const r = Math.round(q); return Math.abs(q - r) <= {PIXEL_SNAP_EPS:e} ? r : Math.trunc(q);"));

    w.write_fn_field( "proj2image", "coord", 
        "return [this.pixelIndex((coord[0] - this.bl[0]) / this.resolution), this.height - this.pixelIndex((coord[1] - this.bl[1]) / this.resolution)];");
    w.write_fn_field( "image2proj", "px", 
        "return [this.bl[0] + (px[0] * this.resolution), this.bl[1] + ((this.height - px[1]) * this.resolution)];");

    w.write_fn_field( "proj2geo", "proj", "return this.transformer.inverse(proj);");
    w.write_fn_field( "geo2proj", "lngLat", "return this.transformer.forward(lngLat);");
    w.write_fn_field( "image2geo", "px", "return this.proj2geo(this.image2proj(px));");
    w.write_fn_field( "geo2image", "lngLat", "return this.proj2image(this.geo2proj(lngLat));");
    w.write_fn_field( "getGeoBounds", "", "return [this.proj2geo(this.bl), this.proj2geo(this.tr)];");

    w.write_fn_field( "proj2geo2", "proj", "return this.proj2geo(proj).slice().reverse();");
    w.write_fn_field( "geo2proj2", "latLng", "return this.geo2proj(latLng.slice().reverse());");
    w.write_fn_field( "image2geo2", "px", "return this.image2geo(px).slice().reverse();");
    w.write_fn_field( "geo2image2", "latLng", "return this.geo2image(latLng.slice().reverse());");
    w.write_fn_field( "getGeoBounds2", "", "return this.getGeoBounds().map(function(c) { return c.slice().reverse(); });");
}
