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
use thiserror::Error;
use tif2js_common::{map_to_opaque_error, net::NetError};

#[derive(Error,Debug)]
pub enum Tif2JsError {

    /// output artifact name, variable name or requested band list is unusable. Detected before any processing
    #[error("invalid input format: {0}")]
    InvalidInputFormat(String),

    #[error("failed to open raster dataset: {0}")]
    DatasetOpenFailure(String),

    /// EPSG lookup failed, CRS could not be converted or the resulting definition is not usable
    #[error("failed to resolve projection: {0}")]
    ProjectionResolutionFailure(String),

    #[error("band index {index} outside of valid range [1,{count}]")]
    BandIndexError { index: usize, count: usize },

    #[error("config error: {0}")]
    ConfigError(String),

    // pass through for IO errors
    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),
}

map_to_opaque_error!( NetError => Tif2JsError::ProjectionResolutionFailure);
map_to_opaque_error!( ron::error::SpannedError => Tif2JsError::ConfigError);

pub type Result<T> = std::result::Result<T, Tif2JsError>;

pub fn invalid_input<S: ToString> (msg: S)->Tif2JsError {
    Tif2JsError::InvalidInputFormat(msg.to_string())
}

pub fn open_failed<S: ToString> (msg: S)->Tif2JsError {
    Tif2JsError::DatasetOpenFailure(msg.to_string())
}

pub fn projection_failed<S: ToString> (msg: S)->Tif2JsError {
    Tif2JsError::ProjectionResolutionFailure(msg.to_string())
}

pub fn band_index_error (index: usize, count: usize)->Tif2JsError {
    Tif2JsError::BandIndexError { index, count }
}
