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

use gdal::errors::GdalError;
use tif2js::Tif2JsError;
use tif2js_common::define_error;

define_error!{ pub Tif2JsGdalError =
    GdalError(#[from] GdalError) : "gdal error: {0}",
    UnsupportedGrid(String) : "unsupported raster grid: {0}",
    MiscError(String) : "{0}"
}

pub type Result<T> = std::result::Result<T, Tif2JsGdalError>;

pub fn unsupported_grid<S: ToString> (msg: S)->Tif2JsGdalError {
    Tif2JsGdalError::UnsupportedGrid(msg.to_string())
}

pub fn misc_error<S: ToString> (msg: S)->Tif2JsGdalError {
    Tif2JsGdalError::MiscError(msg.to_string())
}

//--- mapping into the conversion error taxonomy (depends on which collaborator operation failed)

pub fn dataset_error (e: impl Into<Tif2JsGdalError>)->Tif2JsError {
    Tif2JsError::DatasetOpenFailure( e.into().to_string())
}

pub fn projection_error (e: impl Into<Tif2JsGdalError>)->Tif2JsError {
    Tif2JsError::ProjectionResolutionFailure( e.into().to_string())
}
