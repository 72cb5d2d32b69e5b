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

use std::{path::{Path,PathBuf}, time::Duration};
use serde::{Deserialize, Serialize};
use tif2js_common::{datetime::{deserialize_duration, serialize_duration, secs}, fs::file_contents_as_string};

use crate::errors::Result;

pub const DEFAULT_EPSG_URL_TEMPLATE: &str = "https://epsg.io/{code}.proj4";
pub const DEFAULT_GEOGRAPHIC_PROJ: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// runtime configuration, normally loaded from a RON file such as
/// ```ron
/// Tif2JsConfig(
///     epsg_url_template: "https://epsg.io/{code}.proj4",
///     geographic_proj: "+proj=longlat +datum=WGS84 +no_defs",
///     request_timeout: "30s",
///     max_retries: 2,
///     retry_delay: "1s",
///     cache_dir: Some("cache/epsg"),
/// )
/// ```
/// All fields are optional.
#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct Tif2JsConfig {
    pub epsg_url_template: String,

    /// the geographic CRS used on both the producing and the consuming (proj4js) side
    pub geographic_proj: String,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub request_timeout: Duration,

    /// 0 means a single attempt
    pub max_retries: u32,

    /// base delay that is doubled for each retry
    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub retry_delay: Duration,

    pub cache_dir: Option<PathBuf>,
}

impl Default for Tif2JsConfig {
    fn default()->Self {
        Tif2JsConfig {
            epsg_url_template: DEFAULT_EPSG_URL_TEMPLATE.to_string(),
            geographic_proj: DEFAULT_GEOGRAPHIC_PROJ.to_string(),
            request_timeout: secs(30),
            max_retries: 0,
            retry_delay: secs(1),
            cache_dir: None,
        }
    }
}

pub fn load_config (path: impl AsRef<Path>)->Result<Tif2JsConfig> {
    let data = file_contents_as_string(path)?;
    parse_config( &data)
}

pub fn parse_config (s: &str)->Result<Tif2JsConfig> {
    Ok( ron::from_str(s)? )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let input = r#"Tif2JsConfig( max_retries: 3, retry_delay: "500ms", cache_dir: Some("/tmp/epsg") )"#;
        let config = parse_config(input).unwrap();
        assert_eq!( config.max_retries, 3);
        assert_eq!( config.retry_delay, Duration::from_millis(500));
        assert_eq!( config.cache_dir, Some(PathBuf::from("/tmp/epsg")));
        assert_eq!( config.epsg_url_template, DEFAULT_EPSG_URL_TEMPLATE);
        assert_eq!( config.request_timeout, secs(30));
    }

    #[test]
    fn test_empty_config() {
        assert_eq!( parse_config("()").unwrap(), Tif2JsConfig::default());
    }

    #[test]
    fn test_bad_config() {
        assert!( parse_config(r#"Tif2JsConfig( request_timeout: "forever" )"#).is_err());
    }
}
