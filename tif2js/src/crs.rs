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

//! resolution of raster CRS descriptors into projection definitions that can be used by
//! client side projection libraries (proj4js)

use std::{fmt, fs, path::{Path,PathBuf}, time::Duration};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::blocking::Client;
use tracing::{debug, info, warn};
use tif2js_common::{fs::write_file_atomically, net::{blocking_client, get_text_with_retry}};

use crate::config::Tif2JsConfig;
use crate::errors::{Result, projection_failed};

lazy_static! {
    // "+init=epsg:32610" is how decoders report plain EPSG CRS as proj4, "EPSG:32610" is the authority form
    static ref EPSG_INIT_RE: Regex = Regex::new( r"^\s*(?i:\+init=epsg:|epsg:)(\d+)\s*$").unwrap();
}

/// opaque CRS identity of a raster
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum CrsDescriptor {
    Epsg(u32),
    Definition(String)
}

impl CrsDescriptor {
    /// parse a proj4/authority string, recognizing plain EPSG references
    pub fn from_proj4 (s: &str)->CrsDescriptor {
        if let Some(code) = EPSG_INIT_RE.captures(s).and_then( |c| c[1].parse::<u32>().ok()) {
            CrsDescriptor::Epsg(code)
        } else {
            CrsDescriptor::Definition( s.trim().to_string())
        }
    }

    pub fn is_epsg_code (&self)->bool {
        matches!( self, CrsDescriptor::Epsg(_))
    }

    pub fn epsg_code (&self)->Option<u32> {
        match self {
            CrsDescriptor::Epsg(code) => Some(*code),
            CrsDescriptor::Definition(_) => None
        }
    }

    /// the native projection definition. EPSG codes use the "+init=epsg:" form
    pub fn to_proj4 (&self)->String {
        match self {
            CrsDescriptor::Epsg(code) => format!("+init=epsg:{code}"),
            CrsDescriptor::Definition(def) => def.clone()
        }
    }
}

impl fmt::Display for CrsDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrsDescriptor::Epsg(code) => write!(f, "EPSG:{code}"),
            CrsDescriptor::Definition(def) => write!(f, "{def}")
        }
    }
}

/// a non-empty textual projection definition (proj4 style)
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct ProjectionString(String);

impl ProjectionString {
    pub fn new (s: impl AsRef<str>)->Result<Self> {
        let s = s.as_ref().trim();
        if s.is_empty() {
            Err( projection_failed("empty projection definition"))
        } else {
            Ok( ProjectionString( s.to_string()) )
        }
    }

    pub fn as_str (&self)->&str { self.0.as_str() }
}

impl fmt::Display for ProjectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/* #region EPSG lookup ****************************************************************************************/

/// external service that maps a numeric EPSG code to its projection definition text
pub trait EpsgLookup {
    fn lookup (&self, code: u32)->Result<String>;
}

impl <T: EpsgLookup + ?Sized> EpsgLookup for Box<T> {
    fn lookup (&self, code: u32)->Result<String> { (**self).lookup(code) }
}

/// blocking HTTP lookup (e.g. epsg.io). The url template has a `{code}` placeholder
pub struct HttpEpsgLookup {
    client: Client,
    url_template: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpEpsgLookup {
    pub fn new (url_template: impl ToString, timeout: Duration, max_retries: u32, retry_delay: Duration)->Result<Self> {
        let url_template = url_template.to_string();
        if !url_template.contains("{code}") {
            return Err( projection_failed( format!("EPSG url template has no {{code}} placeholder: {url_template}")))
        }
        let client = blocking_client(timeout)?;
        Ok( HttpEpsgLookup { client, url_template, max_retries, retry_delay } )
    }

    pub fn from_config (config: &Tif2JsConfig)->Result<Self> {
        Self::new( &config.epsg_url_template, config.request_timeout, config.max_retries, config.retry_delay)
    }

    pub fn url_for (&self, code: u32)->String {
        self.url_template.replace("{code}", &code.to_string())
    }
}

impl EpsgLookup for HttpEpsgLookup {
    fn lookup (&self, code: u32)->Result<String> {
        let url = self.url_for(code);
        info!("retrieving projection definition for EPSG:{code} from {url}");
        get_text_with_retry( &self.client, &url, self.max_retries, self.retry_delay)
            .map_err( |e| projection_failed( format!("EPSG:{code} lookup failed: {e}")))
    }
}

/// lookup decorator that stores retrieved definitions as `<dir>/epsg_<code>.proj4` and answers
/// from there on subsequent runs. A cache miss falls through to the wrapped lookup
pub struct CachedEpsgLookup<L: EpsgLookup> {
    inner: L,
    cache_dir: PathBuf,
}

impl <L: EpsgLookup> CachedEpsgLookup<L> {
    pub fn new (inner: L, cache_dir: impl AsRef<Path>)->Self {
        CachedEpsgLookup { inner, cache_dir: cache_dir.as_ref().to_path_buf() }
    }

    pub fn cache_path (&self, code: u32)->PathBuf {
        self.cache_dir.join( format!("epsg_{code}.proj4"))
    }
}

impl <L: EpsgLookup> EpsgLookup for CachedEpsgLookup<L> {
    fn lookup (&self, code: u32)->Result<String> {
        let path = self.cache_path(code);
        if let Ok(def) = fs::read_to_string(&path) {
            if !def.trim().is_empty() {
                debug!("using cached projection definition {:?}", path);
                return Ok(def)
            }
        }

        let def = self.inner.lookup(code)?;
        if let Err(e) = write_file_atomically( &path, def.as_bytes()) { // a failing cache write does not fail the lookup
            warn!("failed to cache projection definition in {:?}: {e}", path);
        }
        Ok(def)
    }
}

/* #endregion EPSG lookup */

/// turns CRS descriptors into ProjectionStrings. EPSG codes are looked up since proj4js does not know them,
/// all other definitions are passed through unchanged
pub struct CrsResolver {
    lookup: Box<dyn EpsgLookup>,
}

impl CrsResolver {
    pub fn new (lookup: impl EpsgLookup + 'static)->Self {
        CrsResolver { lookup: Box::new(lookup) }
    }

    /// HTTP lookup, optionally wrapped into a file cache if the config has a `cache_dir`
    pub fn from_config (config: &Tif2JsConfig)->Result<Self> {
        let http = HttpEpsgLookup::from_config(config)?;
        if let Some(dir) = &config.cache_dir {
            Ok( CrsResolver::new( CachedEpsgLookup::new( http, dir)) )
        } else {
            Ok( CrsResolver::new( http) )
        }
    }

    pub fn resolve (&self, crs: &CrsDescriptor)->Result<ProjectionString> {
        match crs {
            CrsDescriptor::Epsg(code) => {
                let def = self.lookup.lookup(*code)?;
                let proj = ProjectionString::new(def)
                    .map_err( |_| projection_failed( format!("empty projection definition for EPSG:{code}")))?;
                debug!("EPSG:{code} resolved to '{proj}'");
                Ok(proj)
            }
            CrsDescriptor::Definition(def) => {
                ProjectionString::new( def)
            }
        }
    }
}
