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

mod common;

use std::fs;
use tif2js::*;
use common::*;

const UTM10: &str = "+proj=utm +zone=10 +datum=WGS84 +units=m +no_defs";

#[test]
fn test_custom_definition_passthrough() {
    let lookup = FixedLookup::new( Some(UTM10));
    let resolver = CrsResolver::new( lookup.clone());

    let proj = resolver.resolve( &CrsDescriptor::Definition( CUSTOM_PROJ.to_string())).unwrap();
    assert_eq!( proj.as_str(), CUSTOM_PROJ);
    assert_eq!( lookup.calls.get(), 0);

    assert!( resolver.resolve( &CrsDescriptor::Definition( String::new())).is_err());

    // only surrounding whitespace is removed, the definition itself is passed through verbatim
    let padded = format!(" \n{CUSTOM_PROJ}\t\n");
    let proj = resolver.resolve( &CrsDescriptor::Definition( padded)).unwrap();
    assert_eq!( proj.as_str(), CUSTOM_PROJ);
    assert!( resolver.resolve( &CrsDescriptor::Definition( " \n ".to_string())).is_err());
    assert_eq!( lookup.calls.get(), 0);
}

#[test]
fn test_cached_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let lookup = FixedLookup::new( Some(UTM10));
    let cached = CachedEpsgLookup::new( lookup.clone(), dir.path());

    assert_eq!( cached.lookup(32610).unwrap(), UTM10);
    assert_eq!( lookup.calls.get(), 1);
    assert_eq!( fs::read_to_string( cached.cache_path(32610)).unwrap(), UTM10);

    assert_eq!( cached.lookup(32610).unwrap(), UTM10); // now from cache
    assert_eq!( lookup.calls.get(), 1);

    assert_eq!( cached.lookup(32611).unwrap(), UTM10); // different code is a miss
    assert_eq!( lookup.calls.get(), 2);
}

#[test]
fn test_cache_miss_with_failing_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let lookup = FixedLookup::new( None);
    let resolver = CrsResolver::new( CachedEpsgLookup::new( lookup.clone(), dir.path()));

    assert!( matches!( resolver.resolve( &CrsDescriptor::Epsg(4326)), Err(Tif2JsError::ProjectionResolutionFailure(_))));
    assert_eq!( lookup.calls.get(), 1);
    assert!( !dir.path().join("epsg_4326.proj4").exists());
}

#[test]
fn test_offline_cache_hit() {
    let dir = tempfile::tempdir().unwrap();
    fs::write( dir.path().join("epsg_32610.proj4"), UTM10).unwrap();

    let lookup = FixedLookup::new( None); // service is down
    let resolver = CrsResolver::new( CachedEpsgLookup::new( lookup.clone(), dir.path()));

    assert_eq!( resolver.resolve( &CrsDescriptor::Epsg(32610)).unwrap().as_str(), UTM10);
    assert_eq!( lookup.calls.get(), 0);
}

#[test]
fn test_resolver_from_config() {
    let config = Tif2JsConfig::default();
    assert!( CrsResolver::from_config( &config).is_ok());

    let config = Tif2JsConfig { epsg_url_template: "https://epsg.io/".to_string(), ..Tif2JsConfig::default() };
    assert!( CrsResolver::from_config( &config).is_err());
}
