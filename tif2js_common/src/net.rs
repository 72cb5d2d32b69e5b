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

//! common utility functions for (blocking) network operations

use std::{thread, time::Duration};
use reqwest::{blocking::Client, StatusCode};
use tracing::{debug, warn};

use crate::{define_error, datetime::backoff_delay};

define_error!{ pub NetError = 
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, NetError>;

/// create a blocking client. A zero timeout means we rely on the transport defaults
pub fn blocking_client (timeout: Duration) -> Result<Client> {
    let mut builder = Client::builder();
    if !timeout.is_zero() {
        builder = builder.timeout(timeout);
    }
    Ok( builder.build()? )
}

/// retrieve the body of a GET request as text. Anything other than a 200 response is an error
pub fn get_text (client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send()?;

    match response.status() {
        StatusCode::OK => {
            Ok( response.text()? )
        }
        StatusCode::NOT_FOUND => {
            Err( NetError::NotFoundError(format!("{url}")))
        }
        other => {
            Err( NetError::OpFailed(format!("response status {other:?}")))
        }
    }
}

/// `get_text` with up to `max_retries` additional attempts, waiting `retry_delay` * 2^retry in between.
/// NotFound responses are not retried since they are not transient
pub fn get_text_with_retry (client: &Client, url: &str, max_retries: u32, retry_delay: Duration) -> Result<String> {
    let mut retry = 0;
    loop {
        debug!("GET {url} (attempt {})", retry+1);
        match get_text( client, url) {
            Ok(text) => return Ok(text),
            Err(e @ NetError::NotFoundError(_)) => return Err(e),
            Err(e) => {
                if retry < max_retries {
                    let delay = backoff_delay( retry_delay, retry);
                    warn!("GET {url} failed: {e}, retry {}/{} in {:?}", retry+1, max_retries, delay);
                    thread::sleep(delay);
                    retry += 1;
                } else {
                    return Err(e)
                }
            }
        }
    }
}
