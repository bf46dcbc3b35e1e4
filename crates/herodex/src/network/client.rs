//! Shared HTTP client wrapper
//!
//! Thin wrapper around `reqwest::blocking::Client` that centralizes
//! USER_AGENT, timeout configuration and status handling.

use crate::config::network::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, USER_AGENT};
use crate::error::{HeroError, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Shared HTTP client with standard configuration
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a new client with default Herodex settings
    pub fn new() -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .build()?;
        Ok(Self { inner })
    }

    /// GET a URL and deserialize the JSON response
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_json_with_query(url, &[])
    }

    /// GET a URL with query parameters and deserialize the JSON response
    ///
    /// A 404 becomes [`HeroError::NotFound`]; any other non-success status is
    /// reported as a network error.
    pub fn get_json_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        debug!(url, ?params, "GET");
        let resp = self.inner.get(url).query(params).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(HeroError::NotFound(resp.url().to_string()));
        }
        let data = resp.error_for_status()?.json::<T>()?;
        Ok(data)
    }
}
