//! Query-string state
//!
//! The current URL is an external input: readers go through `get_param`,
//! writers through `set_param`, and nothing else caches the values.

use crate::error::{HeroError, Result};
use reqwest::Url;

/// Read/write access to URL query parameters
pub trait QueryParams {
    /// First value of `key`, percent-decoded
    fn get_param(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, leaving every other parameter untouched
    fn set_param(&mut self, key: &str, value: &str);
}

/// The current location of a session
///
/// Updates replace the URL in place; no history entry is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Parse an absolute URL
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| HeroError::Config(format!("Invalid location '{}': {}", url, e)))?;
        Ok(Self { url })
    }

    pub fn from_url(url: Url) -> Self {
        Self { url }
    }

    /// Full URL
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Raw query string without the leading `?`
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl QueryParams for Location {
    fn get_param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Only the segment for `key` is rewritten; every other segment keeps
    /// its original encoding and position.
    fn set_param(&mut self, key: &str, value: &str) {
        let mut scratch = self.url.clone();
        let encoded = encode_pair(&mut scratch, key, value);
        let mut replaced = false;
        let mut segments: Vec<&str> = Vec::new();
        for segment in self.url.query().unwrap_or("").split('&') {
            if segment.is_empty() {
                continue;
            }
            if segment_key(&mut scratch, segment).as_deref() != Some(key) {
                segments.push(segment);
            } else if !replaced {
                replaced = true;
                segments.push(&encoded);
            }
            // later duplicates of the key are dropped
        }
        if !replaced {
            segments.push(&encoded);
        }
        let query = segments.join("&");
        self.url.set_query(Some(&query));
    }
}

/// Decoded key of one raw `k=v` query segment
fn segment_key(scratch: &mut Url, segment: &str) -> Option<String> {
    scratch.set_query(Some(segment));
    let key = scratch.query_pairs().next().map(|(k, _)| k.into_owned());
    key
}

/// Form-encoded `key=value`
fn encode_pair(scratch: &mut Url, key: &str, value: &str) -> String {
    scratch.set_query(None);
    scratch.query_pairs_mut().append_pair(key, value);
    scratch.query().unwrap_or_default().to_string()
}
