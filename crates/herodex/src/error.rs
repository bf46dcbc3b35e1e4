//! Error types for Herodex
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for Herodex services
#[derive(Error, Debug)]
pub enum HeroError {
    #[error("{}", friendly_network_error(.0))]
    Network(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for Herodex
pub type Result<T> = std::result::Result<T, HeroError>;

fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_builder() {
        if let Some(url) = e.url() {
            return format!("Invalid URL: {url}");
        }
        return "Invalid URL".to_string();
    }
    if e.is_connect() {
        if let Some(url) = e.url() {
            return format!("Could not connect to {}", url.host_str().unwrap_or("server"));
        }
        return "Could not connect to server".to_string();
    }
    if e.is_timeout() {
        return "Connection timed out".to_string();
    }
    if e.is_status() {
        if let Some(status) = e.status() {
            return format!("Request failed with status code {}", status.as_u16());
        }
    }
    if e.is_decode() {
        return "Invalid response from server".to_string();
    }
    format!("Network error: {e}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = HeroError::NotFound("hero 'batman-2'".to_string());
        assert_eq!(err.to_string(), "Not found: hero 'batman-2'");
    }

    #[test]
    fn test_network_error_is_friendly() {
        let err = reqwest::blocking::Client::new()
            .get("http://invalid.invalid.invalid")
            .send()
            .unwrap_err();
        let err: HeroError = err.into();
        assert!(!err.to_string().is_empty());
    }
}
