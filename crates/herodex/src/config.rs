//! Configuration for herodex services
//!
//! Compile-time defaults live in the nested modules; [`Config`] carries the
//! values that can be overridden from the environment at startup.

use std::env;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::data::storage;
use crate::error::Result;

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "herodex";
}

/// Catalog API configuration
pub mod api {
    /// Default catalog server, used when `HERODEX_API_URL` is not set
    pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

    /// Path of the heroes resource, relative to the base URL
    pub const HEROES_PATH: &str = "/api/heroes";

    /// Path of the image directory, relative to the base URL
    pub const IMAGES_PATH: &str = "/images";

    /// Environment variable overriding the base URL
    pub const BASE_URL_ENV: &str = "HERODEX_API_URL";
}

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("Herodex/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Read timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 30;
}

/// Favorites persistence
pub mod favorites {
    /// Storage key holding the serialized favorite set
    pub const STORAGE_KEY: &str = "favorites";

    /// Environment variable overriding the data directory
    pub const DATA_DIR_ENV: &str = "HERODEX_DATA_DIR";
}

/// Pagination defaults
pub mod pagination {
    /// Query parameter carrying the current page
    pub const PAGE_PARAM: &str = "page";

    /// Heroes per page when the caller does not specify a limit
    pub const DEFAULT_LIMIT: u32 = 6;

    /// Category requested when the caller does not specify one
    pub const DEFAULT_CATEGORY: &str = "all";

    /// Maximum number of page buttons rendered by a pagination control
    pub const MAX_PAGE_BUTTONS: u32 = 7;
}

/// Query cache configuration
pub mod queries {
    /// How long a successful hero list stays fresh (seconds)
    pub const PAGE_STALE_SECS: u64 = 5 * 60;

    /// How long a successful summary stays fresh (seconds)
    pub const SUMMARY_STALE_SECS: u64 = 60;

    /// Entries kept per query cache before the oldest is evicted
    pub const MAX_CACHED_QUERIES: usize = 100;
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog server base URL, without a trailing slash
    pub api_base_url: String,
    /// Directory holding persisted client state
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn load() -> Result<Self> {
        let api_base_url = match env::var(api::BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => {
                info!(
                    "{} not set, using default: {}",
                    api::BASE_URL_ENV,
                    api::DEFAULT_BASE_URL
                );
                api::DEFAULT_BASE_URL.to_string()
            }
        };

        let data_dir = match env::var(favorites::DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => storage::config_dir()?,
        };
        debug!(?data_dir, "resolved data directory");

        Ok(Self::new(api_base_url, data_dir))
    }

    /// Build a configuration from explicit values
    pub fn new(api_base_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            data_dir: data_dir.into(),
        }
    }

    /// Override the catalog base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = Config::new("http://localhost:3001/", "/tmp/herodex");
        assert_eq!(config.api_base_url, "http://localhost:3001");
    }

    #[test]
    fn test_overrides() {
        let config = Config::new(api::DEFAULT_BASE_URL, "/tmp/a")
            .with_api_base_url("https://heroes.example.com//")
            .with_data_dir("/tmp/b");
        assert_eq!(config.api_base_url, "https://heroes.example.com");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/b"));
    }

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(pagination::DEFAULT_LIMIT, 6);
        assert_eq!(pagination::DEFAULT_CATEGORY, "all");
        assert_eq!(pagination::PAGE_PARAM, "page");
    }
}
