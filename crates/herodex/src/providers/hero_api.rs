//! Catalog HTTP provider
//!
//! Implementation of `HeroApi` for the heroes REST service
//! (`{base}/api/heroes`).

use crate::config::api::HEROES_PATH;
use crate::data::types::{Hero, HeroPage, SummaryInformation};
use crate::error::{HeroError, Result};
use crate::network::HttpClient;

use super::traits::HeroApi;
use super::types::{PageRequest, SearchParams};

use reqwest::Url;

/// HTTP-backed hero catalog
pub struct HttpHeroApi {
    client: HttpClient,
    base_url: String,
}

impl HttpHeroApi {
    /// Create a provider for the catalog served at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Server root, also used to build image URLs
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL of the heroes resource, optionally with one extra
    /// path segment (percent-encoded)
    fn url(&self, segment: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}/", self.base_url, HEROES_PATH))
            .map_err(|e| HeroError::Config(format!("Invalid API URL '{}': {}", self.base_url, e)))?;
        if let Some(segment) = segment {
            url.path_segments_mut()
                .map_err(|_| HeroError::Config(format!("Invalid API URL '{}'", self.base_url)))?
                .pop_if_empty()
                .push(segment);
        }
        Ok(url)
    }
}

impl HeroApi for HttpHeroApi {
    fn get_hero(&self, id_slug: &str) -> Result<Hero> {
        if id_slug.trim().is_empty() {
            return Err(HeroError::NotFound("hero with empty identifier".to_string()));
        }
        let hero: Hero = self
            .client
            .get_json(self.url(Some(id_slug))?.as_str())
            .map_err(|e| match e {
                HeroError::NotFound(_) => HeroError::NotFound(format!("hero '{}'", id_slug)),
                other => other,
            })?;
        Ok(hero.resolve_image(&self.base_url))
    }

    fn get_heroes_page(&self, request: &PageRequest) -> Result<HeroPage> {
        let page: HeroPage = self
            .client
            .get_json_with_query(self.url(None)?.as_str(), &request.params())?;
        Ok(page.resolve_images(&self.base_url))
    }

    fn get_summary(&self) -> Result<SummaryInformation> {
        self.client.get_json(self.url(Some("summary"))?.as_str())
    }

    fn search_heroes(&self, params: &SearchParams) -> Result<Vec<Hero>> {
        let heroes: Vec<Hero> = self
            .client
            .get_json_with_query(self.url(Some("search"))?.as_str(), &params.params())?;
        Ok(heroes
            .into_iter()
            .map(|hero| hero.resolve_image(&self.base_url))
            .collect())
    }
}

// =============================================================================
// Tests
// =============================================================================
