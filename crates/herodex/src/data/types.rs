//! Common data types for the hero catalog
//!
//! Shared types used across the data, provider and app modules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::api::IMAGES_PATH;

// =============================================================================
// Hero - Catalog entry
// =============================================================================

/// A hero as served by the catalog
///
/// Only the identifier matters to favorites and caching, so a hero is kept
/// as the JSON object it arrived as. Descriptive fields are read through
/// lenient accessors and serialize back exactly as received, including
/// nulls, empty values and fields of unexpected types.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Hero {
    fields: Map<String, Value>,
}

impl Hero {
    /// Create a hero with only an identifier and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::default()
            .with_field("id", id.into())
            .with_field("name", name.into())
    }

    /// Wrap a JSON value; anything but an object is rejected
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Catalog identifier, empty if missing or not a string
    pub fn id(&self) -> &str {
        self.text("id").unwrap_or("")
    }

    /// Whether the hero carries a non-empty string identifier
    pub fn has_id(&self) -> bool {
        !self.id().is_empty()
    }

    /// Display name, empty if missing or not a string
    pub fn name(&self) -> &str {
        self.text("name").unwrap_or("")
    }

    /// Image file name, or an absolute URL once resolved
    pub fn image(&self) -> Option<&str> {
        self.text("image")
    }

    /// "Hero" or "Villain"
    pub fn category(&self) -> Option<&str> {
        self.text("category")
    }

    pub fn strength(&self) -> Option<f64> {
        self.stat("strength")
    }

    pub fn intelligence(&self) -> Option<f64> {
        self.stat("intelligence")
    }

    /// String value of `key`, `None` if absent or of another type
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Numeric value of `key`; numeric strings such as `"9"` are accepted
    pub fn stat(&self, key: &str) -> Option<f64> {
        match self.fields.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Raw value of `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields in the order they were received
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Set `key`, keeping its position if already present
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Create with an extra field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Create with an image file name
    pub fn with_image(self, image: impl Into<String>) -> Self {
        self.with_field("image", image.into())
    }

    /// Create with a category
    pub fn with_category(self, category: impl Into<String>) -> Self {
        self.with_field("category", category.into())
    }

    /// Create with strength and intelligence stats
    pub fn with_stats(self, strength: u32, intelligence: u32) -> Self {
        self.with_field("strength", strength)
            .with_field("intelligence", intelligence)
    }

    /// Rewrite the image file name into an absolute URL under `base_url`
    ///
    /// `"4.jpeg"` becomes `"{base_url}/images/4.jpeg"`. Heroes without a
    /// string image are left alone.
    pub fn resolve_image(mut self, base_url: &str) -> Self {
        if let Some(image) = self.image() {
            let url = image_url(base_url, image);
            self.set("image", url);
        }
        self
    }
}

/// Absolute URL of a catalog image
pub fn image_url(base_url: &str, image: &str) -> String {
    format!(
        "{}{}/{}",
        base_url.trim_end_matches('/'),
        IMAGES_PATH,
        image.trim_start_matches('/')
    )
}

// =============================================================================
// HeroPage - One page of the catalog listing
// =============================================================================

/// A page of heroes plus the totals needed to render pagination
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HeroPage {
    /// Total number of heroes matching the category
    #[serde(default)]
    pub total: u32,
    /// Total number of pages at the requested limit
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub heroes: Vec<Hero>,
}

impl HeroPage {
    /// Rewrite every hero image into an absolute URL
    pub fn resolve_images(mut self, base_url: &str) -> Self {
        self.heroes = self
            .heroes
            .into_iter()
            .map(|hero| hero.resolve_image(base_url))
            .collect();
        self
    }
}

// =============================================================================
// SummaryInformation - Catalog statistics
// =============================================================================

/// Aggregate catalog statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInformation {
    pub total_heroes: u32,
    pub strongest_hero: Hero,
    pub smartest_hero: Hero,
    pub hero_count: u32,
    pub villain_count: u32,
}
