use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable category identifier, derived once from the dataset's display
/// label at load time and carried on every product. Never re-derived at
/// render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Slugify a display label: lowercase, runs of whitespace become `-`,
    /// remaining non-word characters are dropped.
    pub fn from_label(label: &str) -> Self {
        let mut slug = String::with_capacity(label.len());
        for part in label.split_whitespace() {
            if !slug.is_empty() {
                slug.push('-');
            }
            slug.extend(
                part.chars()
                    .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
                    .flat_map(char::to_lowercase),
            );
        }
        Self(slug)
    }

    /// Wrap an already-slugged key, e.g. one typed on the command line.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog category: stable key plus the display label it was derived
/// from. Display order is dataset declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: CategoryKey,
    pub label: String,
}

/// One catalog entry. `name` is the identity key across the whole catalog
/// (wishlist membership and supplementary data are keyed by it); the
/// loader rejects duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Assigned by the loader from the dataset's grouping key.
    #[serde(skip)]
    pub category: CategoryKey,
    /// `None` means the price is unknown.
    #[serde(default)]
    pub price: Option<u32>,
    /// Curator-endorsed item.
    #[serde(default)]
    pub pick: bool,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub url: String,
}

/// Optional per-product detail shown on demand. Any fields beyond
/// `images` and `video_links` are free-form named notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplementaryRecord {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub video_links: Vec<String>,
    #[serde(flatten)]
    pub notes: serde_json::Map<String, serde_json::Value>,
}
