//! Pure projections from domain state to display-ready view trees.
//! Renderers never read or write filter/wishlist state themselves; both
//! are injected, so identical inputs always produce identical views.

use crate::catalog::Catalog;
use crate::domain::{CategoryKey, Product, SupplementaryRecord};
use crate::filter::GroupedProducts;

/// Neutral label shown when a product's price is unknown.
pub const PRICE_PLACEHOLDER: &str = "Check Price";

/// Distinguishes the user's own interactive rendering from a read-only
/// rendering of someone else's shared wishlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContext {
    Browsable,
    SharedReadOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogView {
    Groups(Vec<CategoryBlock>),
    /// Active filters excluded every product. Only produced when the
    /// filters are not at their defaults.
    NoMatches,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBlock {
    pub key: CategoryKey,
    pub label: String,
    pub count: usize,
    pub items: Vec<ItemView>,
}

/// Image reference with the broken-image policy applied: a blank path
/// renders as a placeholder glyph, never as a dangling reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    Path(String),
    Placeholder,
}

impl ImageSlot {
    fn from_path(path: &str) -> Self {
        if path.trim().is_empty() {
            Self::Placeholder
        } else {
            Self::Path(path.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub name: String,
    pub pick: bool,
    pub price_label: String,
    pub image: ImageSlot,
    pub url: String,
    /// Wishlist membership marker; always false in read-only renderings.
    pub favorited: bool,
    /// Whether a supplementary record exists for this product.
    pub has_info: bool,
    /// Favorite/share affordances are present only in browsable views.
    pub interactive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplementaryView {
    pub title: String,
    pub images: Vec<String>,
    /// Only the first video link is surfaced, even if more exist.
    pub video_link: Option<String>,
    pub notes: Vec<NoteSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteSection {
    pub heading: String,
    pub body: String,
}

/// Project grouped products into ordered category blocks. An empty
/// grouping renders the dedicated no-matches state only when the filters
/// are not at their defaults.
pub fn render_catalog(
    catalog: &Catalog,
    grouped: &GroupedProducts<'_>,
    favorites: &[String],
    ctx: RenderContext,
    filters_default: bool,
) -> CatalogView {
    if grouped.is_empty() && !filters_default {
        return CatalogView::NoMatches;
    }
    let blocks = grouped
        .iter()
        .map(|(key, members)| {
            let label = catalog
                .category_label(key)
                .map(str::to_string)
                .unwrap_or_else(|| key.to_string());
            CategoryBlock {
                key: key.clone(),
                label,
                count: members.len(),
                items: members
                    .iter()
                    .map(|product| {
                        let favorited = ctx == RenderContext::Browsable
                            && favorites.iter().any(|n| n == &product.name);
                        render_item(
                            product,
                            catalog.supplementary(&product.name).is_some(),
                            favorited,
                            ctx,
                        )
                    })
                    .collect(),
            }
        })
        .collect();
    CatalogView::Groups(blocks)
}

pub fn render_item(
    product: &Product,
    has_info: bool,
    favorited: bool,
    ctx: RenderContext,
) -> ItemView {
    ItemView {
        name: product.name.clone(),
        pick: product.pick,
        price_label: price_label(product.price),
        image: ImageSlot::from_path(&product.image),
        url: product.url.clone(),
        favorited: ctx == RenderContext::Browsable && favorited,
        has_info,
        interactive: ctx == RenderContext::Browsable,
    }
}

pub fn render_supplementary(name: &str, record: &SupplementaryRecord) -> SupplementaryView {
    let images: Vec<String> = record
        .images
        .iter()
        .filter(|path| !path.trim().is_empty())
        .cloned()
        .collect();
    let video_link = record
        .video_links
        .iter()
        .find(|link| !link.trim().is_empty())
        .cloned();
    let notes = record
        .notes
        .iter()
        .filter_map(|(key, value)| {
            let body = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if body.trim().is_empty() {
                None
            } else {
                Some(NoteSection {
                    heading: title_case(key),
                    body,
                })
            }
        })
        .collect();
    SupplementaryView {
        title: format!("More about {name}"),
        images,
        video_link,
        notes,
    }
}

pub fn price_label(price: Option<u32>) -> String {
    match price {
        Some(price) => format!("${price}"),
        None => PRICE_PLACEHOLDER.to_string(),
    }
}

/// Capitalize each `_`/whitespace-separated word for note headings.
fn title_case(key: &str) -> String {
    key.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
