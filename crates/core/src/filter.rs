use crate::domain::{CategoryKey, Product};
use crate::error::{Error, Result};

/// Current values of the four filter controls. Defaults are
/// all-permissive; each control mutates exactly one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Matched case-insensitively as a substring of the product name.
    pub search: String,
    pub category: CategoryFilter,
    pub price: PriceFilter,
    pub picks_only: bool,
}

impl FilterState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CategoryFilter {
    #[default]
    All,
    Key(CategoryKey),
}

/// Inclusive price bracket. `max: None` is an open-ended range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceFilter {
    #[default]
    All,
    Range { min: u32, max: Option<u32> },
}

impl PriceFilter {
    /// Parse the filter-control vocabulary: `all`, `min-max`, or `min+`.
    pub fn parse(raw: &str) -> Result<Self> {
        let s = raw.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if let Some(min) = s.strip_suffix('+') {
            let min = min
                .parse()
                .map_err(|_| Error::InvalidPriceRange(raw.to_string()))?;
            return Ok(Self::Range { min, max: None });
        }
        if let Some((min, max)) = s.split_once('-') {
            let min: u32 = min
                .parse()
                .map_err(|_| Error::InvalidPriceRange(raw.to_string()))?;
            let max: u32 = max
                .parse()
                .map_err(|_| Error::InvalidPriceRange(raw.to_string()))?;
            if min > max {
                return Err(Error::InvalidPriceRange(raw.to_string()));
            }
            return Ok(Self::Range {
                min,
                max: Some(max),
            });
        }
        Err(Error::InvalidPriceRange(raw.to_string()))
    }

    /// An unknown price never matches a concrete range; bounds are
    /// inclusive on both ends.
    pub fn matches(&self, price: Option<u32>) -> bool {
        match self {
            Self::All => true,
            Self::Range { min, max } => match price {
                None => false,
                Some(p) => p >= *min && max.map_or(true, |m| p <= m),
            },
        }
    }
}

/// Filtered products regrouped by category, in first-seen order among the
/// filtered results.
pub type GroupedProducts<'a> = Vec<(CategoryKey, Vec<&'a Product>)>;

/// Pure filter pass: all four predicates ANDed, then regrouped. The
/// result depends only on the inputs.
pub fn apply<'a>(products: &'a [Product], filters: &FilterState) -> GroupedProducts<'a> {
    group(products.iter().filter(|p| matches(p, filters)))
}

pub fn matches(product: &Product, filters: &FilterState) -> bool {
    if !filters.search.is_empty() {
        let needle = filters.search.to_lowercase();
        if !product.name.to_lowercase().contains(&needle) {
            return false;
        }
    }
    if let CategoryFilter::Key(key) = &filters.category {
        if product.category != *key {
            return false;
        }
    }
    if !filters.price.matches(product.price) {
        return false;
    }
    if filters.picks_only && !product.pick {
        return false;
    }
    true
}

/// Group products by category key, first-seen order preserved.
pub fn group<'a>(products: impl IntoIterator<Item = &'a Product>) -> GroupedProducts<'a> {
    let mut groups: GroupedProducts<'a> = Vec::new();
    for product in products {
        match groups.iter_mut().find(|(key, _)| *key == product.category) {
            Some((_, members)) => members.push(product),
            None => groups.push((product.category.clone(), vec![product])),
        }
    }
    groups
}
