pub mod catalog;
pub mod controller;
pub mod domain;
pub mod error;
pub mod filter;
pub mod render;
pub mod share;
pub mod state;
pub mod wishlist;

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::warn;

use catalog::Catalog;
use domain::Product;
use error::{Error, Result};
use filter::FilterState;
use render::{CatalogView, RenderContext, SupplementaryView};
use state::StateStore;
use wishlist::Wishlist;

/// State-store key for the configured share base URL.
pub const SHARE_BASE_KEY: &str = "share_base_url";
/// Base URL used for share links until one is configured.
pub const DEFAULT_SHARE_BASE: &str = "https://gearshelf.example/catalog";

/// The main entry point: an opened catalog plus the local wishlist state.
#[derive(Debug)]
pub struct Shelf {
    catalog: Catalog,
    state: StateStore,
    wishlist: Wishlist,
    degraded: bool,
}

impl Shelf {
    /// Load the catalog and open the local state store. A missing or
    /// malformed dataset is fatal; an unusable state store degrades to
    /// in-memory operation so browsing still works.
    pub fn open(data: &Path, extra: Option<&Path>, state_path: &Path) -> Result<Self> {
        let catalog = Catalog::load_files(data, extra)?;
        let (state, degraded) = match StateStore::open(state_path) {
            Ok(state) => (state, false),
            Err(err) => {
                warn!(%err, path = %state_path.display(),
                    "state store unavailable, wishlist changes will not persist");
                (StateStore::open_in_memory()?, true)
            }
        };
        let wishlist = Wishlist::load(&state);
        Ok(Self {
            catalog,
            state,
            wishlist,
            degraded,
        })
    }

    /// Assemble a shelf from pre-built parts (used by tests and tools
    /// that load datasets from somewhere other than files).
    pub fn with_state(catalog: Catalog, state: StateStore) -> Self {
        let wishlist = Wishlist::load(&state);
        Self {
            catalog,
            state,
            wishlist,
            degraded: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// True when the on-disk state store could not be opened and wishlist
    /// changes are held in memory only.
    pub fn persistence_degraded(&self) -> bool {
        self.degraded
    }

    /// Flip wishlist membership for a catalog product. Persists before
    /// returning so any subsequent render sees the new state.
    pub fn toggle_wish(&mut self, name: &str) -> Result<bool> {
        if self.catalog.product(name).is_none() {
            return Err(Error::UnknownProduct(name.to_string()));
        }
        Ok(self.wishlist.toggle(&self.state, name))
    }

    pub fn clear_wishlist(&mut self) -> usize {
        self.wishlist.clear(&self.state)
    }

    /// Merge a decoded shared wishlist into the persisted one. Callers
    /// confirm with the user first; this is never done automatically.
    pub fn import_wishlist(&mut self, names: &[String]) -> usize {
        self.wishlist.import(&self.state, names)
    }

    pub fn share_base(&self) -> String {
        self.state
            .get(SHARE_BASE_KEY)
            .ok()
            .flatten()
            .unwrap_or_else(|| DEFAULT_SHARE_BASE.to_string())
    }

    pub fn set_share_base(&self, url: &str) -> Result<()> {
        self.state.set(SHARE_BASE_KEY, url)
    }

    /// Shareable URL for the current wishlist.
    pub fn share_url(&self) -> String {
        share::share_url(&self.share_base(), self.wishlist.names())
    }

    /// Markdown summary of the current wishlist, ending with its share URL.
    pub fn wishlist_markdown(&self) -> String {
        share::to_markdown(self.wishlist.names(), &self.catalog, &self.share_base())
    }

    pub fn wishlist_updated_at(&self) -> Option<DateTime<Utc>> {
        self.state
            .get(wishlist::UPDATED_AT_KEY)
            .ok()
            .flatten()
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// Filtered catalog rendering for the user's own browsing.
    pub fn catalog_view(&self, filters: &FilterState) -> CatalogView {
        let grouped = filter::apply(self.catalog.all_products(), filters);
        render::render_catalog(
            &self.catalog,
            &grouped,
            self.wishlist.names(),
            RenderContext::Browsable,
            filters.is_default(),
        )
    }

    /// The user's own wishlist, grouped by category.
    pub fn wishlist_view(&self) -> CatalogView {
        self.names_view(self.wishlist.names(), RenderContext::Browsable)
    }

    /// Someone else's shared wishlist: read-only, no mutating affordances.
    pub fn shared_view(&self, names: &[String]) -> CatalogView {
        self.names_view(names, RenderContext::SharedReadOnly)
    }

    pub fn supplementary_view(&self, name: &str) -> Option<SupplementaryView> {
        self.catalog
            .supplementary(name)
            .map(|record| render::render_supplementary(name, record))
    }

    fn names_view(&self, names: &[String], ctx: RenderContext) -> CatalogView {
        let products: Vec<&Product> = names
            .iter()
            .filter_map(|name| self.catalog.product(name))
            .collect();
        let grouped = filter::group(products);
        render::render_catalog(&self.catalog, &grouped, self.wishlist.names(), ctx, true)
    }
}
