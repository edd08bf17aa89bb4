//! Interaction controller: owns the current filter state and display
//! mode, wires inputs to the filter engine and wishlist store, and
//! re-renders wholesale after every transition. Display mode is explicit
//! state; it is never inferred from rendered output.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::filter::{CategoryFilter, FilterState, PriceFilter};
use crate::render::{CatalogView, SupplementaryView};
use crate::share;
use crate::Shelf;

/// Quiet period before a buffered search edit is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Browsing,
    FilteredView,
    WishlistView,
    SharedWishlistView,
}

/// A discrete user input. Search edits carry no timestamp themselves;
/// the handler receives `now` so tests can drive the debounce clock.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    SearchEdited(String),
    CategorySelected(CategoryFilter),
    PriceSelected(PriceFilter),
    PicksOnly(bool),
    ResetFilters,
    ShowWishlist,
    ShowInfo(String),
    ToggleWish(String),
    Close,
}

/// What the surrounding shell must do in response to an input.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace the rendered catalog region wholesale.
    Render(CatalogView),
    /// Open the supplementary-detail overlay.
    ShowSupplementary(SupplementaryView),
    /// Transient user-visible message.
    Notice(String),
}

pub struct Controller {
    filters: FilterState,
    mode: DisplayMode,
    /// Mode to return to when a wishlist overlay closes.
    prior: DisplayMode,
    shared: Option<Vec<String>>,
    pending_search: Option<(String, Instant)>,
}

impl Controller {
    /// Evaluate the startup URL once: a decodable share token enters the
    /// read-only shared view, anything else starts plain browsing.
    pub fn startup(initial_url: Option<&str>) -> Self {
        let shared = initial_url
            .and_then(share::extract_token)
            .and_then(|token| share::decode_token(&token).ok());
        let mode = if shared.is_some() {
            DisplayMode::SharedWishlistView
        } else {
            DisplayMode::Browsing
        };
        Self {
            filters: FilterState::default(),
            mode,
            prior: DisplayMode::Browsing,
            shared,
            pending_search: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn shared_names(&self) -> Option<&[String]> {
        self.shared.as_deref()
    }

    /// Build the view for the current mode.
    pub fn view(&self, shelf: &Shelf) -> CatalogView {
        match self.mode {
            DisplayMode::Browsing | DisplayMode::FilteredView => {
                shelf.catalog_view(&self.filters)
            }
            DisplayMode::WishlistView => shelf.wishlist_view(),
            DisplayMode::SharedWishlistView => {
                shelf.shared_view(self.shared.as_deref().unwrap_or(&[]))
            }
        }
    }

    pub fn handle(&mut self, shelf: &mut Shelf, input: Input, now: Instant) -> Vec<Effect> {
        match input {
            Input::SearchEdited(text) => {
                self.pending_search = Some((text.to_lowercase(), now));
                Vec::new()
            }
            Input::CategorySelected(category) => {
                self.flush_pending_search();
                self.filters.category = category;
                self.after_filter_change(shelf)
            }
            Input::PriceSelected(price) => {
                self.flush_pending_search();
                self.filters.price = price;
                self.after_filter_change(shelf)
            }
            Input::PicksOnly(on) => {
                self.flush_pending_search();
                self.filters.picks_only = on;
                self.after_filter_change(shelf)
            }
            Input::ResetFilters => {
                self.pending_search = None;
                self.filters.reset();
                self.set_mode(DisplayMode::Browsing);
                vec![Effect::Render(self.view(shelf))]
            }
            Input::ShowWishlist => {
                if shelf.wishlist().is_empty() {
                    return vec![Effect::Notice(
                        "Your wishlist is empty — add something from the catalog first."
                            .to_string(),
                    )];
                }
                if matches!(
                    self.mode,
                    DisplayMode::Browsing | DisplayMode::FilteredView
                ) {
                    self.prior = self.mode;
                }
                self.set_mode(DisplayMode::WishlistView);
                vec![Effect::Render(self.view(shelf))]
            }
            Input::ShowInfo(name) => match shelf.supplementary_view(&name) {
                Some(view) => vec![Effect::ShowSupplementary(view)],
                None => vec![Effect::Notice(format!("No extra info for {name}."))],
            },
            Input::ToggleWish(name) => self.toggle_wish(shelf, name),
            Input::Close => match self.mode {
                DisplayMode::WishlistView | DisplayMode::SharedWishlistView => {
                    self.set_mode(self.prior);
                    vec![Effect::Render(self.view(shelf))]
                }
                _ => Vec::new(),
            },
        }
    }

    /// Apply a buffered search edit once input has paused long enough.
    pub fn tick(&mut self, shelf: &Shelf, now: Instant) -> Vec<Effect> {
        match &self.pending_search {
            Some((_, at)) if now.duration_since(*at) >= SEARCH_DEBOUNCE => {
                self.flush_pending_search();
                self.mode_for_filters();
                vec![Effect::Render(self.view(shelf))]
            }
            _ => Vec::new(),
        }
    }

    fn toggle_wish(&mut self, shelf: &mut Shelf, name: String) -> Vec<Effect> {
        if self.mode == DisplayMode::SharedWishlistView {
            return vec![Effect::Notice(
                "This is someone else's shared wishlist — it is read-only.".to_string(),
            )];
        }
        match shelf.toggle_wish(&name) {
            Ok(true) => vec![
                Effect::Render(self.view(shelf)),
                Effect::Notice(format!("Added {name} to your wishlist.")),
            ],
            Ok(false) => {
                // Removing the last item while viewing the wishlist
                // drops back to where the user came from.
                if self.mode == DisplayMode::WishlistView && shelf.wishlist().is_empty() {
                    self.set_mode(self.prior);
                }
                vec![
                    Effect::Render(self.view(shelf)),
                    Effect::Notice(format!("Removed {name} from your wishlist.")),
                ]
            }
            Err(err) => vec![Effect::Notice(err.to_string())],
        }
    }

    fn after_filter_change(&mut self, shelf: &Shelf) -> Vec<Effect> {
        self.mode_for_filters();
        vec![Effect::Render(self.view(shelf))]
    }

    fn flush_pending_search(&mut self) {
        if let Some((text, _)) = self.pending_search.take() {
            self.filters.search = text;
        }
    }

    /// Filter edits land in `Browsing` when everything is back at the
    /// defaults, `FilteredView` otherwise.
    fn mode_for_filters(&mut self) {
        let mode = if self.filters.is_default() {
            DisplayMode::Browsing
        } else {
            DisplayMode::FilteredView
        };
        self.set_mode(mode);
    }

    fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            debug!(from = ?self.mode, to = ?mode, "display mode changed");
            self.mode = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::state::StateStore;
    use serde_json::json;

    fn shelf() -> Shelf {
        let catalog = Catalog::load(
            json!({
                "IEMs": [
                    { "name": "Truthear Gate", "price": 20, "pick": true,
                      "url": "https://example.com/gate" },
                    { "name": "Kefine Klean", "price": 120, "url": "https://example.com/klean" }
                ],
                "Cables": [
                    { "name": "Hart Audio Cable", "price": 30, "url": "https://example.com/hart" }
                ]
            }),
            Some(json!({
                "Truthear Gate": { "video_links": ["https://example.com/v/1"] }
            })),
        )
        .unwrap();
        Shelf::with_state(catalog, StateStore::open_in_memory().unwrap())
    }

    fn rendered(effects: &[Effect]) -> &CatalogView {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Render(view) => Some(view),
                _ => None,
            })
            .expect("expected a render effect")
    }

    #[test]
    fn test_filter_change_enters_filtered_view_and_reset_leaves_it() {
        let mut shelf = shelf();
        let mut controller = Controller::startup(None);
        let now = Instant::now();
        assert_eq!(controller.mode(), DisplayMode::Browsing);

        controller.handle(&mut shelf, Input::PicksOnly(true), now);
        assert_eq!(controller.mode(), DisplayMode::FilteredView);

        // Edits that restore the defaults land back in browsing.
        controller.handle(&mut shelf, Input::PicksOnly(false), now);
        assert_eq!(controller.mode(), DisplayMode::Browsing);

        controller.handle(&mut shelf, Input::PicksOnly(true), now);
        let effects = controller.handle(&mut shelf, Input::ResetFilters, now);
        assert_eq!(controller.mode(), DisplayMode::Browsing);
        assert!(controller.filters().is_default());
        assert!(matches!(rendered(&effects), CatalogView::Groups(_)));
    }

    #[test]
    fn test_search_is_debounced() {
        let mut shelf = shelf();
        let mut controller = Controller::startup(None);
        let t0 = Instant::now();

        let effects = controller.handle(&mut shelf, Input::SearchEdited("GA".into()), t0);
        assert!(effects.is_empty());
        assert_eq!(controller.mode(), DisplayMode::Browsing);

        // Still typing: nothing applied yet.
        assert!(controller.tick(&shelf, t0 + Duration::from_millis(100)).is_empty());
        let effects =
            controller.handle(&mut shelf, Input::SearchEdited("GATE".into()), t0 + Duration::from_millis(200));
        assert!(effects.is_empty());

        // Quiet period elapsed: the latest edit is applied, lowercased.
        let effects = controller.tick(&shelf, t0 + Duration::from_millis(800));
        assert_eq!(controller.mode(), DisplayMode::FilteredView);
        assert_eq!(controller.filters().search, "gate");
        let CatalogView::Groups(blocks) = rendered(&effects) else {
            panic!("expected groups");
        };
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].items[0].name, "Truthear Gate");

        // Nothing left to apply.
        assert!(controller.tick(&shelf, t0 + Duration::from_millis(2000)).is_empty());
    }

    #[test]
    fn test_other_filter_input_flushes_pending_search() {
        let mut shelf = shelf();
        let mut controller = Controller::startup(None);
        let t0 = Instant::now();

        controller.handle(&mut shelf, Input::SearchEdited("gate".into()), t0);
        controller.handle(
            &mut shelf,
            Input::CategorySelected(CategoryFilter::Key(crate::domain::CategoryKey::new(
                "iems",
            ))),
            t0,
        );
        assert_eq!(controller.filters().search, "gate");
        assert_eq!(controller.mode(), DisplayMode::FilteredView);
    }

    #[test]
    fn test_show_wishlist_requires_items() {
        let mut shelf = shelf();
        let mut controller = Controller::startup(None);
        let now = Instant::now();

        let effects = controller.handle(&mut shelf, Input::ShowWishlist, now);
        assert_eq!(controller.mode(), DisplayMode::Browsing);
        assert!(matches!(effects.as_slice(), [Effect::Notice(_)]));

        controller.handle(&mut shelf, Input::ToggleWish("Truthear Gate".into()), now);
        controller.handle(&mut shelf, Input::ShowWishlist, now);
        assert_eq!(controller.mode(), DisplayMode::WishlistView);
    }

    #[test]
    fn test_close_returns_to_prior_mode() {
        let mut shelf = shelf();
        let mut controller = Controller::startup(None);
        let now = Instant::now();

        controller.handle(&mut shelf, Input::PicksOnly(true), now);
        controller.handle(&mut shelf, Input::ToggleWish("Truthear Gate".into()), now);
        controller.handle(&mut shelf, Input::ShowWishlist, now);
        assert_eq!(controller.mode(), DisplayMode::WishlistView);

        controller.handle(&mut shelf, Input::Close, now);
        assert_eq!(controller.mode(), DisplayMode::FilteredView);

        // Close while browsing is a no-op.
        controller.handle(&mut shelf, Input::ResetFilters, now);
        assert!(controller.handle(&mut shelf, Input::Close, now).is_empty());
    }

    #[test]
    fn test_startup_with_share_token() {
        let names = vec!["Truthear Gate".to_string(), "Mystery".to_string()];
        let url = share::share_url("https://x.example/catalog", &names);
        let controller = Controller::startup(Some(&url));
        assert_eq!(controller.mode(), DisplayMode::SharedWishlistView);
        assert_eq!(controller.shared_names().unwrap(), names.as_slice());

        // Decode failure means no shared wishlist, not an error.
        let controller = Controller::startup(Some("https://x.example/?wishlist=%%%"));
        assert_eq!(controller.mode(), DisplayMode::Browsing);
        let controller = Controller::startup(None);
        assert_eq!(controller.mode(), DisplayMode::Browsing);
    }

    #[test]
    fn test_shared_view_is_read_only() {
        let names = vec!["Truthear Gate".to_string()];
        let url = share::share_url("https://x.example/catalog", &names);
        let mut shelf = shelf();
        let mut controller = Controller::startup(Some(&url));
        let now = Instant::now();

        let effects =
            controller.handle(&mut shelf, Input::ToggleWish("Truthear Gate".into()), now);
        assert!(matches!(effects.as_slice(), [Effect::Notice(_)]));
        assert!(shelf.wishlist().is_empty());

        controller.handle(&mut shelf, Input::Close, now);
        assert_eq!(controller.mode(), DisplayMode::Browsing);
    }

    #[test]
    fn test_removing_last_wishlist_item_leaves_wishlist_view() {
        let mut shelf = shelf();
        let mut controller = Controller::startup(None);
        let now = Instant::now();

        controller.handle(&mut shelf, Input::ToggleWish("Truthear Gate".into()), now);
        controller.handle(&mut shelf, Input::ShowWishlist, now);
        assert_eq!(controller.mode(), DisplayMode::WishlistView);

        controller.handle(&mut shelf, Input::ToggleWish("Truthear Gate".into()), now);
        assert_eq!(controller.mode(), DisplayMode::Browsing);
    }

    #[test]
    fn test_unknown_product_toggle_is_a_notice() {
        let mut shelf = shelf();
        let mut controller = Controller::startup(None);
        let effects = controller.handle(
            &mut shelf,
            Input::ToggleWish("Nonexistent".into()),
            Instant::now(),
        );
        assert!(matches!(effects.as_slice(), [Effect::Notice(_)]));
    }

    #[test]
    fn test_show_info() {
        let mut shelf = shelf();
        let mut controller = Controller::startup(None);
        let now = Instant::now();

        let effects = controller.handle(
            &mut shelf,
            Input::ShowInfo("Truthear Gate".into()),
            now,
        );
        assert!(matches!(
            effects.as_slice(),
            [Effect::ShowSupplementary(_)]
        ));

        let effects = controller.handle(
            &mut shelf,
            Input::ShowInfo("Hart Audio Cable".into()),
            now,
        );
        assert!(matches!(effects.as_slice(), [Effect::Notice(_)]));
    }
}
