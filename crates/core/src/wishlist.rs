use chrono::Utc;
use tracing::{debug, warn};

use crate::state::StateStore;

/// Fixed key holding the JSON-serialized wishlist blob.
pub const WISHLIST_KEY: &str = "wishlist";
/// Unix timestamp of the last wishlist mutation.
pub const UPDATED_AT_KEY: &str = "wishlist_updated_at";

/// Insertion-ordered set of product names. Every mutation is persisted
/// synchronously before the caller can render the new state; persistence
/// failures degrade to in-memory operation with a warning rather than
/// surfacing as errors.
#[derive(Debug, Default)]
pub struct Wishlist {
    names: Vec<String>,
}

impl Wishlist {
    /// Load the persisted wishlist. Corrupt or missing stored data yields
    /// an empty wishlist, never an error.
    pub fn load(store: &StateStore) -> Self {
        match store.get(WISHLIST_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<String>>(&blob) {
                Ok(names) => Self { names },
                Err(err) => {
                    warn!(%err, "stored wishlist is corrupt, starting empty");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(err) => {
                warn!(%err, "could not read stored wishlist, starting empty");
                Self::default()
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Names in insertion order, for display stability.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Flip membership, persist, and return the new membership state.
    pub fn toggle(&mut self, store: &StateStore, name: &str) -> bool {
        let member = match self.names.iter().position(|n| n == name) {
            Some(pos) => {
                self.names.remove(pos);
                false
            }
            None => {
                self.names.push(name.to_string());
                true
            }
        };
        debug!(name, member, "wishlist toggled");
        self.persist(store);
        member
    }

    /// Append names not already present, preserving their given order.
    /// Returns the number actually added. Only called after explicit user
    /// confirmation; shared wishlists are never merged automatically.
    pub fn import(&mut self, store: &StateStore, names: &[String]) -> usize {
        let mut added = 0;
        for name in names {
            if !self.contains(name) {
                self.names.push(name.clone());
                added += 1;
            }
        }
        if added > 0 {
            debug!(added, "wishlist import merged");
            self.persist(store);
        }
        added
    }

    /// Remove everything. Returns the number of names removed.
    pub fn clear(&mut self, store: &StateStore) -> usize {
        let removed = self.names.len();
        self.names.clear();
        self.persist(store);
        removed
    }

    fn persist(&self, store: &StateStore) {
        let blob = serde_json::to_string(&self.names).unwrap_or_else(|_| "[]".to_string());
        if let Err(err) = store.set(WISHLIST_KEY, &blob) {
            warn!(%err, "wishlist persistence failed, keeping change in memory only");
            return;
        }
        if let Err(err) = store.set(UPDATED_AT_KEY, &Utc::now().timestamp().to_string()) {
            warn!(%err, "could not record wishlist update time");
        }
    }
}
