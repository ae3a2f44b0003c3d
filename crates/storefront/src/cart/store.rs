//! Persistent cart store.

use rust_decimal::Decimal;
use tracing::instrument;

use super::{CartAction, CartError, CartItem, CartState, reduce};
use crate::storage::KeyValueStore;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "artGalleryCart";

/// Single source of truth for the shopper's cart.
///
/// All writes go through the store's methods (or [`CartStore::dispatch`]);
/// each one that changes the state is followed by a full snapshot write to
/// the backing [`KeyValueStore`]. Mutation requires `&mut self`, so
/// operations are serialized by ownership; share a store across tasks by
/// wrapping it in a mutex.
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    storage: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open a store, restoring any cart previously persisted in `storage`.
    ///
    /// A missing, unreadable, malformed or inconsistent snapshot is logged
    /// and replaced by an empty cart.
    pub fn open(storage: S) -> Self {
        let state = load_state(&storage);
        tracing::debug!(items = state.items.len(), "Cart store opened");
        Self { state, storage }
    }

    /// Apply an action and persist the result if anything changed.
    ///
    /// # Errors
    ///
    /// Returns the reducer's error without touching state, or
    /// `CartError::Storage` if the new state (already applied in memory)
    /// could not be written.
    #[instrument(skip(self, action), fields(action = action.name()))]
    pub fn dispatch(&mut self, action: CartAction) -> Result<(), CartError> {
        let next = reduce(&self.state, action)?;
        if next == self.state {
            tracing::debug!("Cart unchanged");
            return Ok(());
        }

        self.state = next;
        tracing::debug!(
            items = self.state.items.len(),
            is_open = self.state.is_open,
            "Cart updated"
        );
        self.persist()
    }

    /// Add an item, merging into an existing entry for the same variant.
    ///
    /// # Errors
    ///
    /// See [`CartStore::dispatch`].
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        self.dispatch(CartAction::AddItem(item))
    }

    /// Remove the entry at a zero-based position.
    ///
    /// # Errors
    ///
    /// Returns `CartError::PositionOutOfRange` for a position past the end.
    pub fn remove_item(&mut self, position: usize) -> Result<(), CartError> {
        self.dispatch(CartAction::RemoveItem { position })
    }

    /// Set the quantity at a position; quantities below 1 are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::PositionOutOfRange` for a position past the end.
    pub fn update_quantity(&mut self, position: usize, quantity: u32) -> Result<(), CartError> {
        self.dispatch(CartAction::UpdateQuantity { position, quantity })
    }

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the empty cart could not be written.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.dispatch(CartAction::Clear)
    }

    /// Show or hide the cart panel.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the new flag could not be written.
    pub fn toggle_panel(&mut self) -> Result<(), CartError> {
        self.dispatch(CartAction::TogglePanel)
    }

    /// Current line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    /// Sum of `price * quantity`, recomputed on every call.
    #[must_use]
    pub fn compute_total(&self) -> Decimal {
        self.state.total()
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) -> Result<(), CartError> {
        self.storage
            .set_json(CART_STORAGE_KEY, &self.state)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to persist cart");
                CartError::from(e)
            })
    }
}

fn load_state<S: KeyValueStore>(storage: &S) -> CartState {
    match storage.get_json::<CartState>(CART_STORAGE_KEY) {
        Ok(Some(state)) if state.is_consistent() => state,
        Ok(Some(_)) => {
            tracing::warn!("Discarding persisted cart that violates cart invariants");
            CartState::default()
        }
        Ok(None) => CartState::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable persisted cart");
            CartState::default()
        }
    }
}
