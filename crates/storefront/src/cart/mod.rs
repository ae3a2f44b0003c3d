//! Shopping cart state.
//!
//! The cart is a small reducer: a closed set of [`CartAction`]s applied to a
//! [`CartState`] by the pure [`reduce`] function. [`CartStore`] owns the
//! current state, mirrors every change into a [`KeyValueStore`] under
//! [`CART_STORAGE_KEY`], and rehydrates from it on startup.
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

mod action;
mod item;
mod store;

use thiserror::Error;

use crate::storage::StorageError;

pub use action::{CartAction, reduce};
pub use item::{CartItem, CartState};
pub use store::{CART_STORAGE_KEY, CartStore};

/// Errors raised by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The position does not address an entry in the cart.
    #[error("Cart position {position} out of range (cart has {len} items)")]
    PositionOutOfRange {
        /// Requested zero-based position.
        position: usize,
        /// Number of entries in the cart.
        len: usize,
    },

    /// Items must be added with a quantity of at least one.
    #[error("Cannot add {id} with zero quantity")]
    ZeroQuantity {
        /// Line item identifier.
        id: String,
    },

    /// Merging quantities would overflow.
    #[error("Quantity overflow for {id}")]
    QuantityOverflow {
        /// Line item identifier.
        id: String,
    },

    /// Line prices cannot be negative.
    #[error("Cannot add {id} with a negative price")]
    NegativePrice {
        /// Line item identifier.
        id: String,
    },

    /// The cart total would no longer fit in a `Decimal`.
    #[error("Cart total overflow for {id}")]
    TotalOverflow {
        /// Line item identifier.
        id: String,
    },

    /// The new state was applied but could not be persisted.
    #[error("Failed to persist cart: {0}")]
    Storage(#[from] StorageError),
}
