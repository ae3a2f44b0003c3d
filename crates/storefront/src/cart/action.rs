//! Cart actions and the reducer that applies them.

use rust_decimal::Decimal;

use super::{CartError, CartItem, CartState};

/// Every way the cart can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Append an item, or merge its quantity into an existing entry for the
    /// same variant.
    AddItem(CartItem),
    /// Delete the entry at a zero-based position.
    RemoveItem { position: usize },
    /// Replace the quantity at a position. Quantities below 1 are ignored.
    UpdateQuantity { position: usize, quantity: u32 },
    /// Remove every entry. The panel flag is untouched.
    Clear,
    /// Flip the side-panel flag.
    TogglePanel,
}

impl CartAction {
    /// Short label for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "add_item",
            Self::RemoveItem { .. } => "remove_item",
            Self::UpdateQuantity { .. } => "update_quantity",
            Self::Clear => "clear",
            Self::TogglePanel => "toggle_panel",
        }
    }
}

/// Apply `action` to `state`, producing the next state.
///
/// The input state is never modified; on error the caller keeps it as is.
///
/// # Errors
///
/// - `CartError::ZeroQuantity` when adding an item with quantity 0
/// - `CartError::NegativePrice` when adding an item priced below zero
/// - `CartError::QuantityOverflow` when a merge would overflow `u32`
/// - `CartError::TotalOverflow` when the cart total would overflow `Decimal`
/// - `CartError::PositionOutOfRange` when a position does not exist
pub fn reduce(state: &CartState, action: CartAction) -> Result<CartState, CartError> {
    let mut next = state.clone();

    match action {
        CartAction::AddItem(item) => {
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity { id: item.id });
            }
            if item.price < Decimal::ZERO {
                return Err(CartError::NegativePrice { id: item.id });
            }
            let id = item.id.clone();
            match next.items.iter_mut().find(|existing| existing.same_variant(&item)) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(item.quantity)
                        .ok_or_else(|| CartError::QuantityOverflow { id: id.clone() })?;
                }
                None => next.items.push(item),
            }
            ensure_total_fits(&next, id)?;
        }
        CartAction::RemoveItem { position } => {
            check_position(&next, position)?;
            next.items.remove(position);
        }
        CartAction::UpdateQuantity { position, quantity } => {
            if quantity < 1 {
                return Ok(next);
            }
            let len = next.items.len();
            let entry = next
                .items
                .get_mut(position)
                .ok_or(CartError::PositionOutOfRange { position, len })?;
            entry.quantity = quantity;
            let id = entry.id.clone();
            ensure_total_fits(&next, id)?;
        }
        CartAction::Clear => next.items.clear(),
        CartAction::TogglePanel => next.is_open = !next.is_open,
    }

    Ok(next)
}

fn ensure_total_fits(state: &CartState, id: String) -> Result<(), CartError> {
    match state.checked_total() {
        Some(_) => Ok(()),
        None => Err(CartError::TotalOverflow { id }),
    }
}

const fn check_position(state: &CartState, position: usize) -> Result<(), CartError> {
    let len = state.items.len();
    if position < len {
        Ok(())
    } else {
        Err(CartError::PositionOutOfRange { position, len })
    }
}
