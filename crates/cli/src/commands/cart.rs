//! Cart commands.
//!
//! Line numbers on the command line start at 1, matching `cart show`.
//!
//! # Usage
//!
//! ```bash
//! gallery cart add 1 --size medium --quantity 2
//! gallery cart show
//! gallery cart remove 1
//! ```

use art_gallery_core::{ArtworkId, Price};
use art_gallery_storefront::cart::CartStore;
use art_gallery_storefront::catalog::{Catalog, SizeOption};
use art_gallery_storefront::checkout::OrderTotals;
use art_gallery_storefront::error::{AppError, add_breadcrumb};
use art_gallery_storefront::state::AppState;
use art_gallery_storefront::storage::FileStore;

use super::catalog::to_json;

/// Print the cart and its order summary.
///
/// # Errors
///
/// Returns an error if the cart cannot be opened.
#[allow(clippy::print_stdout)]
pub fn show(state: &AppState, json: bool) -> Result<(), AppError> {
    let cart = state.open_cart()?;
    let totals = OrderTotals::from_items(cart.items());

    if json {
        let value = serde_json::json!({
            "cart": cart.state(),
            "totals": totals,
        });
        println!("{}", to_json(&value)?);
        return Ok(());
    }

    if cart.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    for (line, item) in cart.items().iter().enumerate() {
        println!(
            "{:>2}. {} by {} ({}, {}) x{}  {}",
            line + 1,
            item.title,
            item.artist,
            item.size,
            item.dimensions,
            item.quantity,
            Price::usd(item.line_total()),
        );
    }
    println!();
    print_summary(&totals);
    Ok(())
}

/// Add a print of artwork `id` in `size`.
///
/// # Errors
///
/// Returns an error if the artwork or size is unknown, the quantity is zero,
/// or the cart cannot be saved.
#[allow(clippy::print_stdout)]
pub fn add(state: &AppState, id: ArtworkId, size: &str, quantity: u32) -> Result<(), AppError> {
    let artwork = state.catalog().require(id)?;
    let size = SizeOption::find(size)?;
    let item = Catalog::line_item(artwork, size, quantity);

    let mut cart = state.open_cart()?;
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("item_id", item.id.as_str())]),
    );
    let title = item.title.clone();
    cart.add_item(item)?;

    println!("Added {quantity} x {title} ({}) to your cart.", size.name);
    print_count(&cart);
    Ok(())
}

/// Remove the line at 1-based `position`.
///
/// # Errors
///
/// Returns an error if no line has that number or the cart cannot be saved.
#[allow(clippy::print_stdout)]
pub fn remove(state: &AppState, position: usize) -> Result<(), AppError> {
    let index = to_index(position)?;
    let mut cart = state.open_cart()?;
    cart.remove_item(index)?;
    println!("Removed line {position}.");
    print_count(&cart);
    Ok(())
}

/// Set the quantity of the line at 1-based `position`.
///
/// A quantity below 1 leaves the line unchanged; use `remove` instead.
///
/// # Errors
///
/// Returns an error if no line has that number or the cart cannot be saved.
#[allow(clippy::print_stdout)]
pub fn update(state: &AppState, position: usize, quantity: u32) -> Result<(), AppError> {
    let index = to_index(position)?;
    let mut cart = state.open_cart()?;
    cart.update_quantity(index, quantity)?;
    if quantity < 1 {
        println!("Quantity must be at least 1; line {position} unchanged.");
    } else {
        println!("Line {position} now has quantity {quantity}.");
    }
    print_count(&cart);
    Ok(())
}

/// Remove every line.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[allow(clippy::print_stdout)]
pub fn clear(state: &AppState) -> Result<(), AppError> {
    let mut cart = state.open_cart()?;
    cart.clear()?;
    println!("Cart cleared.");
    Ok(())
}

/// Flip the cart panel's visibility flag.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[allow(clippy::print_stdout)]
pub fn toggle(state: &AppState) -> Result<(), AppError> {
    let mut cart = state.open_cart()?;
    cart.toggle_panel()?;
    println!(
        "Cart panel {}.",
        if cart.is_open() { "opened" } else { "closed" }
    );
    Ok(())
}

#[allow(clippy::print_stdout)]
pub(crate) fn print_summary(totals: &OrderTotals) {
    println!("Items:     {}", totals.item_count);
    println!("Subtotal:  {}", totals.subtotal_price());
    if totals.ships_free() {
        println!("Shipping:  Free");
    } else {
        println!("Shipping:  {}", totals.shipping_price());
    }
    println!("Tax:       {}", totals.tax_price());
    println!("Total:     {}", totals.total_price());
}

#[allow(clippy::print_stdout)]
fn print_count(cart: &CartStore<FileStore>) {
    println!(
        "Cart: {} item(s), {}",
        cart.item_count(),
        Price::usd(cart.compute_total())
    );
}

fn to_index(position: usize) -> Result<usize, AppError> {
    position
        .checked_sub(1)
        .ok_or_else(|| AppError::BadRequest("line numbers start at 1".to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_one_based() {
        assert_eq!(to_index(1).unwrap(), 0);
        assert_eq!(to_index(4).unwrap(), 3);
        assert!(matches!(to_index(0), Err(AppError::BadRequest(_))));
    }
}
