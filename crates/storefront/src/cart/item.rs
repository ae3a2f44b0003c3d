//! Cart line items and cart state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product variant (artwork + size) and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique per artwork+size combination, e.g. `"1-medium"`.
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Unit price in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Size label, e.g. `"Medium"`.
    pub size: String,
    pub dimensions: String,
    pub image_url: String,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// Price multiplied by quantity, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Price multiplied by quantity, or `None` if it overflows.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// Whether `other` is the same variant, and should merge into this entry.
    #[must_use]
    pub fn same_variant(&self, other: &Self) -> bool {
        self.id == other.id && self.size == other.size
    }
}

/// The persisted cart: ordered line items plus the side-panel flag.
///
/// Serializes as `{ "items": [...], "isOpen": bool }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Insertion order is display order.
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub is_open: bool,
}

impl CartState {
    /// Sum of `price * quantity` over all entries.
    ///
    /// Saturates instead of panicking; a consistent state never saturates.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Exact total, or `None` if any product or the sum overflows.
    #[must_use]
    pub fn checked_total(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.checked_line_total()?)
        })
    }

    /// Sum of quantities over all entries.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Whether the state upholds the cart invariants: every quantity >= 1,
    /// no negative price, and a total that fits in a `Decimal`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.items
            .iter()
            .all(|item| item.quantity >= 1 && item.price >= Decimal::ZERO)
            && self.checked_total().is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, quantity: u32) -> CartItem {
        CartItem {
            id: id.to_string(),
            title: "Abstract Harmony".to_string(),
            artist: "Jane Smith".to_string(),
            price: Decimal::from(price),
            size: "Medium".to_string(),
            dimensions: "24\" x 36\"".to_string(),
            image_url: "https://example.com/1.jpg".to_string(),
            quantity,
        }
    }

    #[test]
    fn test_serializes_in_persisted_layout() {
        let state = CartState {
            items: vec![item("1-medium", 450, 2)],
            is_open: true,
        };
        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(json["isOpen"], true);
        assert_eq!(json["items"][0]["id"], "1-medium");
        assert_eq!(json["items"][0]["imageUrl"], "https://example.com/1.jpg");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert!(json["items"][0]["price"].is_number());
    }

    #[test]
    fn test_deserializes_without_open_flag() {
        let raw = r#"{"items":[{"id":"2-small","title":"Colorful Chaos","artist":"Michael Chen",
            "price":250,"size":"Small","dimensions":"12\" x 18\"","imageUrl":"x","quantity":1}]}"#;
        let state: CartState = serde_json::from_str(raw).unwrap();
        assert!(!state.is_open);
        assert_eq!(state.items[0].price, Decimal::from(250));
    }

    #[test]
    fn test_totals() {
        let state = CartState {
            items: vec![item("1-medium", 450, 3), item("3-small", 250, 1)],
            is_open: false,
        };
        assert_eq!(state.total(), Decimal::from(1600));
        assert_eq!(state.item_count(), 4);
    }

    #[test]
    fn test_consistency_rejects_zero_quantity() {
        let state = CartState {
            items: vec![item("1-medium", 450, 0)],
            is_open: false,
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_consistency_rejects_negative_price() {
        let state = CartState {
            items: vec![item("1-medium", -450, 1)],
            is_open: false,
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_overflowing_total_saturates() {
        let mut huge = item("1-medium", 0, 2);
        huge.price = Decimal::MAX;
        let state = CartState {
            items: vec![huge, item("2-small", 250, 1)],
            is_open: false,
        };
        assert_eq!(state.checked_total(), None);
        assert_eq!(state.total(), Decimal::MAX);
        assert!(!state.is_consistent());
    }
}
