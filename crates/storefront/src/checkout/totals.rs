//! Order summary arithmetic.

use art_gallery_core::{Price, round_to_cents};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartItem;

/// Shipping and tax rules applied to a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Decimal,
    pub flat_shipping: Decimal,
    pub tax_rate: Decimal,
}

impl PricingPolicy {
    /// $1000 free-shipping threshold, $49.99 flat fee, 8% tax.
    pub const STANDARD: Self = Self {
        free_shipping_threshold: Decimal::from_parts(1000, 0, 0, false, 0),
        flat_shipping: Decimal::from_parts(4999, 0, 0, false, 2),
        tax_rate: Decimal::from_parts(8, 0, 0, false, 2),
    };

    /// Shipping charged on `subtotal`: nothing for an empty order or one
    /// over the threshold, otherwise the flat fee.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal <= Decimal::ZERO || subtotal > self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_shipping
        }
    }

    /// Tax on `subtotal`, rounded to cents.
    #[must_use]
    pub fn tax_for(&self, subtotal: Decimal) -> Decimal {
        round_to_cents(subtotal.saturating_mul(self.tax_rate))
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Derived order summary. Never stored; recompute from the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub item_count: u64,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// Totals for `items` under the standard policy.
    #[must_use]
    pub fn from_items(items: &[CartItem]) -> Self {
        Self::with_policy(items, &PricingPolicy::STANDARD)
    }

    /// Sums saturate at the `Decimal` bounds, so oversized carts never panic.
    #[must_use]
    pub fn with_policy(items: &[CartItem], policy: &PricingPolicy) -> Self {
        let subtotal = items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()));
        let item_count = items.iter().map(|item| u64::from(item.quantity)).sum();
        Self::from_subtotal(subtotal, item_count, policy)
    }

    /// Totals for a known subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal, item_count: u64, policy: &PricingPolicy) -> Self {
        let shipping = policy.shipping_for(subtotal);
        let tax = policy.tax_for(subtotal);
        Self {
            item_count,
            subtotal,
            shipping,
            tax,
            total: subtotal.saturating_add(shipping).saturating_add(tax),
        }
    }

    /// Whether shipping was waived on a non-empty order.
    #[must_use]
    pub fn ships_free(&self) -> bool {
        self.subtotal > Decimal::ZERO && self.shipping.is_zero()
    }

    #[must_use]
    pub const fn subtotal_price(&self) -> Price {
        Price::usd(self.subtotal)
    }

    #[must_use]
    pub const fn shipping_price(&self) -> Price {
        Price::usd(self.shipping)
    }

    #[must_use]
    pub const fn tax_price(&self) -> Price {
        Price::usd(self.tax)
    }

    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::usd(self.total)
    }
}
