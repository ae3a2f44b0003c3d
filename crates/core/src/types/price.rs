//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Formatting follows the en-US currency style shoppers see in the gallery:
/// symbol prefix, thousands separators, two decimal places.
///
/// ```
/// use art_gallery_core::Price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(Price::usd(Decimal::from(1350)).to_string(), "$1,350.00");
/// assert_eq!(Price::usd(Decimal::new(58_999, 2)).to_string(), "$589.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in US dollars.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// The amount rounded to cents, midpoints away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        round_to_cents(self.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.2}", rounded.abs());
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        write!(
            f,
            "{sign}{}{}.{cents}",
            self.currency_code.symbol(),
            group_thousands(whole)
        )
    }
}

/// Round a decimal amount to cents, midpoints away from zero.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_small_amount() {
        assert_eq!(Price::usd(Decimal::new(4999, 2)).to_string(), "$49.99");
        assert_eq!(Price::usd(Decimal::ZERO).to_string(), "$0.00");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::usd(Decimal::from(1296)).to_string(), "$1,296.00");
        assert_eq!(
            Price::usd(Decimal::from(1_234_567)).to_string(),
            "$1,234,567.00"
        );
        assert_eq!(Price::usd(Decimal::from(100)).to_string(), "$100.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Price::usd(Decimal::new(10_005, 3)).to_string(), "$10.01");
        assert_eq!(Price::usd(Decimal::new(10_004, 3)).to_string(), "$10.00");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Price::usd(Decimal::new(-500, 2)).to_string(), "-$5.00");
    }

    #[test]
    fn test_display_other_currency() {
        let price = Price::new(Decimal::from(20), CurrencyCode::GBP);
        assert_eq!(price.to_string(), "£20.00");
    }
}
