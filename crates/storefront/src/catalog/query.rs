//! Gallery filtering and ordering.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Artwork, CatalogError, Category};

/// Ordering applied to gallery listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Limited editions first, then most liked.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Newest,
    Popular,
}

impl SortOrder {
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Newest,
        Self::Popular,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Newest => "newest",
            Self::Popular => "popular",
        }
    }

    /// Sort `artworks` in place. Equal keys keep their catalog order.
    pub fn apply(self, artworks: &mut [&Artwork]) {
        match self {
            Self::Featured => artworks.sort_by(|a, b| {
                b.is_limited_edition
                    .cmp(&a.is_limited_edition)
                    .then_with(|| b.likes.cmp(&a.likes))
            }),
            Self::PriceLow => artworks.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceHigh => artworks.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Newest => artworks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            Self::Popular => artworks.sort_by(|a, b| b.likes.cmp(&a.likes)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s.trim())
            .ok_or_else(|| CatalogError::UnknownSortOrder(s.to_string()))
    }
}

/// Gallery listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// `None` lists every category.
    pub category: Option<Category>,
    /// Inclusive lower price bound.
    pub min_price: Decimal,
    /// Inclusive upper price bound.
    pub max_price: Decimal,
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Upper bound of the gallery's price slider.
    pub const DEFAULT_MAX_PRICE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

    #[must_use]
    pub const fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn with_price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `artwork` passes the category and price filters.
    #[must_use]
    pub fn matches(&self, artwork: &Artwork) -> bool {
        self.category.is_none_or(|category| artwork.category == category)
            && artwork.price >= self.min_price
            && artwork.price <= self.max_price
    }
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            category: None,
            min_price: Decimal::ZERO,
            max_price: Self::DEFAULT_MAX_PRICE,
            sort: SortOrder::Featured,
        }
    }
}
