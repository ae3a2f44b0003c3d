//! The gallery's artwork catalog.
//!
//! Read-only and held in memory. Artworks are sold as prints in one of the
//! fixed [`SIZE_OPTIONS`]; [`Catalog::line_item`] turns a chosen variant into
//! a [`CartItem`].

mod query;

use std::fmt;
use std::str::FromStr;

use art_gallery_core::{ArtworkId, Price};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use query::{CatalogQuery, SortOrder};

use crate::cart::CartItem;

/// Errors from catalog lookups and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Artwork {0} not found")]
    ArtworkNotFound(ArtworkId),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),

    #[error("Unknown size: {0}")]
    UnknownSize(String),
}

/// Artwork subject category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Abstract,
    Landscape,
    Urban,
    Nature,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Landscape => "landscape",
            Self::Urban => "urban",
            Self::Nature => "nature",
        }
    }

    /// Parse a gallery filter value, where `all` means no filter.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownCategory` for anything else unrecognised.
    pub fn parse_filter(s: &str) -> Result<Option<Self>, CatalogError> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abstract" => Ok(Self::Abstract),
            "landscape" => Ok(Self::Landscape),
            "urban" => Ok(Self::Urban),
            "nature" => Ok(Self::Nature),
            _ => Err(CatalogError::UnknownCategory(s.to_string())),
        }
    }
}

/// A print size offered for every artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeOption {
    pub id: &'static str,
    pub name: &'static str,
    pub dimensions: &'static str,
    pub price: Decimal,
}

impl SizeOption {
    /// Look up a size by id (`small`, `medium`, `large`).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownSize` if no size has that id.
    pub fn find(id: &str) -> Result<&'static Self, CatalogError> {
        let id = id.trim();
        SIZE_OPTIONS
            .iter()
            .find(|size| size.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| CatalogError::UnknownSize(id.to_string()))
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        Price::usd(self.price)
    }
}

/// Size preselected on the artwork page.
pub const DEFAULT_SIZE: &str = "medium";

pub const SIZE_OPTIONS: [SizeOption; 3] = [
    SizeOption {
        id: "small",
        name: "Small",
        dimensions: "12\" x 18\"",
        price: Decimal::from_parts(250, 0, 0, false, 0),
    },
    SizeOption {
        id: "medium",
        name: "Medium",
        dimensions: "24\" x 36\"",
        price: Decimal::from_parts(450, 0, 0, false, 0),
    },
    SizeOption {
        id: "large",
        name: "Large",
        dimensions: "36\" x 54\"",
        price: Decimal::from_parts(750, 0, 0, false, 0),
    },
];

/// A catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: String,
    pub artist: String,
    /// Listing price, used for gallery filtering and sorting.
    pub price: Decimal,
    pub image_url: String,
    pub category: Category,
    pub is_limited_edition: bool,
    pub likes: u32,
    pub created_at: NaiveDate,
}

impl Artwork {
    #[must_use]
    pub const fn listing_price(&self) -> Price {
        Price::usd(self.price)
    }
}

/// The in-memory artwork catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    artworks: Vec<Artwork>,
}

impl Catalog {
    #[must_use]
    pub const fn new(artworks: Vec<Artwork>) -> Self {
        Self { artworks }
    }

    /// The gallery's eight launch artworks.
    #[must_use]
    pub fn gallery() -> Self {
        Self::new(GALLERY.iter().map(Seed::to_artwork).collect())
    }

    /// Every artwork in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Artwork] {
        &self.artworks
    }

    #[must_use]
    pub fn get(&self, id: ArtworkId) -> Option<&Artwork> {
        self.artworks.iter().find(|artwork| artwork.id == id)
    }

    /// Like [`Catalog::get`], but a missing artwork is an error.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ArtworkNotFound` if no artwork has `id`.
    pub fn require(&self, id: ArtworkId) -> Result<&Artwork, CatalogError> {
        self.get(id).ok_or(CatalogError::ArtworkNotFound(id))
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for artwork in &self.artworks {
            if !seen.contains(&artwork.category) {
                seen.push(artwork.category);
            }
        }
        seen
    }

    /// Filter and order the catalog.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Artwork> {
        let mut matches: Vec<&Artwork> = self
            .artworks
            .iter()
            .filter(|artwork| query.matches(artwork))
            .collect();
        query.sort.apply(&mut matches);
        matches
    }

    /// Cart line for `artwork` printed at `size`.
    #[must_use]
    pub fn line_item(artwork: &Artwork, size: &SizeOption, quantity: u32) -> CartItem {
        CartItem {
            id: format!("{}-{}", artwork.id, size.id),
            title: artwork.title.clone(),
            artist: artwork.artist.clone(),
            price: size.price,
            size: size.name.to_string(),
            dimensions: size.dimensions.to_string(),
            image_url: artwork.image_url.clone(),
            quantity,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::gallery()
    }
}

struct Seed {
    id: i32,
    title: &'static str,
    artist: &'static str,
    price: i64,
    image_url: &'static str,
    category: Category,
    is_limited_edition: bool,
    likes: u32,
    created_at: NaiveDate,
}

impl Seed {
    fn to_artwork(&self) -> Artwork {
        Artwork {
            id: ArtworkId::new(self.id),
            title: self.title.to_string(),
            artist: self.artist.to_string(),
            price: Decimal::from(self.price),
            image_url: self.image_url.to_string(),
            category: self.category,
            is_limited_edition: self.is_limited_edition,
            likes: self.likes,
            created_at: self.created_at,
        }
    }
}

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid catalog date"),
    }
}

const GALLERY: [Seed; 8] = [
    Seed {
        id: 1,
        title: "Abstract Harmony",
        artist: "Jane Smith",
        price: 450,
        image_url: "https://images.unsplash.com/photo-1526481280695-3c4697b457a3?auto=format&fit=crop&w=900&q=80",
        category: Category::Abstract,
        is_limited_edition: true,
        likes: 128,
        created_at: date(2023, 10, 15),
    },
    Seed {
        id: 2,
        title: "Colorful Chaos",
        artist: "Michael Chen",
        price: 375,
        image_url: "https://images.unsplash.com/photo-1469474968028-56623f02e42e?auto=format&fit=crop&w=900&q=80",
        category: Category::Abstract,
        is_limited_edition: false,
        likes: 92,
        created_at: date(2023, 11, 2),
    },
    Seed {
        id: 3,
        title: "Mountain Majesty",
        artist: "John Doe",
        price: 320,
        image_url: "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee?auto=format&fit=crop&w=900&q=80",
        category: Category::Landscape,
        is_limited_edition: false,
        likes: 156,
        created_at: date(2023, 9, 20),
    },
    Seed {
        id: 4,
        title: "Serene Valley",
        artist: "Emma Wilson",
        price: 410,
        image_url: "https://images.unsplash.com/photo-1470770841072-f978cf4d019e?auto=format&fit=crop&w=900&q=80",
        category: Category::Landscape,
        is_limited_edition: true,
        likes: 203,
        created_at: date(2023, 11, 15),
    },
    Seed {
        id: 5,
        title: "Urban Rhythms",
        artist: "Alex Chen",
        price: 380,
        image_url: "https://images.unsplash.com/photo-1500534623283-312aade485b7?auto=format&fit=crop&w=900&q=80",
        category: Category::Urban,
        is_limited_edition: true,
        likes: 87,
        created_at: date(2023, 10, 5),
    },
    Seed {
        id: 6,
        title: "City Lights",
        artist: "Sarah Johnson",
        price: 420,
        image_url: "https://images.unsplash.com/photo-1465446751832-9f11e125aaa7?auto=format&fit=crop&w=900&q=80",
        category: Category::Urban,
        is_limited_edition: false,
        likes: 134,
        created_at: date(2023, 11, 10),
    },
    Seed {
        id: 7,
        title: "Ocean Dreams",
        artist: "Maria Garcia",
        price: 420,
        image_url: "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?auto=format&fit=crop&w=900&q=80",
        category: Category::Nature,
        is_limited_edition: false,
        likes: 178,
        created_at: date(2023, 9, 28),
    },
    Seed {
        id: 8,
        title: "Forest Whispers",
        artist: "David Kim",
        price: 390,
        image_url: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?auto=format&fit=crop&w=900&q=80",
        category: Category::Nature,
        is_limited_edition: false,
        likes: 145,
        created_at: date(2023, 11, 5),
    },
];
