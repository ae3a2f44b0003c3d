//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! gallery catalog --category urban --sort newest
//! gallery artwork 4
//! ```

use art_gallery_core::ArtworkId;
use art_gallery_storefront::catalog::{Artwork, CatalogQuery, Category, SIZE_OPTIONS, SortOrder};
use art_gallery_storefront::error::AppError;
use art_gallery_storefront::state::AppState;
use rust_decimal::Decimal;

/// List artworks matching the filters.
///
/// # Errors
///
/// Returns an error if the category is unknown or the price range is empty.
#[allow(clippy::print_stdout)]
pub fn list(
    state: &AppState,
    category: &str,
    min_price: Decimal,
    max_price: Decimal,
    sort: SortOrder,
    json: bool,
) -> Result<(), AppError> {
    if min_price > max_price {
        return Err(AppError::BadRequest(format!(
            "minimum price {min_price} exceeds maximum {max_price}"
        )));
    }

    let query = CatalogQuery::default()
        .with_category(Category::parse_filter(category)?)
        .with_price_range(min_price, max_price)
        .with_sort(sort);
    let artworks = state.catalog().query(&query);
    tracing::debug!(results = artworks.len(), %sort, "Catalog query");

    if json {
        println!("{}", to_json(&artworks)?);
        return Ok(());
    }

    if artworks.is_empty() {
        println!("No artworks match these filters.");
        return Ok(());
    }
    for artwork in artworks {
        println!("{}", summary_line(artwork));
    }
    Ok(())
}

/// Show one artwork with its print sizes.
///
/// # Errors
///
/// Returns an error if no artwork has `id`.
#[allow(clippy::print_stdout)]
pub fn show(state: &AppState, id: ArtworkId, json: bool) -> Result<(), AppError> {
    let artwork = state.catalog().require(id)?;

    if json {
        let value = serde_json::json!({
            "artwork": artwork,
            "sizes": SIZE_OPTIONS,
        });
        println!("{}", to_json(&value)?);
        return Ok(());
    }

    println!("{}", artwork.title);
    println!("by {}", artwork.artist);
    println!(
        "{} | {} likes | added {}",
        artwork.category, artwork.likes, artwork.created_at
    );
    if artwork.is_limited_edition {
        println!("Limited edition");
    }
    println!();
    println!("Sizes:");
    for size in &SIZE_OPTIONS {
        println!(
            "  {:<8} {:<12} {:>10}",
            size.id,
            size.dimensions,
            size.price().to_string()
        );
    }
    Ok(())
}

fn summary_line(artwork: &Artwork) -> String {
    let badge = if artwork.is_limited_edition {
        " [limited]"
    } else {
        ""
    };
    format!(
        "{:>3}  {:<20} {:<16} {:<10} {:>9}  {:>4} likes{badge}",
        artwork.id.to_string(),
        artwork.title,
        artwork.artist,
        artwork.category.as_str(),
        artwork.listing_price().to_string(),
        artwork.likes,
    )
}

pub(crate) fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))
}
