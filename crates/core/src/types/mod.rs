//! Core types for the art gallery.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod zip;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, round_to_cents};
pub use zip::{ZipCode, ZipCodeError};
