//! Art Gallery Core - Shared domain types.
//!
//! This crate provides the value types used across the gallery components:
//! - `storefront` - Catalog, cart store and checkout flow
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no storage,
//! no async runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for artwork IDs, prices, emails, and ZIP codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
