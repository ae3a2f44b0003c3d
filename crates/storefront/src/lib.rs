//! Art gallery storefront library.
//!
//! The shopper-facing core of the gallery: the artwork catalog, a persistent
//! shopping cart, and the multi-step checkout flow. Front ends (the `gallery`
//! CLI, tests) drive it through [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
