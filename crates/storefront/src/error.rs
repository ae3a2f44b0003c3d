//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that front ends return from every
//! command. [`AppError::report`] captures unexpected failures to Sentry and
//! [`AppError::exit_code`] maps each error to a process exit status.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Exit statuses, following the BSD `sysexits.h` conventions.
pub mod exit {
    pub const USAGE: i32 = 64;
    pub const DATA: i32 = 65;
    pub const NO_INPUT: i32 = 66;
    pub const UNAVAILABLE: i32 = 69;
    pub const SOFTWARE: i32 = 70;
    pub const IO: i32 = 74;
    pub const TEMP_FAIL: i32 = 75;
    pub const CONFIG: i32 = 78;
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Persistent storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error indicates a fault rather than bad input.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(
            self,
            Self::Storage(_)
                | Self::Internal(_)
                | Self::Cart(CartError::Storage(_))
                | Self::Checkout(CheckoutError::SubmissionFailed(_))
        )
    }

    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => exit::CONFIG,
            Self::Storage(_) | Self::Cart(CartError::Storage(_)) => exit::IO,
            Self::Cart(_) | Self::Checkout(CheckoutError::Validation(_)) => exit::DATA,
            Self::Catalog(CatalogError::ArtworkNotFound(_)) => exit::NO_INPUT,
            Self::Catalog(_) | Self::BadRequest(_) => exit::USAGE,
            Self::Checkout(CheckoutError::SubmissionTimedOut(_) | CheckoutError::SubmissionInFlight) => {
                exit::TEMP_FAIL
            }
            Self::Checkout(CheckoutError::SubmissionFailed(_)) => exit::UNAVAILABLE,
            Self::Checkout(_) => exit::DATA,
            Self::Internal(_) => exit::SOFTWARE,
        }
    }

    /// Message safe to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        // Don't expose internal error details to shoppers
        match self {
            Self::Storage(_) | Self::Cart(CartError::Storage(_)) => {
                "Your cart could not be saved".to_string()
            }
            Self::Internal(_) => "Internal error".to_string(),
            Self::Config(e) => e.to_string(),
            Self::Cart(e) => e.to_string(),
            Self::Catalog(e) => e.to_string(),
            Self::Checkout(e) => e.to_string(),
            Self::BadRequest(_) => self.to_string(),
        }
    }

    /// Log the error, capturing unexpected failures to Sentry.
    pub fn report(&self) {
        if self.is_unexpected() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command error"
            );
        } else {
            tracing::debug!(error = %self, "Command rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added artwork", Some(&[("artwork_id", "7")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
