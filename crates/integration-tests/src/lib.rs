//! Integration tests for the art gallery storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p art-gallery-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store against real files on disk
//! - `checkout_flow` - Catalog to cart to placed order
//!
//! Every test gets its own data directory via [`TestContext`], so tests can
//! run in parallel.

use std::time::Duration;

use art_gallery_storefront::checkout::CheckoutFormData;
use art_gallery_storefront::config::{CheckoutConfig, StorefrontConfig};
use art_gallery_storefront::state::AppState;
use chrono::NaiveDate;
use tempfile::TempDir;

/// A fully valid checkout form, as a front end would post it.
pub const VALID_FORM_JSON: &str = r#"{
    "email": "collector@example.com",
    "phone": "(503) 555-0142",
    "shipping": {
        "firstName": "Ada",
        "lastName": "Lovelace",
        "address": "12 Gallery Row",
        "apartment": "Unit 4",
        "city": "Portland",
        "state": "OR",
        "zipCode": "97201-1234"
    },
    "saveInfo": true,
    "sameAsShipping": true,
    "payment": {
        "cardNumber": "4242 4242 4242 4242",
        "cardName": "Ada Lovelace",
        "expiryDate": "12/28",
        "cvv": "123"
    }
}"#;

/// Isolated application state backed by a temporary data directory.
pub struct TestContext {
    pub state: AppState,
    dir: TempDir,
}

impl TestContext {
    /// Context with the default checkout timing: a 1.5 s simulated payment
    /// delay under a 10 s timeout. Tests run it on paused tokio time.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self::with_checkout(CheckoutConfig {
            submit_delay: Duration::from_millis(1500),
            submit_timeout: Duration::from_secs(10),
        })
    }

    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn with_checkout(checkout: CheckoutConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StorefrontConfig {
            data_dir: dir.path().join("gallery"),
            checkout,
            ..StorefrontConfig::default()
        };
        Self {
            state: AppState::new(config),
            dir,
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("gallery")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse [`VALID_FORM_JSON`].
///
/// # Panics
///
/// Panics if the fixture is not valid JSON for the form.
#[must_use]
pub fn valid_form() -> CheckoutFormData {
    serde_json::from_str(VALID_FORM_JSON).expect("Invalid form fixture")
}

/// Fixed "today" for card-expiry checks.
///
/// # Panics
///
/// Never; the date is a valid constant.
#[must_use]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("Invalid date")
}
