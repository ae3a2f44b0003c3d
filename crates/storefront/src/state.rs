//! Application state shared across commands.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::checkout::{CheckoutFlow, SimulatedSubmitter};
use crate::config::StorefrontConfig;
use crate::storage::{FileStore, StorageError};

/// Application state shared across the storefront.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the read-only catalog. The cart is not shared;
/// each caller opens its own [`CartStore`].
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create application state with the gallery catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_catalog(config, Catalog::gallery())
    }

    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the artwork catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Open the persisted cart in the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>, StorageError> {
        let storage = FileStore::open(&self.inner.config.data_dir)?;
        Ok(CartStore::open(storage))
    }

    /// A fresh checkout flow using the configured submission timeout.
    #[must_use]
    pub fn checkout_flow(&self) -> CheckoutFlow {
        CheckoutFlow::new().with_submit_timeout(self.inner.config.checkout.submit_timeout)
    }

    /// The simulated payment processor with the configured delay.
    #[must_use]
    pub fn submitter(&self) -> SimulatedSubmitter {
        SimulatedSubmitter::new(self.inner.config.checkout.submit_delay)
    }
}
