//! Order submission.
//!
//! There is no payment backend; [`SimulatedSubmitter`] stands in for the
//! network call with a fixed delay. Anything implementing
//! [`OrderSubmitter`] can replace it.

use std::future::Future;
use std::time::Duration;

use art_gallery_core::Email;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::form::Address;
use super::totals::OrderTotals;
use crate::cart::CartItem;

/// Default artificial latency of the simulated submission.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// Errors reported by an [`OrderSubmitter`].
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The order was declined.
    #[error("Order rejected: {0}")]
    Rejected(String),
}

/// Snapshot of the order sent for confirmation.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub email: Email,
    pub shipping: Address,
    /// The shipping address when the shopper bills to it, otherwise the
    /// separately entered billing address.
    pub billing: Address,
    pub items: Vec<CartItem>,
    pub totals: OrderTotals,
}

/// What the submitter hands back for an accepted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub order_number: Uuid,
    pub placed_at: DateTime<Utc>,
}

/// Places orders.
pub trait OrderSubmitter {
    /// Submit `order` and wait for confirmation.
    fn submit(
        &self,
        order: &OrderRequest,
    ) -> impl Future<Output = Result<SubmissionReceipt, SubmitError>> + Send;
}

/// Confirms every order after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl OrderSubmitter for SimulatedSubmitter {
    fn submit(
        &self,
        order: &OrderRequest,
    ) -> impl Future<Output = Result<SubmissionReceipt, SubmitError>> + Send {
        let delay = self.delay;
        let lines = order.items.len();
        let total = order.totals.total;
        async move {
            tracing::info!(lines, %total, ?delay, "Processing payment");
            tokio::time::sleep(delay).await;
            let receipt = SubmissionReceipt {
                order_number: Uuid::new_v4(),
                placed_at: Utc::now(),
            };
            tracing::info!(order_number = %receipt.order_number, "Order confirmed");
            Ok(receipt)
        }
    }
}
