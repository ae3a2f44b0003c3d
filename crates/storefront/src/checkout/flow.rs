//! The checkout state machine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use art_gallery_core::Email;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::instrument;

use super::form::{Address, CheckoutFormData};
use super::step::CheckoutStep;
use super::submit::{OrderRequest, OrderSubmitter, SubmissionReceipt};
use super::totals::{OrderTotals, PricingPolicy};
use super::validation::{ValidationErrors, validate_step};
use super::CheckoutError;
use crate::cart::{CartItem, CartStore};
use crate::storage::KeyValueStore;

/// Default upper bound on how long a submission may take.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// A placed order, kept for the success view after the cart is cleared.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    #[serde(flatten)]
    pub receipt: SubmissionReceipt,
    pub email: Email,
    pub shipping: Address,
    pub billing: Address,
    pub items: Vec<CartItem>,
    pub totals: OrderTotals,
}

/// Read-only view of whether a submission is currently running.
///
/// Hand this to whatever renders the submit control so it can be disabled
/// while an order is in flight. The flag is only observable from outside the
/// flow: [`CheckoutFlow::submit`] borrows the flow mutably, so the flow's own
/// owner cannot start a second submission until the first one resolves.
#[derive(Debug, Clone)]
pub struct SubmissionStatus(Arc<AtomicBool>);

impl SubmissionStatus {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Holds the in-flight flag for the lifetime of one submission. Dropping it,
/// including when the submitting future is cancelled, releases the flag.
///
/// Acquisition fails only if the flag was left set, which the drop impl
/// rules out; the flag's audience is [`SubmissionStatus`] holders.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One shopper's pass through checkout.
///
/// The flow owns the transient form and the current step; the cart is read
/// from the [`CartStore`] on every call so totals are never stale.
#[derive(Debug)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    form: CheckoutFormData,
    errors: ValidationErrors,
    confirmation: Option<OrderConfirmation>,
    in_flight: Arc<AtomicBool>,
    policy: PricingPolicy,
    submit_timeout: Duration,
    today: Option<NaiveDate>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// Start at `ContactInfo` with an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::ContactInfo,
            form: CheckoutFormData::default(),
            errors: ValidationErrors::new(),
            confirmation: None,
            in_flight: Arc::new(AtomicBool::new(false)),
            policy: PricingPolicy::STANDARD,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
            today: None,
        }
    }

    #[must_use]
    pub fn with_form(mut self, form: CheckoutFormData) -> Self {
        self.form = form;
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// Pin the date used for card-expiry checks. Defaults to today (UTC).
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The stored step, ignoring cart contents.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The step to display: `EmptyCart` whenever the cart is empty and the
    /// order has not been placed.
    #[must_use]
    pub fn view<S: KeyValueStore>(&self, cart: &CartStore<S>) -> CheckoutStep {
        if cart.is_empty() && self.step != CheckoutStep::Success {
            CheckoutStep::EmptyCart
        } else {
            self.step
        }
    }

    #[must_use]
    pub const fn form(&self) -> &CheckoutFormData {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut CheckoutFormData {
        &mut self.form
    }

    /// Errors from the most recent failed validation.
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub const fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    #[must_use]
    pub fn submission_status(&self) -> SubmissionStatus {
        SubmissionStatus(Arc::clone(&self.in_flight))
    }

    /// Order summary for the cart's current contents.
    #[must_use]
    pub fn totals<S: KeyValueStore>(&self, cart: &CartStore<S>) -> OrderTotals {
        OrderTotals::with_policy(cart.items(), &self.policy)
    }

    /// Validate the current step and advance one step.
    ///
    /// From `Payment` the fields are validated but the step does not change;
    /// only [`CheckoutFlow::submit`] leads to `Success`.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::Validation` if the step's fields fail; the flow stays put
    /// - `CheckoutError::EmptyCart` if there is nothing to check out
    /// - `CheckoutError::AlreadyCompleted` once the order was placed
    #[instrument(skip(self, cart), fields(step = %self.step))]
    pub fn next<S: KeyValueStore>(&mut self, cart: &CartStore<S>) -> Result<CheckoutStep, CheckoutError> {
        self.ensure_open(cart)?;

        let errors = validate_step(self.step, &self.form, self.today());
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "Step validation failed");
            self.errors = errors.clone();
            return Err(CheckoutError::Validation(errors));
        }

        self.errors = ValidationErrors::new();
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        tracing::debug!(to = %self.step, "Checkout advanced");
        Ok(self.step)
    }

    /// Go back one step without validating. Stays at `ContactInfo` when
    /// already there, and never leaves `Success`.
    pub fn previous(&mut self) -> CheckoutStep {
        self.step = self.step.previous();
        self.errors = ValidationErrors::new();
        self.step
    }

    /// Place the order.
    ///
    /// Every form step is re-validated, then the submitter is called under
    /// the configured timeout. On confirmation the cart is cleared and the
    /// flow enters `Success`.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::InvalidStep` unless the flow is at `Payment`
    /// - `CheckoutError::Validation` if any form field fails
    /// - `CheckoutError::SubmissionInFlight` if the in-flight flag is already held
    /// - `CheckoutError::SubmissionTimedOut` / `SubmissionFailed` from the submitter;
    ///   the flow stays at `Payment` and the cart is untouched
    #[instrument(skip_all, fields(step = %self.step))]
    pub async fn submit<S, O>(
        &mut self,
        cart: &mut CartStore<S>,
        submitter: &O,
    ) -> Result<&OrderConfirmation, CheckoutError>
    where
        S: KeyValueStore,
        O: OrderSubmitter,
    {
        self.ensure_open(cart)?;
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::InvalidStep {
                step: self.step,
                operation: "submit",
            });
        }

        let errors = self.validate_all();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(CheckoutError::Validation(errors));
        }
        self.errors = ValidationErrors::new();

        let email = Email::parse(&self.form.email).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("email", e.to_string());
            CheckoutError::Validation(errors)
        })?;
        let request = OrderRequest {
            email,
            shipping: self.form.shipping.clone(),
            billing: self.form.effective_billing_address().clone(),
            items: cart.items().to_vec(),
            totals: self.totals(cart),
        };

        let guard = InFlightGuard::acquire(&self.in_flight).ok_or(CheckoutError::SubmissionInFlight)?;
        let outcome = tokio::time::timeout(self.submit_timeout, submitter.submit(&request)).await;
        drop(guard);

        let receipt = match outcome {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Order submission failed");
                return Err(CheckoutError::SubmissionFailed(e));
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.submit_timeout, "Order submission timed out");
                return Err(CheckoutError::SubmissionTimedOut(self.submit_timeout));
            }
        };

        if let Err(e) = cart.clear() {
            tracing::warn!(error = %e, "Order placed but cleared cart was not persisted");
        }

        self.step = CheckoutStep::Success;
        tracing::info!(order_number = %receipt.order_number, "Checkout complete");
        Ok(self.confirmation.insert(OrderConfirmation {
            receipt,
            email: request.email,
            shipping: request.shipping,
            billing: request.billing,
            items: request.items,
            totals: request.totals,
        }))
    }

    fn ensure_open<S: KeyValueStore>(&self, cart: &CartStore<S>) -> Result<(), CheckoutError> {
        if self.step == CheckoutStep::Success {
            return Err(CheckoutError::AlreadyCompleted);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(())
    }

    fn validate_all(&self) -> ValidationErrors {
        let today = self.today();
        let mut all = ValidationErrors::new();
        for step in CheckoutStep::FORM_STEPS {
            for (field, message) in validate_step(step, &self.form, today).iter() {
                all.add(field, message);
            }
        }
        all
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}
