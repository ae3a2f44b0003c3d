//! Multi-step checkout.
//!
//! A [`CheckoutFlow`] walks the shopper through contact details, shipping,
//! billing and payment, validating each step before moving on, and finally
//! hands the order to an [`OrderSubmitter`].

mod flow;
mod form;
mod step;
mod submit;
mod totals;
mod validation;

use std::time::Duration;

use thiserror::Error;

pub use flow::{CheckoutFlow, DEFAULT_SUBMIT_TIMEOUT, OrderConfirmation, SubmissionStatus};
pub use form::{Address, CheckoutFormData, DEFAULT_COUNTRY, PaymentDetails};
pub use step::{CheckoutStep, StepInfo};
pub use submit::{
    DEFAULT_SUBMIT_DELAY, OrderRequest, OrderSubmitter, SimulatedSubmitter, SubmissionReceipt,
    SubmitError,
};
pub use totals::{OrderTotals, PricingPolicy};
pub use validation::{
    ValidationErrors, validate_billing, validate_contact, validate_payment, validate_shipping,
    validate_step,
};

/// Errors from checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One or more fields failed validation.
    #[error("Please correct the highlighted fields: {0}")]
    Validation(ValidationErrors),

    #[error("Your cart is empty")]
    EmptyCart,

    /// The operation is not available at the current step.
    #[error("Cannot {operation} from the {step} step")]
    InvalidStep {
        step: CheckoutStep,
        operation: &'static str,
    },

    #[error("This order has already been placed")]
    AlreadyCompleted,

    #[error("An order is already being submitted")]
    SubmissionInFlight,

    #[error("Order submission timed out after {0:?}")]
    SubmissionTimedOut(Duration),

    #[error(transparent)]
    SubmissionFailed(#[from] SubmitError),
}

impl CheckoutError {
    /// Field errors, if this is a validation failure.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
