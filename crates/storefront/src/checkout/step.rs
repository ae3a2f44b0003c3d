//! Checkout steps.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A stage of the checkout sequence.
///
/// ```text
/// ContactInfo ──► Shipping ──► Billing ──► Payment ──► Success
///      ◄──────────────◄───────────◄
/// ```
///
/// `EmptyCart` is never stored; it is what a view shows in place of any
/// form step while the cart has no items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    ContactInfo,
    Shipping,
    Billing,
    Payment,
    Success,
    EmptyCart,
}

/// Progress-bar metadata for a form step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl CheckoutStep {
    /// The four form steps, in order.
    pub const FORM_STEPS: [Self; 4] = [Self::ContactInfo, Self::Shipping, Self::Billing, Self::Payment];

    /// The following step for forward navigation, if any.
    ///
    /// `Payment` has no `next`: only a confirmed submission reaches `Success`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::ContactInfo => Some(Self::Shipping),
            Self::Shipping => Some(Self::Billing),
            Self::Billing => Some(Self::Payment),
            Self::Payment | Self::Success | Self::EmptyCart => None,
        }
    }

    /// The preceding step, clamped at `ContactInfo`.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Shipping => Self::ContactInfo,
            Self::Billing => Self::Shipping,
            Self::Payment => Self::Billing,
            Self::ContactInfo | Self::Success | Self::EmptyCart => self,
        }
    }

    /// Whether the step collects form input.
    #[must_use]
    pub const fn is_form_step(self) -> bool {
        matches!(
            self,
            Self::ContactInfo | Self::Shipping | Self::Billing | Self::Payment
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success)
    }

    /// One-based position among the form steps.
    #[must_use]
    pub const fn number(self) -> Option<u8> {
        match self {
            Self::ContactInfo => Some(1),
            Self::Shipping => Some(2),
            Self::Billing => Some(3),
            Self::Payment => Some(4),
            Self::Success | Self::EmptyCart => None,
        }
    }

    /// Progress-bar labels for form steps.
    #[must_use]
    pub const fn info(self) -> Option<StepInfo> {
        let (id, name, description) = match self {
            Self::ContactInfo => ("01", "Contact Info", "Your contact information"),
            Self::Shipping => ("02", "Shipping", "Shipping address"),
            Self::Billing => ("03", "Billing", "Payment method"),
            Self::Payment => ("04", "Review", "Review your order"),
            Self::Success | Self::EmptyCart => return None,
        };
        Some(StepInfo {
            id,
            name,
            description,
        })
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContactInfo => "contact_info",
            Self::Shipping => "shipping",
            Self::Billing => "billing",
            Self::Payment => "payment",
            Self::Success => "success",
            Self::EmptyCart => "empty_cart",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
