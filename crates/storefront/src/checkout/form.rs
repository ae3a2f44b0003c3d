//! Checkout form data.
//!
//! The form lives only for the duration of a checkout session. Card number
//! and CVV are held as [`SecretString`] so they never appear in logs.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Country preselected on new addresses.
pub const DEFAULT_COUNTRY: &str = "United States";

/// A postal address as entered by the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub apartment: String,
    pub city: String,
    pub country: String,
    pub state: String,
    pub zip_code: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            apartment: String::new(),
            city: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            state: String::new(),
            zip_code: String::new(),
        }
    }
}

/// Card details for the payment step.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub card_number: SecretString,
    pub card_name: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub cvv: SecretString,
    pub save_card: bool,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            card_number: SecretString::from(String::new()),
            card_name: String::new(),
            expiry_date: String::new(),
            cvv: SecretString::from(String::new()),
            save_card: false,
        }
    }
}

/// Everything collected across the checkout steps.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutFormData {
    pub email: String,
    pub phone: String,
    pub shipping: Address,
    pub save_info: bool,
    pub same_as_shipping: bool,
    pub billing_address: Address,
    pub payment: PaymentDetails,
}

impl Default for CheckoutFormData {
    fn default() -> Self {
        Self {
            email: String::new(),
            phone: String::new(),
            shipping: Address::default(),
            save_info: false,
            same_as_shipping: true,
            billing_address: Address::default(),
            payment: PaymentDetails::default(),
        }
    }
}

impl CheckoutFormData {
    /// The address to bill, honoring the same-as-shipping flag.
    #[must_use]
    pub const fn effective_billing_address(&self) -> &Address {
        if self.same_as_shipping {
            &self.shipping
        } else {
            &self.billing_address
        }
    }
}
