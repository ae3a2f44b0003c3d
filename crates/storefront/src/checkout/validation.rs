//! Per-step form validation.
//!
//! Each validator returns a field-keyed map of messages; an empty map means
//! the step may advance. Keys use the form's camelCase field names, with a
//! `billing.` prefix for the separate billing address.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use art_gallery_core::{Email, ZipCode};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use secrecy::ExposeSecret;
use serde::Serialize;

use super::form::{Address, CheckoutFormData, PaymentDetails};
use super::step::CheckoutStep;

/// `MM/YY`, month 01-12.
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/(\d{2})$").expect("Invalid regex"));

static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("Invalid regex"));

const PHONE_SEPARATORS: &[char] = &['+', '-', '(', ')', '.', ' '];
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;
const CARD_DIGITS: std::ops::RangeInclusive<usize> = 13..=19;

/// Field-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, keeping the first one reported.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields and messages in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` if no errors were recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate the fields owned by `step`.
///
/// Non-form steps have nothing to validate. `today` anchors the card
/// expiry check.
#[must_use]
pub fn validate_step(step: CheckoutStep, form: &CheckoutFormData, today: NaiveDate) -> ValidationErrors {
    match step {
        CheckoutStep::ContactInfo => validate_contact(form),
        CheckoutStep::Shipping => validate_shipping(form),
        CheckoutStep::Billing => validate_billing(form),
        CheckoutStep::Payment => validate_payment(&form.payment, today),
        CheckoutStep::Success | CheckoutStep::EmptyCart => ValidationErrors::new(),
    }
}

/// Email is required and must look like `local@domain.tld`; phone is optional.
#[must_use]
pub fn validate_contact(form: &CheckoutFormData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if form.email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if Email::parse(&form.email).is_err() {
        errors.add("email", "Please enter a valid email");
    }

    if !form.phone.trim().is_empty() && !is_valid_phone(&form.phone) {
        errors.add("phone", "Please enter a valid phone number");
    }

    errors
}

#[must_use]
pub fn validate_shipping(form: &CheckoutFormData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    validate_address(&form.shipping, "", &mut errors);
    errors
}

/// Only checked when billing differs from shipping.
#[must_use]
pub fn validate_billing(form: &CheckoutFormData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if !form.same_as_shipping {
        validate_address(&form.billing_address, "billing.", &mut errors);
    }
    errors
}

#[must_use]
pub fn validate_payment(payment: &PaymentDetails, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let card_number = payment.card_number.expose_secret();
    if card_number.trim().is_empty() {
        errors.add("cardNumber", "Card number is required");
    } else if !is_valid_card_number(card_number) {
        errors.add("cardNumber", "Please enter a valid card number");
    }

    if payment.card_name.trim().is_empty() {
        errors.add("cardName", "Name on card is required");
    }

    let expiry = payment.expiry_date.trim();
    if expiry.is_empty() {
        errors.add("expiryDate", "Expiry date is required");
    } else {
        match parse_expiry(expiry) {
            None => errors.add("expiryDate", "Please enter a valid expiry date (MM/YY)"),
            Some((year, month)) if (year, month) < (today.year(), today.month()) => {
                errors.add("expiryDate", "This card has expired");
            }
            Some(_) => {}
        }
    }

    let cvv = payment.cvv.expose_secret();
    if cvv.trim().is_empty() {
        errors.add("cvv", "CVV is required");
    } else if !CVV_RE.is_match(cvv.trim()) {
        errors.add("cvv", "Please enter a valid CVV");
    }

    errors
}

fn validate_address(address: &Address, prefix: &str, errors: &mut ValidationErrors) {
    let required = [
        ("firstName", &address.first_name, "First name is required"),
        ("lastName", &address.last_name, "Last name is required"),
        ("address", &address.address, "Address is required"),
        ("city", &address.city, "City is required"),
        ("state", &address.state, "State is required"),
        ("zipCode", &address.zip_code, "ZIP code is required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            errors.add(format!("{prefix}{field}"), message);
        }
    }

    let zip = address.zip_code.trim();
    if !zip.is_empty() && ZipCode::parse(zip).is_err() {
        errors.add(format!("{prefix}zipCode"), "Please enter a valid ZIP code");
    }
}

fn is_valid_phone(phone: &str) -> bool {
    let mut digits = 0;
    for c in phone.trim().chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if !PHONE_SEPARATORS.contains(&c) {
            return false;
        }
    }
    PHONE_DIGITS.contains(&digits)
}

/// Digits (ignoring spaces and dashes) of plausible length passing Luhn.
fn is_valid_card_number(raw: &str) -> bool {
    let digits: Option<Vec<u32>> = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .map(|c| c.to_digit(10))
        .collect();
    let Some(digits) = digits else {
        return false;
    };
    CARD_DIGITS.contains(&digits.len()) && luhn_checksum_ok(&digits)
}

fn luhn_checksum_ok(digits: &[u32]) -> bool {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// `MM/YY` to `(2000 + YY, MM)`.
fn parse_expiry(raw: &str) -> Option<(i32, u32)> {
    let caps = EXPIRY_RE.captures(raw)?;
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    let year: i32 = caps.get(2)?.as_str().parse().ok()?;
    Some((2000 + year, month))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn valid_address() -> Address {
        Address {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 Gallery Row".to_string(),
            city: "Portland".to_string(),
            state: "OR".to_string(),
            zip_code: "97201".to_string(),
            ..Address::default()
        }
    }

    fn valid_payment() -> PaymentDetails {
        PaymentDetails {
            card_number: SecretString::from("4242 4242 4242 4242"),
            card_name: "Ada Lovelace".to_string(),
            expiry_date: "12/28".to_string(),
            cvv: SecretString::from("123"),
            save_card: false,
        }
    }

    #[test]
    fn test_contact_requires_email() {
        let form = CheckoutFormData::default();
        let errors = validate_contact(&form);
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn test_contact_whitespace_email_is_missing() {
        let form = CheckoutFormData {
            email: "   ".to_string(),
            ..CheckoutFormData::default()
        };
        let errors = validate_contact(&form);
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn test_contact_rejects_malformed_email() {
        let form = CheckoutFormData {
            email: "not-an-email".to_string(),
            ..CheckoutFormData::default()
        };
        let errors = validate_contact(&form);
        assert_eq!(errors.get("email"), Some("Please enter a valid email"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_contact_accepts_valid_email() {
        let form = CheckoutFormData {
            email: "collector@example.com".to_string(),
            ..CheckoutFormData::default()
        };
        assert!(validate_contact(&form).is_empty());
    }

    #[test]
    fn test_contact_phone_rules() {
        let mut form = CheckoutFormData {
            email: "collector@example.com".to_string(),
            phone: "+1 (503) 555-0142".to_string(),
            ..CheckoutFormData::default()
        };
        assert!(validate_contact(&form).is_empty());

        form.phone = "call me".to_string();
        assert!(validate_contact(&form).contains("phone"));

        form.phone = "555-01".to_string();
        assert!(validate_contact(&form).contains("phone"));
    }

    #[test]
    fn test_shipping_required_fields() {
        let form = CheckoutFormData::default();
        let errors = validate_shipping(&form);
        for field in ["firstName", "lastName", "address", "city", "state", "zipCode"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains("apartment"));
    }

    #[test]
    fn test_shipping_zip_format() {
        let mut form = CheckoutFormData {
            shipping: valid_address(),
            ..CheckoutFormData::default()
        };
        assert!(validate_shipping(&form).is_empty());

        form.shipping.zip_code = "97201-1234".to_string();
        assert!(validate_shipping(&form).is_empty());

        form.shipping.zip_code = "972".to_string();
        assert_eq!(
            validate_shipping(&form).get("zipCode"),
            Some("Please enter a valid ZIP code")
        );
    }

    #[test]
    fn test_billing_same_as_shipping_skips_checks() {
        let form = CheckoutFormData::default();
        assert!(validate_billing(&form).is_empty());
    }

    #[test]
    fn test_billing_separate_address_checked() {
        let mut form = CheckoutFormData {
            same_as_shipping: false,
            ..CheckoutFormData::default()
        };
        let errors = validate_billing(&form);
        assert!(errors.contains("billing.firstName"));
        assert!(errors.contains("billing.zipCode"));

        form.billing_address = valid_address();
        assert!(validate_billing(&form).is_empty());
    }

    #[test]
    fn test_payment_valid() {
        assert!(validate_payment(&valid_payment(), today()).is_empty());
    }

    #[test]
    fn test_payment_required_fields() {
        let errors = validate_payment(&PaymentDetails::default(), today());
        assert_eq!(errors.get("cardNumber"), Some("Card number is required"));
        assert_eq!(errors.get("cardName"), Some("Name on card is required"));
        assert_eq!(errors.get("expiryDate"), Some("Expiry date is required"));
        assert_eq!(errors.get("cvv"), Some("CVV is required"));
    }

    #[test]
    fn test_payment_card_number_checksum() {
        let mut payment = valid_payment();
        payment.card_number = SecretString::from("4242 4242 4242 4241");
        assert!(validate_payment(&payment, today()).contains("cardNumber"));

        payment.card_number = SecretString::from("4242-4242-4242-4242");
        assert!(!validate_payment(&payment, today()).contains("cardNumber"));

        payment.card_number = SecretString::from("4242x4242");
        assert!(validate_payment(&payment, today()).contains("cardNumber"));
    }

    #[test]
    fn test_payment_expiry() {
        let mut payment = valid_payment();

        payment.expiry_date = "13/28".to_string();
        assert_eq!(
            validate_payment(&payment, today()).get("expiryDate"),
            Some("Please enter a valid expiry date (MM/YY)")
        );

        payment.expiry_date = "09/26".to_string();
        assert_eq!(
            validate_payment(&payment, today()).get("expiryDate"),
            Some("This card has expired")
        );

        payment.expiry_date = "10/26".to_string();
        assert!(validate_payment(&payment, today()).is_empty());
    }

    #[test]
    fn test_payment_cvv() {
        let mut payment = valid_payment();
        payment.cvv = SecretString::from("1234");
        assert!(validate_payment(&payment, today()).is_empty());

        payment.cvv = SecretString::from("12");
        assert_eq!(
            validate_payment(&payment, today()).get("cvv"),
            Some("Please enter a valid CVV")
        );
    }

    #[test]
    fn test_validate_step_dispatch() {
        let form = CheckoutFormData::default();
        assert!(validate_step(CheckoutStep::ContactInfo, &form, today()).contains("email"));
        assert!(validate_step(CheckoutStep::Shipping, &form, today()).contains("city"));
        assert!(validate_step(CheckoutStep::Billing, &form, today()).is_empty());
        assert!(validate_step(CheckoutStep::Payment, &form, today()).contains("cvv"));
        assert!(validate_step(CheckoutStep::Success, &form, today()).is_empty());
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("zipCode", "ZIP code is required");
        errors.add("city", "City is required");
        errors.add("city", "ignored");
        assert_eq!(
            errors.to_string(),
            "city: City is required; zipCode: ZIP code is required"
        );
    }
}
