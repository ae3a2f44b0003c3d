//! Integration tests for checkout, from catalog selection to placed order.
//!
//! Submission delays run on paused tokio time, so the simulated payment
//! latency costs nothing.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use art_gallery_core::ArtworkId;
use art_gallery_integration_tests::{TestContext, VALID_FORM_JSON, today, valid_form};
use art_gallery_storefront::catalog::{Catalog, SizeOption};
use art_gallery_storefront::checkout::{CheckoutError, CheckoutFormData, CheckoutStep};
use art_gallery_storefront::config::CheckoutConfig;
use rust_decimal::Decimal;

fn fill_cart(ctx: &TestContext, lines: &[(i32, &str, u32)]) {
    let mut cart = ctx.state.open_cart().unwrap();
    for &(id, size, quantity) in lines {
        let artwork = ctx.state.catalog().require(ArtworkId::new(id)).unwrap();
        cart.add_item(Catalog::line_item(
            artwork,
            SizeOption::find(size).unwrap(),
            quantity,
        ))
        .unwrap();
    }
}

// =============================================================================
// Form Input
// =============================================================================

#[test]
fn test_form_json_defaults() {
    let form: CheckoutFormData = serde_json::from_str(r#"{"email": "a@b.co"}"#).unwrap();
    assert!(form.same_as_shipping);
    assert_eq!(form.shipping.country, "United States");
    assert!(form.phone.is_empty());

    let form = valid_form();
    assert_eq!(form.shipping.zip_code, "97201-1234");
    assert!(!VALID_FORM_JSON.is_empty());
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn test_empty_cart_blocks_checkout() {
    let ctx = TestContext::new();
    let cart = ctx.state.open_cart().unwrap();
    let mut flow = ctx.state.checkout_flow().with_form(valid_form());

    assert_eq!(flow.view(&cart), CheckoutStep::EmptyCart);
    assert!(matches!(flow.next(&cart), Err(CheckoutError::EmptyCart)));
}

#[test]
fn test_invalid_fields_hold_each_step() {
    let ctx = TestContext::new();
    fill_cart(&ctx, &[(1, "medium", 1)]);
    let cart = ctx.state.open_cart().unwrap();

    let mut form = valid_form();
    form.email = "not-an-email".to_string();
    form.shipping.zip_code = "ABCDE".to_string();
    let mut flow = ctx.state.checkout_flow().with_form(form).with_today(today());

    let err = flow.next(&cart).unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().get("email"),
        Some("Please enter a valid email")
    );
    assert_eq!(flow.step(), CheckoutStep::ContactInfo);

    flow.form_mut().email = "collector@example.com".to_string();
    assert_eq!(flow.next(&cart).unwrap(), CheckoutStep::Shipping);

    let err = flow.next(&cart).unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().get("zipCode"),
        Some("Please enter a valid ZIP code")
    );
    assert_eq!(flow.step(), CheckoutStep::Shipping);
}

#[test]
fn test_separate_billing_address_is_validated() {
    let ctx = TestContext::new();
    fill_cart(&ctx, &[(1, "medium", 1)]);
    let cart = ctx.state.open_cart().unwrap();

    let mut form = valid_form();
    form.same_as_shipping = false;
    let mut flow = ctx.state.checkout_flow().with_form(form).with_today(today());
    flow.next(&cart).unwrap();
    flow.next(&cart).unwrap();

    let err = flow.next(&cart).unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert!(errors.contains("billing.firstName"));
    assert!(errors.contains("billing.zipCode"));
    assert_eq!(flow.step(), CheckoutStep::Billing);

    flow.form_mut().same_as_shipping = true;
    assert_eq!(flow.next(&cart).unwrap(), CheckoutStep::Payment);
}

#[tokio::test(start_paused = true)]
async fn test_separate_billing_address_reaches_confirmation() {
    let ctx = TestContext::new();
    fill_cart(&ctx, &[(5, "small", 1)]);
    let mut cart = ctx.state.open_cart().unwrap();

    let mut form = valid_form();
    form.same_as_shipping = false;
    form.billing_address = serde_json::from_str(
        r#"{"firstName": "Grace", "lastName": "Hopper", "address": "9 Harbor Way",
            "city": "Arlington", "state": "VA", "zipCode": "22201"}"#,
    )
    .unwrap();
    let mut flow = ctx.state.checkout_flow().with_form(form).with_today(today());
    for _ in 0..3 {
        flow.next(&cart).unwrap();
    }

    let confirmation = flow
        .submit(&mut cart, &ctx.state.submitter())
        .await
        .unwrap();
    assert_eq!(confirmation.billing.city, "Arlington");
    assert_eq!(confirmation.shipping.city, "Portland");

    let json = serde_json::to_value(confirmation).unwrap();
    assert_eq!(json["billing"]["zipCode"], "22201");
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_full_checkout_clears_persisted_cart() {
    let ctx = TestContext::new();
    fill_cart(&ctx, &[(4, "medium", 1), (8, "large", 1)]);

    let mut cart = ctx.state.open_cart().unwrap();
    let mut flow = ctx.state.checkout_flow().with_form(valid_form()).with_today(today());
    for _ in 0..3 {
        flow.next(&cart).unwrap();
    }

    let confirmation = flow
        .submit(&mut cart, &ctx.state.submitter())
        .await
        .unwrap();
    assert_eq!(confirmation.email.as_str(), "collector@example.com");
    assert_eq!(confirmation.totals.subtotal, Decimal::from(1200));
    assert_eq!(confirmation.totals.shipping, Decimal::ZERO);
    assert_eq!(confirmation.totals.tax, Decimal::from(96));
    assert_eq!(confirmation.totals.total, Decimal::from(1296));
    assert_eq!(confirmation.billing, valid_form().shipping);
    assert_eq!(flow.step(), CheckoutStep::Success);

    drop(cart);
    assert!(ctx.state.open_cart().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_small_order_pays_flat_shipping() {
    let ctx = TestContext::new();
    fill_cart(&ctx, &[(2, "small", 2)]);

    let mut cart = ctx.state.open_cart().unwrap();
    let mut flow = ctx.state.checkout_flow().with_form(valid_form()).with_today(today());
    assert_eq!(flow.totals(&cart).total, Decimal::new(58_999, 2));

    for _ in 0..3 {
        flow.next(&cart).unwrap();
    }
    let confirmation = flow
        .submit(&mut cart, &ctx.state.submitter())
        .await
        .unwrap();
    assert_eq!(confirmation.totals.shipping, Decimal::new(4999, 2));
    assert_eq!(confirmation.totals.total_price().to_string(), "$589.99");
}

#[tokio::test(start_paused = true)]
async fn test_timeout_leaves_cart_for_retry() {
    let ctx = TestContext::with_checkout(CheckoutConfig {
        submit_delay: Duration::from_secs(30),
        submit_timeout: Duration::from_secs(5),
    });
    fill_cart(&ctx, &[(1, "large", 1)]);

    let mut cart = ctx.state.open_cart().unwrap();
    let mut flow = ctx.state.checkout_flow().with_form(valid_form()).with_today(today());
    for _ in 0..3 {
        flow.next(&cart).unwrap();
    }

    let result = flow.submit(&mut cart, &ctx.state.submitter()).await;
    assert!(matches!(result, Err(CheckoutError::SubmissionTimedOut(_))));
    assert_eq!(flow.step(), CheckoutStep::Payment);
    assert!(!flow.submission_status().is_submitting());

    drop(cart);
    assert_eq!(ctx.state.open_cart().unwrap().items().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_expired_card_is_rejected_at_submit() {
    let ctx = TestContext::new();
    fill_cart(&ctx, &[(3, "small", 1)]);

    let mut cart = ctx.state.open_cart().unwrap();
    let mut flow = ctx.state.checkout_flow().with_form(valid_form()).with_today(today());
    for _ in 0..3 {
        flow.next(&cart).unwrap();
    }
    flow.form_mut().payment.expiry_date = "09/26".to_string();

    let err = flow
        .submit(&mut cart, &ctx.state.submitter())
        .await
        .unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().get("expiryDate"),
        Some("This card has expired")
    );
    assert!(!cart.is_empty());
}
