//! Checkout command.
//!
//! Reads a camelCase JSON checkout form, walks it through each checkout
//! step and places the order.
//!
//! # Usage
//!
//! ```bash
//! gallery checkout --form order.json
//! ```

use std::path::Path;

use art_gallery_storefront::checkout::{
    CheckoutError, CheckoutFormData, CheckoutStep, ValidationErrors,
};
use art_gallery_storefront::error::{AppError, add_breadcrumb};
use art_gallery_storefront::state::AppState;

use super::cart::print_summary;
use super::catalog::to_json;

/// Validate the form step by step, then submit the order.
///
/// # Errors
///
/// Returns an error if the form cannot be read, the cart is empty, a step
/// fails validation, or the submission fails or times out.
#[allow(clippy::print_stdout)]
pub async fn run(state: &AppState, form_path: &Path, json: bool) -> Result<(), AppError> {
    let form = read_form(form_path).await?;
    let mut cart = state.open_cart()?;
    let mut flow = state.checkout_flow().with_form(form);

    if flow.view(&cart) == CheckoutStep::EmptyCart {
        return Err(CheckoutError::EmptyCart.into());
    }

    let totals = flow.totals(&cart);
    if !json {
        print_summary(&totals);
        println!();
    }

    while flow.step() != CheckoutStep::Payment {
        let step = flow.step();
        if let Err(e) = flow.next(&cart) {
            print_field_errors(&e, json)?;
            return Err(e.into());
        }
        add_breadcrumb("checkout", "Step completed", Some(&[("step", step.as_str())]));
        if !json {
            print_step(step);
        }
    }

    if !json {
        println!("Processing payment...");
    }
    let submitter = state.submitter();
    let confirmation = match flow.submit(&mut cart, &submitter).await {
        Ok(confirmation) => confirmation,
        Err(e) => {
            print_field_errors(&e, json)?;
            return Err(e.into());
        }
    };

    if json {
        println!("{}", to_json(confirmation)?);
        return Ok(());
    }

    print_step(CheckoutStep::Payment);
    println!();
    println!("Order placed! Thank you for your purchase.");
    println!("Order number: {}", confirmation.receipt.order_number);
    println!("Confirmation sent to {}", confirmation.email);
    println!("Total charged: {}", confirmation.totals.total_price());
    Ok(())
}

async fn read_form(path: &Path) -> Result<CheckoutFormData, AppError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::BadRequest(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::BadRequest(format!("invalid checkout form {}: {e}", path.display())))
}

#[allow(clippy::print_stdout)]
fn print_step(step: CheckoutStep) {
    if let Some(info) = step.info() {
        println!("[ok] {} {} - {}", info.id, info.name, info.description);
    }
}

/// Field errors go to stdout as `{"errors": {...}}` in JSON mode so the
/// output stays machine readable, and to stderr as text otherwise.
#[allow(clippy::print_stdout, clippy::print_stderr)]
fn print_field_errors(error: &CheckoutError, json: bool) -> Result<(), AppError> {
    let Some(errors) = error.validation_errors() else {
        return Ok(());
    };
    if json {
        println!("{}", field_errors_json(errors)?);
    } else {
        for (field, message) in errors.iter() {
            eprintln!("  {field}: {message}");
        }
    }
    Ok(())
}

fn field_errors_json(errors: &ValidationErrors) -> Result<String, AppError> {
    to_json(&serde_json::json!({ "errors": errors }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_json_is_keyed_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "Email is required");
        errors.add("billing.zipCode", "Please enter a valid ZIP code");

        let value: serde_json::Value =
            serde_json::from_str(&field_errors_json(&errors).unwrap()).unwrap();
        assert_eq!(value["errors"]["email"], "Email is required");
        assert_eq!(value["errors"]["billing.zipCode"], "Please enter a valid ZIP code");
    }
}
