//! Explicit per-form validation. Each submitted shape gets one validation
//! function returning either unit or a field-keyed error map; rejected
//! submissions echo the non-secret fields back so the page can re-render
//! the form filled in.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{CreateProductRequest, SignupRequest, UpdateProductRequest, UserUpdateRequest};

pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

/// Rejection body for a form action: field errors plus the echoed input.
#[derive(Debug, Serialize)]
pub struct FormReject<E: Serialize> {
    pub errors: FieldErrors,
    pub form_data: E,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn push(errors: &mut FieldErrors, field: &'static str, message: &str) {
    errors.entry(field).or_default().push(message.to_string());
}

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Serialize)]
pub struct SignupEcho {
    pub email: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
}

impl SignupEcho {
    pub fn of(req: &SignupRequest) -> Self {
        Self {
            email: req.email.clone(),
            display_name: req.display_name.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
        }
    }
}

pub fn validate_signup(req: &SignupRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if req.email.is_empty() || !req.email.contains('@') {
        push(&mut errors, "email", "Invalid email address");
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        push(
            &mut errors,
            "password",
            "Password must be at least 6 characters",
        );
    }
    if req.display_name.trim().is_empty() {
        push(&mut errors, "display_name", "Display name cannot be empty");
    }
    if req.first_name.trim().is_empty() {
        push(&mut errors, "first_name", "First name cannot be empty");
    }
    if req.last_name.trim().is_empty() {
        push(&mut errors, "last_name", "Last name cannot be empty");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Field error used when the duplicate-email pre-check trips. The rest of
/// the payload is deliberately not validated in that case.
pub fn email_taken_error() -> FieldErrors {
    let mut errors = FieldErrors::new();
    push(&mut errors, "email", "That email is already in use");
    errors
}

#[derive(Debug, Serialize)]
pub struct UserUpdateEcho {
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

impl UserUpdateEcho {
    pub fn of(req: &UserUpdateRequest) -> Self {
        Self {
            display_name: req.display_name.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            bio: req.bio.clone(),
        }
    }
}

/// Echo of a submitted product form, shared by create and update
/// rejections. Everything submitted is non-secret and comes back.
#[derive(Debug, Serialize)]
pub struct ProductEcho {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub discount_percent: Option<Decimal>,
    pub discount_absolute: Option<Decimal>,
    pub image_url: Option<String>,
}

impl ProductEcho {
    pub fn of_create(req: &CreateProductRequest) -> Self {
        Self {
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            category: req.category.clone(),
            discount_percent: req.discount_percent,
            discount_absolute: req.discount_absolute,
            image_url: Some(req.image_url.clone()),
        }
    }

    pub fn of_update(req: &UpdateProductRequest) -> Self {
        Self {
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            category: req.category.clone(),
            discount_percent: req.discount_percent,
            discount_absolute: req.discount_absolute,
            image_url: req.image_url.clone(),
        }
    }
}

fn validate_product_fields(
    name: &str,
    category: &str,
    price: Decimal,
    discount_percent: Option<Decimal>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if name.trim().is_empty() {
        push(&mut errors, "name", "Name cannot be empty");
    }
    if category.trim().is_empty() {
        push(&mut errors, "category", "Category cannot be empty");
    }
    if price < Decimal::ZERO {
        push(&mut errors, "price", "Price cannot be negative");
    }
    if let Some(percent) = discount_percent {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            push(
                &mut errors,
                "discount_percent",
                "Discount must be between 0 and 100",
            );
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_create_product(req: &CreateProductRequest) -> Result<(), FieldErrors> {
    validate_product_fields(&req.name, &req.category, req.price, req.discount_percent)
}

pub fn validate_update_product(req: &UpdateProductRequest) -> Result<(), FieldErrors> {
    validate_product_fields(&req.name, &req.category, req.price, req.discount_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn signup(email: &str, password: &str, display: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            display_name: display.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
        }
    }

    #[test]
    fn valid_signup_passes() {
        assert!(validate_signup(&signup("ana@example.com", "hunter22", "ana")).is_ok());
    }

    #[test]
    fn errors_match_exactly_the_invalid_fields() {
        let errors = validate_signup(&signup("not-an-email", "abc", "ana")).unwrap_err();
        assert_eq!(
            errors.keys().copied().collect::<Vec<_>>(),
            vec!["email", "password"]
        );
    }

    #[test]
    fn empty_names_are_rejected() {
        let errors = validate_signup(&signup("ana@example.com", "hunter22", "  ")).unwrap_err();
        assert!(errors.contains_key("display_name"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn email_taken_error_only_keys_email() {
        let errors = email_taken_error();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["email"], vec!["That email is already in use"]);
    }

    #[test]
    fn product_discount_bounds_are_checked() {
        let req = CreateProductRequest {
            name: "Lamp".to_string(),
            description: None,
            price: Decimal::from_str("50").unwrap(),
            category: "home".to_string(),
            discount_percent: Some(Decimal::from_str("120").unwrap()),
            discount_absolute: None,
            seller_id: 1,
            image_url: "https://img.example/lamp.png".to_string(),
        };
        let errors = validate_create_product(&req).unwrap_err();
        assert!(errors.contains_key("discount_percent"));
    }

    #[test]
    fn product_reject_echoes_every_submitted_field() {
        let req = CreateProductRequest {
            name: "Lamp".to_string(),
            description: Some("Brass".to_string()),
            price: Decimal::from_str("50").unwrap(),
            category: "".to_string(),
            discount_percent: Some(Decimal::from_str("10").unwrap()),
            discount_absolute: None,
            seller_id: 1,
            image_url: "https://img.example/lamp.png".to_string(),
        };
        let reject = FormReject {
            errors: validate_create_product(&req).unwrap_err(),
            form_data: ProductEcho::of_create(&req),
            message: None,
        };

        let body = serde_json::to_value(&reject).unwrap();
        assert_eq!(body["errors"]["category"][0], "Category cannot be empty");
        let form_data = &body["form_data"];
        assert_eq!(form_data["name"], "Lamp");
        assert_eq!(form_data["description"], "Brass");
        assert_eq!(form_data["category"], "");
        assert_eq!(form_data["image_url"], "https://img.example/lamp.png");
        assert!(!form_data["price"].is_null());
        assert!(!form_data["discount_percent"].is_null());
    }
}
