use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ReviewView, SellerSummary};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub discount_percent: Decimal,
    pub discount_absolute: Decimal,
    pub seller_id: i32,
    pub image_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub discount_percent: Option<Decimal>,
    pub discount_absolute: Option<Decimal>,
    pub seller_id: i32,
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub discount_percent: Option<Decimal>,
    pub discount_absolute: Option<Decimal>,
    /// When absent the existing image is preserved.
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub seller_id: Option<i32>,
    pub category: Option<String>,
}

/// Flat row shape for the listing join (product + primary image + seller).
#[derive(Debug, sqlx::FromRow)]
pub struct ProductListingRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub discount_percent: Decimal,
    pub discount_absolute: Decimal,
    pub image_url: Option<String>,
    pub seller_id: i32,
    pub seller_display_name: String,
}

#[derive(Debug, Serialize)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub discount_percent: Decimal,
    pub discount_absolute: Decimal,
    pub image_url: Option<String>,
    pub seller: SellerSummary,
}

impl From<ProductListingRow> for ProductSummary {
    fn from(row: ProductListingRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            discount_percent: row.discount_percent,
            discount_absolute: row.discount_absolute,
            image_url: row.image_url,
            seller: SellerSummary {
                id: row.seller_id,
                display_name: row.seller_display_name,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub discount_percent: Decimal,
    pub discount_absolute: Decimal,
    pub image_url: Option<String>,
    pub seller: SellerSummary,
    pub reviews: Vec<ReviewView>,
    /// Clamped average of the review ratings, one decimal place.
    pub average_rating: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Category {
    pub category: String,
}

/// Absolute discount defaults to `price * percent / 100` when not supplied
/// explicitly. Computed once at create/update time, never re-derived.
pub fn derive_discount_absolute(
    price: Decimal,
    discount_percent: Option<Decimal>,
    discount_absolute: Option<Decimal>,
) -> Decimal {
    if let Some(absolute) = discount_absolute {
        return absolute;
    }
    match discount_percent {
        Some(percent) => price * percent / Decimal::ONE_HUNDRED,
        None => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn absolute_discount_derived_from_percent() {
        let got = derive_discount_absolute(dec("200"), Some(dec("15")), None);
        assert_eq!(got, dec("30"));
    }

    #[test]
    fn explicit_absolute_discount_wins() {
        let got = derive_discount_absolute(dec("200"), Some(dec("15")), Some(dec("25")));
        assert_eq!(got, dec("25"));
    }

    #[test]
    fn no_discount_fields_means_zero() {
        assert_eq!(
            derive_discount_absolute(dec("200"), None, None),
            Decimal::ZERO
        );
    }
}
