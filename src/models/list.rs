use serde::{Deserialize, Serialize};

use crate::models::ProductSummary;

/// A named collection of products owned by a user (wishlist, cart).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct List {
    pub id: i32,
    pub name: String,
    pub user_id: i32,
}

#[derive(Debug, Serialize)]
pub struct ListWithProducts {
    pub id: i32,
    pub name: String,
    pub user_id: i32,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Deserialize)]
pub struct AddToListRequest {
    pub product_id: i32,
}
