use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Seller {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub credential: Option<String>,
    pub profile_picture_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SellerResponse {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
}

impl From<Seller> for SellerResponse {
    fn from(seller: Seller) -> Self {
        Self {
            id: seller.id,
            email: seller.email,
            display_name: seller.display_name,
            first_name: seller.first_name,
            last_name: seller.last_name,
            bio: seller.bio,
        }
    }
}

/// Seller summary embedded in product payloads.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SellerSummary {
    pub id: i32,
    pub display_name: String,
}
