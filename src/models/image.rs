use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Image {
    pub id: i32,
    pub url: String,
    pub description: String,
    /// Set when the image is a user's profile picture; product images are
    /// linked from the product row instead.
    pub owner_id: Option<i32>,
}

/// Result state for the image upload action. `message` doubles as the
/// success/failure report; field errors are reserved for the description.
#[derive(Debug, Default, Serialize)]
pub struct ImageUploadState {
    pub errors: crate::forms::FieldErrors,
    pub message: Option<String>,
}
