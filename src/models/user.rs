use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role claim carried in the session token. Users and sellers are separate
/// principal types with separate credential tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Seller,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Seller => "seller",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "seller" => Some(Role::Seller),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    /// bcrypt hash, absent for externally provisioned accounts.
    pub credential: Option<String>,
    pub profile_picture_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub callback_url: Option<String>,
}

/// Partial self-service profile update. The target id travels in the form
/// body, mirroring the hidden field the profile page submits.
#[derive(Debug, Deserialize)]
pub struct UserUpdateRequest {
    pub user_id: String,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub profile_picture_id: Option<i32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            profile_picture_id: user.profile_picture_id,
        }
    }
}
