use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AppError, Result};
use crate::models::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    /// Role string as issued; kept untyped so the route guard can reject
    /// tokens carrying roles this service does not know about.
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn parsed_role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

pub fn generate_token(principal_id: i32, email: &str, role: Role) -> Result<String> {
    let jwt_secret = env::var("JWT_SECRET")
        .map_err(|_| AppError::ConfigError("JWT_SECRET not set".to_string()))?;

    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::days(30))
        .ok_or_else(|| AppError::InternalError("Failed to calculate expiration".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: principal_id.to_string(),
        email: email.to_string(),
        role: role.as_str().to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token generation failed: {}", e)))
}

pub fn verify_token(token: &str) -> Result<Claims> {
    let jwt_secret = env::var("JWT_SECRET")
        .map_err(|_| AppError::ConfigError("JWT_SECRET not set".to_string()))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::BadRequest(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_preserves_claims() {
        env::set_var("JWT_SECRET", "test-secret");

        let token = generate_token(42, "ana@example.com", Role::Seller).unwrap();
        let claims = verify_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.parsed_role(), Some(Role::Seller));
    }

    #[test]
    fn garbage_token_is_rejected() {
        env::set_var("JWT_SECRET", "test-secret");

        assert!(verify_token("not-a-token").is_err());
    }
}
