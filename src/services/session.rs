//! Credential sign-in and session cookie issuance.
//!
//! Sign-in failures are classified: bad credentials surface as a known
//! condition the login form can report, everything else collapses into a
//! generic failure.

use axum::{
    http::{HeaderValue, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use cookie::{Cookie, SameSite};
use sqlx::PgPool;

use crate::{
    config::Environment,
    models::Role,
    queries::{seller_queries, user_queries},
    utils::jwt,
};

#[derive(Debug)]
pub enum SignInError {
    InvalidCredentials,
    Other(String),
}

impl std::fmt::Display for SignInError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignInError::InvalidCredentials => write!(f, "invalid credentials"),
            SignInError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// Verifies email + password against the table for `role` and returns a
/// signed session token carrying the role claim.
pub async fn sign_in(
    pool: &PgPool,
    role: Role,
    email: &str,
    password: &str,
) -> Result<String, SignInError> {
    let (id, stored_email, credential) = match role {
        Role::User => {
            let user = user_queries::find_by_email(pool, email)
                .await
                .map_err(|e| SignInError::Other(e.to_string()))?
                .ok_or(SignInError::InvalidCredentials)?;
            (user.id, user.email, user.credential)
        }
        Role::Seller => {
            let seller = seller_queries::find_by_email(pool, email)
                .await
                .map_err(|e| SignInError::Other(e.to_string()))?
                .ok_or(SignInError::InvalidCredentials)?;
            (seller.id, seller.email, seller.credential)
        }
    };

    let credential = credential.ok_or(SignInError::InvalidCredentials)?;

    let is_valid = bcrypt::verify(password, &credential)
        .map_err(|e| SignInError::Other(format!("Password verification failed: {}", e)))?;

    if !is_valid {
        return Err(SignInError::InvalidCredentials);
    }

    jwt::generate_token(id, &stored_email, role).map_err(|e| SignInError::Other(e.to_string()))
}

pub fn session_cookie(environment: Environment, token: &str) -> Cookie<'static> {
    Cookie::build((environment.session_cookie_name(), token.to_string()))
        .path("/")
        .http_only(true)
        .secure(environment == Environment::Production)
        .same_site(SameSite::Lax)
        .build()
}

/// 303 redirect carrying the freshly issued session cookie.
pub fn redirect_with_session(environment: Environment, token: &str, location: &str) -> Response {
    let mut response = Redirect::to(location).into_response();

    match HeaderValue::from_str(&session_cookie(environment, token).to_string()) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => {
            tracing::error!("Failed to encode session cookie: {}", e);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_name_follows_environment() {
        let dev = session_cookie(Environment::Development, "tok");
        assert_eq!(dev.name(), "authjs.session-token");
        assert!(!dev.secure().unwrap_or(false));

        let prod = session_cookie(Environment::Production, "tok");
        assert_eq!(prod.name(), "__Secure-authjs.session-token");
        assert!(prod.secure().unwrap_or(false));
    }
}
