//! Role-gated route guard for the product and cart namespaces.
//!
//! Every matched request is re-evaluated from scratch: extract the session
//! token from the environment-dependent cookie, read its role claim, and
//! decide between letting the request through, redirecting to the
//! role-appropriate login portal (with the original URL as `callbackUrl`),
//! or redirecting to `/unauthorized`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use cookie::Cookie;
use http::{Uri, header::COOKIE};
use url::form_urlencoded;

use crate::{
    config::{AuthConfig, Environment},
    models::Role,
    utils::jwt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    User,
    Seller,
}

impl Portal {
    pub fn login_path(self) -> &'static str {
        match self {
            Portal::User => "/users/login",
            Portal::Seller => "/sellers/login",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Login(Portal),
    Unauthorized,
}

/// Paths only a seller may use: their own listing overview, product
/// creation, and per-product edit.
fn is_seller_only(path: &str) -> bool {
    path.starts_with("/products/listing")
        || path.starts_with("/products/create")
        || (path.starts_with("/products/") && path.trim_end_matches('/').ends_with("/edit"))
}

/// The authorization policy, separated from request plumbing. `role` is the
/// raw claim string (None when there is no usable token); unknown roles are
/// never allowed through.
pub fn authorize(role: Option<&str>, path: &str) -> GuardDecision {
    let Some(role) = role else {
        let portal = if is_seller_only(path) {
            Portal::Seller
        } else {
            Portal::User
        };
        return GuardDecision::Login(portal);
    };

    match Role::parse(role) {
        Some(Role::Seller) if path.starts_with("/products") => GuardDecision::Allow,
        Some(Role::User) if path.starts_with("/products") && !is_seller_only(path) => {
            GuardDecision::Allow
        }
        _ => GuardDecision::Unauthorized,
    }
}

pub async fn route_guard(
    State(auth): State<AuthConfig>,
    mut req: Request,
    next: Next,
) -> Response {
    // A token that fails to decode counts as no token at all.
    let claims = session_token(&req, auth.environment).and_then(|token| {
        match jwt::verify_token(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::warn!("Session token rejected: {}", e);
                None
            }
        }
    });

    let path = req.uri().path().to_string();

    match authorize(claims.as_ref().map(|c| c.role.as_str()), &path) {
        GuardDecision::Allow => {
            if let Some(claims) = claims {
                req.extensions_mut().insert(claims);
            }
            next.run(req).await
        }
        GuardDecision::Login(portal) => {
            let callback = original_url(&auth.base_url, req.uri());
            let query: String = form_urlencoded::Serializer::new(String::new())
                .append_pair("callbackUrl", &callback)
                .finish();
            let target = format!("{}?{}", portal.login_path(), query);
            tracing::info!("No session on {}, redirecting to {}", path, target);
            Redirect::to(&target).into_response()
        }
        GuardDecision::Unauthorized => {
            tracing::info!(
                "Denied {} for role {:?}",
                path,
                claims.map(|c| c.role)
            );
            Redirect::to("/unauthorized").into_response()
        }
    }
}

fn session_token(req: &Request, environment: Environment) -> Option<String> {
    let header = req.headers().get(COOKIE)?.to_str().ok()?.to_string();

    Cookie::split_parse(header)
        .filter_map(|c| c.ok())
        .find(|c| c.name() == environment.session_cookie_name())
        .map(|c| c.value().to_string())
}

fn original_url(base_url: &str, uri: &Uri) -> String {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    format!("{}{}", base_url.trim_end_matches('/'), path_and_query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_redirects_to_user_login_on_browse_paths() {
        assert_eq!(
            authorize(None, "/products/42"),
            GuardDecision::Login(Portal::User)
        );
        assert_eq!(
            authorize(None, "/products/cart"),
            GuardDecision::Login(Portal::User)
        );
    }

    #[test]
    fn missing_token_redirects_to_seller_login_on_seller_paths() {
        assert_eq!(
            authorize(None, "/products/listing"),
            GuardDecision::Login(Portal::Seller)
        );
        assert_eq!(
            authorize(None, "/products/create"),
            GuardDecision::Login(Portal::Seller)
        );
        assert_eq!(
            authorize(None, "/products/42/edit"),
            GuardDecision::Login(Portal::Seller)
        );
    }

    #[test]
    fn seller_is_allowed_on_product_paths() {
        assert_eq!(authorize(Some("seller"), "/products"), GuardDecision::Allow);
        assert_eq!(
            authorize(Some("seller"), "/products/42/edit"),
            GuardDecision::Allow
        );
        assert_eq!(
            authorize(Some("seller"), "/products/listing"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn user_is_allowed_on_browse_and_cart_paths() {
        assert_eq!(authorize(Some("user"), "/products"), GuardDecision::Allow);
        assert_eq!(
            authorize(Some("user"), "/products/42"),
            GuardDecision::Allow
        );
        assert_eq!(
            authorize(Some("user"), "/products/cart"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn user_is_denied_on_seller_only_paths() {
        assert_eq!(
            authorize(Some("user"), "/products/42/edit"),
            GuardDecision::Unauthorized
        );
        assert_eq!(
            authorize(Some("user"), "/products/create"),
            GuardDecision::Unauthorized
        );
    }

    #[test]
    fn unknown_roles_and_foreign_paths_are_unauthorized() {
        assert_eq!(
            authorize(Some("admin"), "/products/42"),
            GuardDecision::Unauthorized
        );
        assert_eq!(
            authorize(Some("seller"), "/accounts"),
            GuardDecision::Unauthorized
        );
    }

    #[test]
    fn callback_url_is_the_original_request_url() {
        let uri: Uri = "/products/42/edit?tab=pricing".parse().unwrap();
        assert_eq!(
            original_url("http://localhost:3000/", &uri),
            "http://localhost:3000/products/42/edit?tab=pricing"
        );
    }
}
