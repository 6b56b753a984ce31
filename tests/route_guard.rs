//! Drives the route guard through an actual router: requests either pass
//! through to the handler, bounce to the right login portal with a
//! callback URL, or land on /unauthorized.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware,
    routing::get,
};
use tower::ServiceExt;

use feira_back::{
    config::{AuthConfig, Environment},
    middleware::route_guard,
    models::Role,
    utils::jwt,
};

const BASE_URL: &str = "http://localhost:3000";

fn guarded_router() -> Router {
    let auth = AuthConfig {
        environment: Environment::Development,
        base_url: BASE_URL.to_string(),
    };

    Router::new()
        .route("/products", get(ok))
        .route("/products/cart", get(ok))
        .route("/products/{id}", get(ok))
        .route("/products/{id}/edit", get(ok))
        .layer(middleware::from_fn_with_state(auth, route_guard))
}

async fn ok() -> &'static str {
    "ok"
}

fn token_for(role: Role) -> String {
    std::env::set_var("JWT_SECRET", "route-guard-test-secret");
    jwt::generate_token(7, "guard@example.com", role).unwrap()
}

fn request(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn missing_token_on_edit_path_redirects_to_seller_login() {
    let response = guarded_router()
        .oneshot(request("/products/42/edit", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location(&response);
    assert!(location.starts_with("/sellers/login?callbackUrl="));
    // callback URL is the full original request URL, percent-encoded
    assert!(location.contains("products%2F42%2Fedit"));
}

#[tokio::test]
async fn missing_token_on_browse_path_redirects_to_user_login() {
    let response = guarded_router()
        .oneshot(request("/products/42", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/users/login?callbackUrl="));
}

#[tokio::test]
async fn user_token_passes_on_browse_and_cart_paths() {
    let cookie = format!("authjs.session-token={}", token_for(Role::User));

    for path in ["/products", "/products/42", "/products/cart"] {
        let response = guarded_router()
            .oneshot(request(path, Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "path {}", path);
    }
}

#[tokio::test]
async fn user_token_on_edit_path_is_unauthorized() {
    let cookie = format!("authjs.session-token={}", token_for(Role::User));

    let response = guarded_router()
        .oneshot(request("/products/42/edit", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/unauthorized");
}

#[tokio::test]
async fn seller_token_passes_on_edit_path() {
    let cookie = format!("authjs.session-token={}", token_for(Role::Seller));

    let response = guarded_router()
        .oneshot(request("/products/42/edit", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn undecodable_token_is_treated_as_no_token() {
    std::env::set_var("JWT_SECRET", "route-guard-test-secret");

    let response = guarded_router()
        .oneshot(request(
            "/products/42",
            Some("authjs.session-token=not-a-real-token"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/users/login?callbackUrl="));
}

#[tokio::test]
async fn production_cookie_name_is_required_in_production() {
    std::env::set_var("JWT_SECRET", "route-guard-test-secret");
    let auth = AuthConfig {
        environment: Environment::Production,
        base_url: BASE_URL.to_string(),
    };
    let router = Router::new()
        .route("/products/{id}", get(ok))
        .layer(middleware::from_fn_with_state(auth, route_guard));

    // Token under the dev cookie name is invisible in production mode.
    let dev_cookie = format!("authjs.session-token={}", token_for(Role::User));
    let response = router
        .clone()
        .oneshot(request("/products/42", Some(&dev_cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let prod_cookie = format!("__Secure-authjs.session-token={}", token_for(Role::User));
    let response = router
        .oneshot(request("/products/42", Some(&prod_cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
