mod health;
mod images;
mod lists;
mod products;
mod sellers;
mod users;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{AppState, config::AuthConfig, middleware::route_guard};

pub fn create_router(auth: AuthConfig) -> Router<AppState> {
    // The guard covers exactly the product and cart namespaces; account
    // routes stay open so login and signup are reachable. Full paths with
    // merge rather than nest: the guard needs to see the original path.
    let guarded = Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/listing", get(products::seller_listing))
        .route("/products/categories", get(products::list_categories))
        .route("/products/cart", get(lists::get_cart))
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/{id}/edit", get(products::get_product))
        .route("/products/{id}/reviews", post(products::post_review))
        .route_layer(middleware::from_fn_with_state(auth, route_guard));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/users/signup", post(users::signup_user))
        .route("/users/login", post(users::login_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/lists", get(lists::get_user_lists))
        .route("/lists/{id}/products", post(lists::add_product_to_list))
        .route("/sellers", get(sellers::list_sellers))
        .route("/sellers/signup", post(sellers::signup_seller))
        .route("/sellers/login", post(sellers::login_seller))
        .route("/sellers/{id}", get(sellers::get_seller))
        .route("/images", post(images::post_image))
        .route("/images/{id}", get(images::get_image))
        .merge(guarded)
}
