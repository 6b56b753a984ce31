use axum::{
    Extension, Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::{AppError, Result},
    forms,
    models::{
        Category, CreateProductRequest, CreateReviewRequest, ProductDetail, ProductListQuery,
        ProductSummary, Review, UpdateProductRequest, clamped_average, derive_discount_absolute,
        format_rating,
    },
    queries::{product_queries, review_queries},
    utils::{extractors::extract_principal_id, jwt::Claims},
};

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<Vec<ProductSummary>>> {
    let rows = product_queries::list_products(&state.db, &params).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// The authenticated seller's own products. The guard layer has already
/// verified the seller role and stashed the claims.
pub async fn seller_listing(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ProductSummary>>> {
    let seller_id = extract_principal_id(&claims)?;

    let params = ProductListQuery {
        seller_id: Some(seller_id),
        category: None,
    };
    let rows = product_queries::list_products(&state.db, &params).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = product_queries::list_categories(&state.db).await?;

    Ok(Json(categories))
}

/// Product detail: seller and image joined in, reviews attached, and the
/// average rating computed with each stored rating clamped into [1, 5].
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDetail>> {
    let row = product_queries::find_listing_row(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let reviews = review_queries::find_by_product(&state.db, id).await?;
    let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();
    let average_rating = format_rating(clamped_average(&ratings));

    let summary: ProductSummary = row.into();
    Ok(Json(ProductDetail {
        id: summary.id,
        name: summary.name,
        description: summary.description,
        price: summary.price,
        category: summary.category,
        discount_percent: summary.discount_percent,
        discount_absolute: summary.discount_absolute,
        image_url: summary.image_url,
        seller: summary.seller,
        reviews,
        average_rating,
    }))
}

pub async fn create_product(
    State(state): State<AppState>,
    Form(payload): Form<CreateProductRequest>,
) -> Result<Response> {
    if let Err(errors) = forms::validate_create_product(&payload) {
        let reject = forms::FormReject {
            errors,
            form_data: forms::ProductEcho::of_create(&payload),
            message: None,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(reject)).into_response());
    }

    let discount_percent = payload.discount_percent.unwrap_or_default();
    let discount_absolute = derive_discount_absolute(
        payload.price,
        payload.discount_percent,
        payload.discount_absolute,
    );

    let product =
        product_queries::create_product(&state.db, &payload, discount_percent, discount_absolute)
            .await?;

    Ok((StatusCode::CREATED, Json(product)).into_response())
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(payload): Form<UpdateProductRequest>,
) -> Result<Response> {
    if let Err(errors) = forms::validate_update_product(&payload) {
        let reject = forms::FormReject {
            errors,
            form_data: forms::ProductEcho::of_update(&payload),
            message: None,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(reject)).into_response());
    }

    // Discount fields left out of the form keep their stored values; a new
    // percent without an explicit absolute re-derives it against the new
    // price.
    let discount_absolute = (payload.discount_absolute.is_some()
        || payload.discount_percent.is_some())
    .then(|| {
        derive_discount_absolute(
            payload.price,
            payload.discount_percent,
            payload.discount_absolute,
        )
    });

    let product = product_queries::update_product(
        &state.db,
        id,
        &payload.name,
        payload.description.as_deref(),
        payload.price,
        &payload.category,
        payload.discount_percent,
        discount_absolute,
        payload.image_url.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product).into_response())
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    product_queries::delete_product(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn post_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>)> {
    let user_id = extract_principal_id(&claims)?;

    if product_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    let review =
        review_queries::create_review(&state.db, id, user_id, payload.rating, &payload.review)
            .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
