use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{AddToListRequest, ListWithProducts},
    queries::list_queries,
    utils::{extractors::extract_principal_id, jwt::Claims},
};

pub async fn get_user_lists(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<ListWithProducts>>> {
    let lists = list_queries::find_by_user(&state.db, user_id).await?;

    Ok(Json(lists))
}

/// Cart view for the signed-in user: their lists with products attached.
/// The guard layer has already established the session.
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ListWithProducts>>> {
    let user_id = extract_principal_id(&claims)?;

    let lists = list_queries::find_by_user(&state.db, user_id).await?;

    Ok(Json(lists))
}

pub async fn add_product_to_list(
    State(state): State<AppState>,
    Path(list_id): Path<i32>,
    Json(payload): Json<AddToListRequest>,
) -> Result<StatusCode> {
    if list_queries::find_by_id(&state.db, list_id).await?.is_none() {
        return Err(AppError::NotFound("List not found".to_string()));
    }

    list_queries::add_product(&state.db, list_id, payload.product_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
