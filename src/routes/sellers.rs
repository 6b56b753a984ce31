use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::{AppError, Result},
    forms::{self, FormReject, SignupEcho},
    models::{LoginRequest, Role, SellerResponse, SignupRequest},
    queries::seller_queries,
    services::session::{self, SignInError},
};

/// Seller signup mirrors the user flow against the sellers table and issues
/// a seller-role session.
pub async fn signup_seller(
    State(state): State<AppState>,
    Form(payload): Form<SignupRequest>,
) -> Result<Response> {
    if seller_queries::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        let reject = FormReject {
            errors: forms::email_taken_error(),
            form_data: SignupEcho::of(&payload),
            message: None,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(reject)).into_response());
    }

    if let Err(errors) = forms::validate_signup(&payload) {
        let reject = FormReject {
            errors,
            form_data: SignupEcho::of(&payload),
            message: None,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(reject)).into_response());
    }

    let credential_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    let seller = seller_queries::create_seller(
        &state.db,
        &payload.email,
        &credential_hash,
        &payload.display_name,
        &payload.first_name,
        &payload.last_name,
    )
    .await?;

    let token = session::sign_in(&state.db, Role::Seller, &seller.email, &payload.password)
        .await
        .map_err(|e| {
            tracing::error!("Sign-in after seller signup failed: {}", e);
            AppError::InternalError("Something went wrong.".to_string())
        })?;

    let success_url = format!("/sellers/{}/success", seller.id);
    Ok(session::redirect_with_session(
        state.auth.environment,
        &token,
        &success_url,
    ))
}

pub async fn login_seller(
    State(state): State<AppState>,
    Form(payload): Form<LoginRequest>,
) -> Result<Response> {
    match session::sign_in(&state.db, Role::Seller, &payload.email, &payload.password).await {
        Ok(token) => {
            let target = payload.callback_url.as_deref().unwrap_or("/products/listing");
            Ok(session::redirect_with_session(
                state.auth.environment,
                &token,
                target,
            ))
        }
        Err(SignInError::InvalidCredentials) => Err(AppError::Unauthorized(
            "Invalid seller credentials.".to_string(),
        )),
        Err(SignInError::Other(e)) => {
            tracing::error!("Seller login failed: {}", e);
            Err(AppError::InternalError("Something went wrong.".to_string()))
        }
    }
}

pub async fn list_sellers(State(state): State<AppState>) -> Result<Json<Vec<SellerResponse>>> {
    let sellers = seller_queries::list_sellers(&state.db).await?;

    Ok(Json(sellers.into_iter().map(Into::into).collect()))
}

pub async fn get_seller(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SellerResponse>> {
    let seller = seller_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Seller not found".to_string()))?;

    Ok(Json(seller.into()))
}
