use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    error::{AppError, Result},
    forms::{self, FormReject, SignupEcho, UserUpdateEcho},
    models::{LoginRequest, Role, SignupRequest, UserResponse, UserUpdateRequest},
    queries::user_queries,
    services::session::{self, SignInError},
};

/// User signup form action. The duplicate-email check runs before any other
/// validation and short-circuits with a field-level error; on success the new
/// user is signed in immediately and redirected to their success page.
pub async fn signup_user(
    State(state): State<AppState>,
    Form(payload): Form<SignupRequest>,
) -> Result<Response> {
    if user_queries::find_by_email(&state.db, &payload.email)
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

    let user = user_queries::create_user(
        &state.db,
        &payload.email,
        &credential_hash,
        &payload.display_name,
        &payload.first_name,
        &payload.last_name,
    )
    .await?;

    // Sign-in failure right after a successful insert is not surfaced
    // distinctly; the account exists, the user can log in manually.
    let token = session::sign_in(&state.db, Role::User, &user.email, &payload.password)
        .await
        .map_err(|e| {
            tracing::error!("Sign-in after user signup failed: {}", e);
            AppError::InternalError("Something went wrong.".to_string())
        })?;

    let success_url = format!("/users/{}/success", user.id);
    Ok(session::redirect_with_session(
        state.auth.environment,
        &token,
        &success_url,
    ))
}

pub async fn login_user(
    State(state): State<AppState>,
    Form(payload): Form<LoginRequest>,
) -> Result<Response> {
    match session::sign_in(&state.db, Role::User, &payload.email, &payload.password).await {
        Ok(token) => {
            let target = payload.callback_url.as_deref().unwrap_or("/products");
            Ok(session::redirect_with_session(
                state.auth.environment,
                &token,
                target,
            ))
        }
        Err(SignInError::InvalidCredentials) => {
            Err(AppError::Unauthorized("Invalid credentials.".to_string()))
        }
        Err(SignInError::Other(e)) => {
            tracing::error!("User login failed: {}", e);
            Err(AppError::InternalError("Something went wrong.".to_string()))
        }
    }
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>> {
    let user = user_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Self-service profile update. The target id travels in the form body;
/// gateway failure comes back as a generic "Database Error." state with the
/// submitted fields echoed for re-display.
pub async fn update_user(
    State(state): State<AppState>,
    Form(payload): Form<UserUpdateRequest>,
) -> Result<Response> {
    let id: i32 = payload
        .user_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid user id: {}", payload.user_id)))?;

    let updated = user_queries::update_user(
        &state.db,
        id,
        payload.display_name.as_deref(),
        payload.first_name.as_deref(),
        payload.last_name.as_deref(),
        payload.bio.as_deref(),
        payload.profile_picture_id,
    )
    .await;

    match updated {
        Ok(Some(_)) => Ok(Redirect::to(&format!("/users/{}", id)).into_response()),
        failed => {
            if let Err(e) = failed {
                tracing::error!("User update failed: {}", e);
            }
            let reject = FormReject {
                errors: forms::FieldErrors::new(),
                form_data: UserUpdateEcho::of(&payload),
                message: Some("Database Error.".to_string()),
            };
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(reject)).into_response())
        }
    }
}

/// Fire-and-forget removal; confirmation is the caller's concern.
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    user_queries::delete_user(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
