use axum::{Json, extract::State, http::StatusCode};
use tracing::{error, info, instrument};

use crate::{
    app_state::AppState,
    auth::dtos::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserInfo},
    error::{ApiError, ApiResult, ErrorResponse, JsonBody},
};

fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db)) if db.is_unique_violation()
    )
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing fields or email already registered", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    payload.validate().map_err(ApiError::Validation)?;
    let email = payload.email.trim();
    let username = payload.username.trim();

    let existing = state
        .user_repo
        .find_by_email(email)
        .await
        .map_err(|e| ApiError::persistence("Server error", e))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let pw_hash = state.passwords.hash(&payload.password).map_err(|e| {
        error!(error = %e, "password hashing failed");
        ApiError::Internal("Failed to hash password".to_string())
    })?;

    // A concurrent registration can still win the race; the unique index decides.
    let user = state
        .user_repo
        .create(username, email, &pw_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("User already exists".to_string())
            } else {
                ApiError::persistence("Server error", e)
            }
        })?;

    info!(user_id = %user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Missing fields or unknown email", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    payload.validate().map_err(ApiError::Validation)?;

    let user = state
        .user_repo
        .find_by_email(payload.email.trim())
        .await
        .map_err(|e| ApiError::persistence("Server error during login", e))?
        .ok_or_else(|| ApiError::Validation("User not found".to_string()))?;

    let is_valid = state
        .passwords
        .verify(&payload.password, &user.pw_hash)
        .map_err(|e| {
            error!(error = %e, user_id = %user.id, "stored password hash unreadable");
            ApiError::Internal("Password verification failed".to_string())
        })?;
    if !is_valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state.jwt.generate_token(user.id).map_err(|e| {
        error!(error = %e, "token signing failed");
        ApiError::Internal("Failed to generate token".to_string())
    })?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: UserInfo {
            id: user.id,
            email: user.email,
            username: user.username,
        },
    }))
}
