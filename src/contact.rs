//! Public contact form.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::{
    app_state::AppState,
    auth::dtos::MessageResponse,
    error::{ApiError, ApiResult, ErrorResponse, JsonBody},
    summaries::dtos::present,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message stored", body = MessageResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn submit_contact(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ContactRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (Some(name), Some(email), Some(message)) = (
        present(&payload.name),
        present(&payload.email),
        present(&payload.message),
    ) else {
        return Err(ApiError::Validation("All fields are required".to_string()));
    };

    let saved = state
        .contact_repo
        .create(name, email, message)
        .await
        .map_err(|e| ApiError::persistence("Something went wrong", e))?;

    info!(contact_id = %saved.id, "contact message stored");
    Ok(Json(MessageResponse::new(
        "Message received and saved successfully!",
    )))
}
