use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::{AuthenticatedUser, dtos::MessageResponse},
    entities::NewSummary,
    error::{ApiError, ApiResult, ErrorResponse, JsonBody},
    fetcher::PageFetcher,
    summaries::{
        dtos::{
            DeleteAllResponse, HistoryResponse, SaveSummaryRequest, SummarizeTextRequest,
            SummarizeUrlRequest, SummaryResponse, TranslateRequest, TranslateResponse, present,
        },
        pipeline::{INVALID_URL_MESSAGE, Source, SummaryPipeline, resolve_language},
    },
};

const SUMMARY_NOT_FOUND: &str = "Summary not found or unauthorized";

#[utoipa::path(
    post,
    path = "/api/summarize",
    tag = "summaries",
    request_body = SummarizeTextRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Summary created and stored", body = SummaryResponse),
        (status = 400, description = "Empty text", body = ErrorResponse),
        (status = 500, description = "Summarization failed", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn summarize_text(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SummarizeTextRequest>,
) -> ApiResult<(StatusCode, Json<SummaryResponse>)> {
    if present(&payload.text).is_none() {
        return Err(ApiError::Validation(
            "Text is required for summarization".to_string(),
        ));
    }
    let text = payload.text.unwrap_or_default();
    let language = resolve_language(payload.language.as_deref());

    let saved = SummaryPipeline::new(&state)
        .run(user.user_id, Source::Text(text), &language)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SummaryResponse {
            summary: saved.summary_text,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/summarize/url",
    tag = "summaries",
    request_body = SummarizeUrlRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Page summarized and stored", body = SummaryResponse),
        (status = 400, description = "Invalid URL or too little content", body = ErrorResponse),
        (status = 500, description = "Fetch or summarization failed", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn summarize_url(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SummarizeUrlRequest>,
) -> ApiResult<Json<SummaryResponse>> {
    let url = present(&payload.url)
        .and_then(|raw| PageFetcher::parse_url(raw).ok())
        .ok_or_else(|| ApiError::Validation(INVALID_URL_MESSAGE.to_string()))?;
    let language = resolve_language(payload.language.as_deref());

    let saved = SummaryPipeline::new(&state)
        .run(user.user_id, Source::Url(url), &language)
        .await?;

    Ok(Json(SummaryResponse {
        summary: saved.summary_text,
    }))
}

#[utoipa::path(
    post,
    path = "/api/summarize/translate",
    tag = "summaries",
    request_body = TranslateRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Translated text", body = TranslateResponse),
        (status = 400, description = "Missing text or target language", body = ErrorResponse),
        (status = 500, description = "Translation unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %_user.user_id))]
pub async fn translate_text(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<TranslateRequest>,
) -> ApiResult<Json<TranslateResponse>> {
    let (Some(text), Some(target)) = (present(&payload.text), present(&payload.target_language))
    else {
        return Err(ApiError::Validation(
            "Text and target language are required".to_string(),
        ));
    };

    let translated = state
        .translator
        .translate(text, target)
        .await
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Upstream("Translation failed".to_string()))?;

    Ok(Json(TranslateResponse {
        translated_text: translated,
    }))
}

#[utoipa::path(
    post,
    path = "/api/summarize/save",
    tag = "summaries",
    request_body = SaveSummaryRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Summary stored", body = MessageResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn save_summary(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SaveSummaryRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let (Some(_), Some(_), Some(language)) = (
        present(&payload.original_text),
        present(&payload.summary_text),
        present(&payload.language),
    ) else {
        return Err(ApiError::Validation("Missing required fields.".to_string()));
    };
    let language = language.to_string();

    let saved = state
        .summary_repo
        .create(NewSummary {
            user_id: user.user_id,
            original_text: payload.original_text.unwrap_or_default(),
            summary_text: payload.summary_text.unwrap_or_default(),
            language,
        })
        .await
        .map_err(|e| ApiError::persistence("Failed to save summary.", e))?;

    info!(summary_id = %saved.id, "client summary stored");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Summary saved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/summarize/history",
    tag = "summaries",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's summaries, newest first", body = HistoryResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn list_history(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> ApiResult<Json<HistoryResponse>> {
    let history = state
        .summary_repo
        .list_for_user(user.user_id)
        .await
        .map_err(|e| ApiError::persistence("Failed to fetch summaries", e))?;

    Ok(Json(HistoryResponse { history }))
}

#[utoipa::path(
    delete,
    path = "/api/summarize/{id}",
    tag = "summaries",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Summary id")),
    responses(
        (status = 200, description = "Summary deleted", body = MessageResponse),
        (status = 404, description = "No such summary for this caller", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %user.user_id, id = %id))]
pub async fn delete_summary(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    // A malformed id can never name a record the caller owns.
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound(SUMMARY_NOT_FOUND.to_string()))?;

    let deleted = state
        .summary_repo
        .delete_for_user(id, user.user_id)
        .await
        .map_err(|e| ApiError::persistence("Error deleting summary", e))?;
    if !deleted {
        return Err(ApiError::NotFound(SUMMARY_NOT_FOUND.to_string()));
    }

    Ok(Json(MessageResponse::new("Summary deleted successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/summarize",
    tag = "summaries",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All of the caller's summaries deleted", body = DeleteAllResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn delete_all_summaries(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> ApiResult<Json<DeleteAllResponse>> {
    let deleted = state
        .summary_repo
        .delete_all_for_user(user.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, "bulk delete failed");
            ApiError::Persistence("Error deleting all summaries".to_string())
        })?;

    info!(deleted, "history cleared");
    Ok(Json(DeleteAllResponse {
        message: "All summaries deleted successfully".to_string(),
        deleted,
    }))
}
