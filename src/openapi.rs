use axum::Json;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use crate::{
    auth::{
        self,
        dtos::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserInfo},
    },
    contact::{self, ContactRequest},
    email::{self, SendEmailRequest},
    entities::Summary,
    error::ErrorResponse,
    health::{self, HealthResponse},
    summaries::{
        dtos::{
            DeleteAllResponse, HistoryResponse, SaveSummaryRequest, SummarizeTextRequest,
            SummarizeUrlRequest, SummaryResponse, TranslateRequest, TranslateResponse,
        },
        handlers as summary_handlers,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::handlers::register,
        auth::handlers::login,
        summary_handlers::summarize_text,
        summary_handlers::summarize_url,
        summary_handlers::translate_text,
        summary_handlers::save_summary,
        summary_handlers::list_history,
        summary_handlers::delete_summary,
        summary_handlers::delete_all_summaries,
        email::send_summary_email,
        contact::submit_contact,
    ),
    components(schemas(
        ErrorResponse,
        MessageResponse,
        HealthResponse,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        UserInfo,
        Summary,
        SummarizeTextRequest,
        SummarizeUrlRequest,
        TranslateRequest,
        TranslateResponse,
        SaveSummaryRequest,
        SummaryResponse,
        HistoryResponse,
        DeleteAllResponse,
        SendEmailRequest,
        ContactRequest,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "summaries", description = "Summarize, translate and manage history"),
        (name = "email", description = "Send a summary by email"),
        (name = "contact", description = "Public contact form"),
        (name = "health", description = "Liveness and store reachability"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
