use axum::{
    Router,
    extract::Request,
    handler::HandlerWithoutStateExt,
    http::{HeaderName, HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use std::{path::Path, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, info_span, warn};

use crate::{
    app_state::AppState,
    auth::{
        handlers::{login, register},
        require_auth,
    },
    config::Config,
    contact::submit_contact,
    email::send_summary_email,
    error::route_not_found,
    health::health_check,
    openapi::openapi_json,
    summaries::handlers::{
        delete_all_summaries, delete_summary, list_history, save_summary, summarize_text,
        summarize_url, translate_text,
    },
};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Everything under `/api`. Summary and email routes require a bearer token.
pub fn api_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/contact", post(submit_contact));

    let protected = Router::new()
        .route(
            "/summarize",
            post(summarize_text).delete(delete_all_summaries),
        )
        .route("/summarize/url", post(summarize_url))
        .route("/summarize/translate", post(translate_text))
        .route("/summarize/save", post(save_summary))
        .route("/summarize/history", get(list_history))
        .route("/summarize/{id}", delete(delete_summary))
        .route("/email/send", post(send_summary_email))
        .route_layer(from_fn_with_state(state, require_auth));

    public.merge(protected)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(60 * 60));

    if allowed_origins.is_empty() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Full application: API, health probe, OpenAPI document, optional static
/// frontend, request ids, tracing and CORS.
pub fn router(state: AppState, config: &Config) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let app = Router::new()
        .route("/healthz", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api_router(state.clone()).fallback(route_not_found));

    let app = match config.static_dir() {
        Some(dir) => {
            info!(dir, "serving static frontend");
            let index = ServeFile::new(Path::new(dir).join("login.html"));
            let files = ServeDir::new(dir).not_found_service(route_not_found.into_service());
            app.route_service("/", index).fallback_service(files)
        }
        None => app.fallback(route_not_found),
    };

    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %id,
                )
            }))
            .layer(PropagateRequestIdLayer::new(request_id)),
    )
    .layer(cors_layer(config.cors_allowed_origins()))
    .with_state(state)
}
