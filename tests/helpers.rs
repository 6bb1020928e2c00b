#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

use smartsum::{
    app_state::AppState,
    auth::jwt::JwtService,
    config::{Config, GeminiSettings, TranslateSettings},
    db,
    extractor::WebExtractor,
    fetcher::PageFetcher,
    mailer::SmtpMailer,
    passwords::Passwords,
    repositories::{ContactRepository, SummaryRepository, UserRepository},
    routes,
    summarizer::GeminiClient,
    translator::LibreTranslateClient,
};

pub const JWT_SECRET: &str = "integration-secret";

/// Pool on `TEST_DATABASE_URL` with migrations applied, or `None` to skip.
pub async fn test_pool() -> Option<Pool<Postgres>> {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping database tests: TEST_DATABASE_URL not set");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    Some(pool)
}

/// Full router on real repositories. Provider clients point at
/// `provider_url`, normally a wiremock server.
pub fn test_app(pool: Pool<Postgres>, provider_url: &str) -> Router {
    let config = Config::default();
    let gemini = GeminiSettings {
        api_url: provider_url.to_string(),
        api_key: "test-key".to_string(),
        model: "gemini-test".to_string(),
        max_attempts: 3,
        backoff_base: Duration::from_millis(5),
    };
    let translate = TranslateSettings {
        api_url: provider_url.to_string(),
        api_key: None,
    };

    let state = AppState {
        user_repo: Arc::new(UserRepository::new(pool.clone())),
        summary_repo: Arc::new(SummaryRepository::new(pool.clone())),
        contact_repo: Arc::new(ContactRepository::new(pool.clone())),
        extractor: Arc::new(WebExtractor::new(PageFetcher::new().unwrap())),
        summarizer: Arc::new(GeminiClient::new(&gemini).unwrap()),
        translator: Arc::new(LibreTranslateClient::new(&translate).unwrap()),
        mailer: Arc::new(SmtpMailer::new(config.smtp()).unwrap()),
        jwt: Arc::new(JwtService::new(JWT_SECRET)),
        passwords: Passwords::new(1024, 1, 1).unwrap(),
        db_pool: pool,
    };

    routes::router(state, &config)
}

pub fn unique_email() -> String {
    format!("{}@example.com", uuid::Uuid::new_v4())
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
