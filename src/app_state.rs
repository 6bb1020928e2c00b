use crate::{
    auth::jwt::JwtService,
    extractor::ContentExtractor,
    mailer::Mailer,
    passwords::Passwords,
    repositories::{ContactRepositoryTrait, SummaryRepositoryTrait, UserRepositoryTrait},
    summarizer::Summarizer,
    translator::Translator,
};
use axum::extract::FromRef;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

/// Everything a handler may touch. Stores and provider clients sit behind
/// traits so handler tests can swap them out.
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepositoryTrait + Send + Sync>,
    pub summary_repo: Arc<dyn SummaryRepositoryTrait + Send + Sync>,
    pub contact_repo: Arc<dyn ContactRepositoryTrait + Send + Sync>,
    pub extractor: Arc<dyn ContentExtractor>,
    pub summarizer: Arc<dyn Summarizer>,
    pub translator: Arc<dyn Translator>,
    pub mailer: Arc<dyn Mailer>,
    pub jwt: Arc<JwtService>,
    pub passwords: Passwords,
    pub db_pool: Pool<Postgres>,
}

impl FromRef<AppState> for Arc<JwtService> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
