use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Language a summary is produced in when the caller asks for none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// --- Tables ---

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub pw_hash: String,
    pub created_at: DateTime<Utc>,
}

/// One history entry. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: Uuid,
    #[serde(skip)]
    pub user_id: Uuid,
    pub original_text: String,
    pub summary_text: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for `summaries`; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSummary {
    pub user_id: Uuid,
    pub original_text: String,
    pub summary_text: String,
    pub language: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
