use crate::entities::ContactMessage;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};

/// Write-only mailbox for the contact form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepositoryTrait {
    async fn create(&self, name: &str, email: &str, message: &str) -> Result<ContactMessage>;
}

#[derive(Clone)]
pub struct ContactRepository {
    pool: Pool<Postgres>,
}

impl ContactRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepositoryTrait for ContactRepository {
    async fn create(&self, name: &str, email: &str, message: &str) -> Result<ContactMessage> {
        let saved = sqlx::query_as!(
            ContactMessage,
            r#"
            INSERT INTO contact_messages (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, created_at
            "#,
            name,
            email,
            message
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }
}
