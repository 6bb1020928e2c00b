use crate::entities::User;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait {
    async fn create(&self, username: &str, email: &str, pw_hash: &str) -> Result<User>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, username: &str, email: &str, pw_hash: &str) -> Result<User> {
        let user = sqlx::query_as!(
            User,
            r#"
            INSERT INTO users (username, email, pw_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, pw_hash, created_at
            "#,
            username,
            email,
            pw_hash
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as!(
            User,
            r#"
            SELECT id, username, email, pw_hash, created_at
            FROM users
            WHERE email = $1
            "#,
            email
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
