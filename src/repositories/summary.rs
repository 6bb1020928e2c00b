use crate::entities::{NewSummary, Summary};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// History store. Every operation is scoped to one owner; mutations filter on
/// both the record id and the owner id in a single statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummaryRepositoryTrait {
    async fn create(&self, summary: NewSummary) -> Result<Summary>;

    /// All records for `user_id`, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Summary>>;

    /// Returns `false` when no record matches both `id` and `user_id`.
    async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> Result<bool>;

    /// Returns the number of records removed.
    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64>;
}

#[derive(Clone)]
pub struct SummaryRepository {
    pool: Pool<Postgres>,
}

impl SummaryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryRepositoryTrait for SummaryRepository {
    async fn create(&self, summary: NewSummary) -> Result<Summary> {
        let summary = sqlx::query_as!(
            Summary,
            r#"
            INSERT INTO summaries (user_id, original_text, summary_text, language)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, original_text, summary_text, language, created_at
            "#,
            summary.user_id,
            summary.original_text,
            summary.summary_text,
            summary.language
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Summary>> {
        let summaries = sqlx::query_as!(
            Summary,
            r#"
            SELECT id, user_id, original_text, summary_text, language, created_at
            FROM summaries
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
            user_id
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query!(
            "DELETE FROM summaries WHERE id = $1 AND user_id = $2",
            id,
            user_id
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query!("DELETE FROM summaries WHERE user_id = $1", user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{UserRepository, UserRepositoryTrait};
    use sqlx::PgPool;

    async fn setup_test_db() -> Option<PgPool> {
        // Skip tests if TEST_DATABASE_URL is not set
        let database_url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("Skipping database tests: TEST_DATABASE_URL not set");
                return None;
            }
        };

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(pool)
    }

    async fn insert_test_user(pool: &PgPool) -> Uuid {
        let email = format!("{}@example.com", Uuid::new_v4());
        UserRepository::new(pool.clone())
            .create("tester", &email, "dummy_hash")
            .await
            .expect("Failed to insert test user")
            .id
    }

    fn new_summary(user_id: Uuid, text: &str) -> NewSummary {
        NewSummary {
            user_id,
            original_text: text.to_string(),
            summary_text: format!("summary of {}", text),
            language: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_newest_first() {
        let Some(pool) = setup_test_db().await else {
            return;
        };
        let repo = SummaryRepository::new(pool.clone());
        let user_id = insert_test_user(&pool).await;

        let first = repo.create(new_summary(user_id, "first")).await.unwrap();
        let second = repo.create(new_summary(user_id, "second")).await.unwrap();

        let history = repo.list_for_user(user_id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].created_at >= history[1].created_at);
        let ids: Vec<Uuid> = history.iter().map(|s| s.id).collect();
        assert!(ids.contains(&first.id));
        assert!(ids.contains(&second.id));
    }

    #[tokio::test]
    async fn test_delete_requires_matching_owner() {
        let Some(pool) = setup_test_db().await else {
            return;
        };
        let repo = SummaryRepository::new(pool.clone());
        let owner = insert_test_user(&pool).await;
        let intruder = insert_test_user(&pool).await;

        let record = repo.create(new_summary(owner, "mine")).await.unwrap();

        assert!(!repo.delete_for_user(record.id, intruder).await.unwrap());
        assert_eq!(repo.list_for_user(owner).await.unwrap().len(), 1);

        assert!(repo.delete_for_user(record.id, owner).await.unwrap());
        assert!(repo.list_for_user(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_is_scoped_and_idempotent() {
        let Some(pool) = setup_test_db().await else {
            return;
        };
        let repo = SummaryRepository::new(pool.clone());
        let owner = insert_test_user(&pool).await;
        let other = insert_test_user(&pool).await;

        repo.create(new_summary(owner, "a")).await.unwrap();
        repo.create(new_summary(owner, "b")).await.unwrap();
        repo.create(new_summary(other, "c")).await.unwrap();

        assert_eq!(repo.delete_all_for_user(owner).await.unwrap(), 2);
        assert!(repo.list_for_user(owner).await.unwrap().is_empty());
        assert_eq!(repo.list_for_user(other).await.unwrap().len(), 1);

        assert_eq!(repo.delete_all_for_user(owner).await.unwrap(), 0);
    }
}
