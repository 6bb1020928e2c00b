use sqlx::{Pool, Postgres, migrate::Migrator, postgres::PgPoolOptions};
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn connect(database_url: &str, max_connections: u32) -> Result<Pool<Postgres>, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    info!(max_connections, "database pool ready");
    Ok(pool)
}

/// Applies pending migrations; a no-op when the schema is current.
pub async fn migrate(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("migrations applied");
    Ok(())
}
