//! Database migration command.
//!
//! Applies the SQL migrations embedded from `crates/server/migrations/`
//! against the database named by `DATABASE_URL`. Migrations are only ever
//! run through this command, never on server startup, so deploys stay in
//! control of when the schema moves.

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("failed to connect to database: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| MigrationError::MissingDatabaseUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    tracing::info!("Running migrations");
    sqlx::migrate!("../server/migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}
