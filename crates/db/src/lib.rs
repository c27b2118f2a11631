//! Project document persistence.
//!
//! [`ProjectStore`] is the contract the rest of the workspace programs
//! against. [`PgProjectStore`] keeps each record as a JSONB document in
//! PostgreSQL; [`MemoryProjectStore`] keeps raw documents in process for
//! development and tests. Both coerce documents into
//! [`folio_core::project::Project`] at this boundary.

pub mod error;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use error::DbError;
pub use repositories::{MemoryProjectStore, PgProjectStore};
pub use store::ProjectStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
