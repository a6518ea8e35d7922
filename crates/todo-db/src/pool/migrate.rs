//! Schema migrations, applied at startup

use std::path::Path;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;

/// Migrations shipped with this crate
pub const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

/// Apply every pending migration found in `dir`
pub async fn run_migrations_from(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir).await?;
    tracing::info!(count = migrator.iter().count(), dir = %dir.display(), "Applying migrations");
    migrator.run(pool).await
}

/// Apply the crate's own migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    run_migrations_from(pool, Path::new(MIGRATIONS_DIR)).await
}
