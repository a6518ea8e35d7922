//! Database connection pool management

mod migrate;
mod postgres;

pub use migrate::{run_migrations, run_migrations_from, MIGRATIONS_DIR};
pub use postgres::{create_pool, DatabaseConfig};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
