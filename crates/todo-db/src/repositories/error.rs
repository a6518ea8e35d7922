//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use todo_core::error::DomainError;

/// Unique constraint on `users.username`
pub const USERS_USERNAME_KEY: &str = "users_username_key";
/// Unique constraint on `users.email`
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and map it by constraint name, or fall back
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    map_db_error(e)
}

/// Create a "user not found" error
pub fn user_not_found(id: i64) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "todo not found" error
pub fn todo_not_found(id: i64) -> DomainError {
    DomainError::TodoNotFound(id)
}
