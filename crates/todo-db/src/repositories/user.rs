//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use todo_core::entities::User;
use todo_core::error::DomainError;
use todo_core::traits::{RepoResult, UserRepository};
use todo_core::value_objects::PageRequest;

use crate::models::UserModel;

use super::error::{
    map_db_error, map_unique_violation, user_not_found, USERS_EMAIL_KEY, USERS_USERNAME_KEY,
};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, sql: &str, value: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one(
            r"
            SELECT id, username, email, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
            email,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.find_one(
            r"
            SELECT id, username, email, created_at, updated_at
            FROM users
            WHERE username = $1
            ",
            username,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, created_at, updated_at
            FROM users
            ORDER BY id
            OFFSET $1
            LIMIT $2
            ",
        )
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, username: &str, email: &str, password_hash: &str) -> RepoResult<User> {
        let row = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, created_at, updated_at
            ",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                Some(USERS_USERNAME_KEY) => DomainError::UsernameAlreadyExists,
                Some(USERS_EMAIL_KEY) => DomainError::EmailAlreadyExists,
                _ => DomainError::UserConflict,
            })
        })?;

        Ok(User::from(row))
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = user.id))]
    async fn update(&self, user: &User, password_hash: &str) -> RepoResult<User> {
        let row = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, created_at, updated_at
            ",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::UserConflict))?;

        row.map(User::from).ok_or_else(|| user_not_found(user.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
