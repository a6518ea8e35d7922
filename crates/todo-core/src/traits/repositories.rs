//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{NewTodo, Todo, User};
use crate::error::DomainError;
use crate::value_objects::{PageRequest, TodoFilter};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// List users ordered by id
    async fn list(&self, page: PageRequest) -> RepoResult<Vec<User>>;

    /// Create a new user and return it with its assigned id
    async fn create(&self, username: &str, email: &str, password_hash: &str) -> RepoResult<User>;

    /// Replace profile fields and password hash
    ///
    /// A clash with another user's username or email is `UserConflict`.
    async fn update(&self, user: &User, password_hash: &str) -> RepoResult<User>;

    /// Delete a user and, by cascade, their todos
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;
}

// ============================================================================
// Todo Repository
// ============================================================================

/// Every lookup is scoped to an owner; another user's todo is indistinguishable
/// from a missing one.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Create a new todo and return it with its assigned id
    async fn create(&self, todo: &NewTodo) -> RepoResult<Todo>;

    /// Find a todo owned by `user_id`
    async fn find_for_user(&self, id: i64, user_id: i64) -> RepoResult<Option<Todo>>;

    /// List todos owned by `user_id` matching the filter, ordered by id
    async fn list_for_user(
        &self,
        user_id: i64,
        filter: &TodoFilter,
        page: PageRequest,
    ) -> RepoResult<Vec<Todo>>;

    /// Persist title, description and state of an existing todo
    async fn update(&self, todo: &Todo) -> RepoResult<Todo>;

    /// Delete a todo owned by `user_id`; returns false when nothing matched
    async fn delete(&self, id: i64, user_id: i64) -> RepoResult<bool>;
}
