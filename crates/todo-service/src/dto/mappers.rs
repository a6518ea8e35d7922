//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use todo_core::entities::{Todo, User};

use super::responses::{TodoPublic, UserPublic};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserPublic {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

// ============================================================================
// Todo Mappers
// ============================================================================

impl From<Todo> for TodoPublic {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            state: todo.state,
            user_id: todo.user_id,
        }
    }
}
