//! Request DTOs for API endpoints
//!
//! Bodies that carry user input rules implement `Validate`.

use serde::Deserialize;
use validator::Validate;

use todo_core::{PageRequest, TodoChanges, TodoFilter, TodoState};

// ============================================================================
// Auth Requests
// ============================================================================

/// Login form; `username` carries the email address
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Registration and full profile replacement share one shape
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserSchema {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Offset pagination query (`offset` defaults to 0, `limit` to 100)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.offset, self.limit)
    }
}

// ============================================================================
// Todo Requests
// ============================================================================

/// Create todo request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: String,
    pub state: TodoState,
}

/// Partial todo update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

impl From<UpdateTodoRequest> for TodoChanges {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            state: request.state,
        }
    }
}

/// Listing query for todos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTodosQuery {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ListTodosQuery {
    pub fn filter(&self) -> TodoFilter {
        TodoFilter {
            title: self.title.clone(),
            description: self.description.clone(),
            state: self.state,
        }
    }

    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.offset, self.limit)
    }
}
