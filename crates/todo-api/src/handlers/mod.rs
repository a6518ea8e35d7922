//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod todos;
pub mod users;

use axum::Json;
use todo_service::Message;

/// Root greeting
///
/// GET /
pub async fn root() -> Json<Message> {
    Json(Message::new("Hello World!"))
}
