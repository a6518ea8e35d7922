//! Route definitions
//!
//! All API routes organized by domain.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{self, auth, health, todos, users};
use crate::state::AppState;

/// Create the main API router (health routes are exported separately)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(todo_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(auth::login_for_access_token))
        .route("/auth/refresh_token", post(auth::refresh_access_token))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:user_id",
            put(users::update_user).delete(users::delete_user),
        )
}

/// Todo routes
fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", post(todos::create_todo).get(todos::list_todos))
        .route(
            "/todos/:todo_id",
            get(todos::get_todo)
                .patch(todos::patch_todo)
                .delete(todos::delete_todo),
        )
}
