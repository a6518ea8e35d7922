//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, SECRET_KEY, ALGORITHM,
//!   ACCESS_TOKEN_EXPIRE_MINUTES (or a `.env` file)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Duration, Utc};
use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use todo_common::JwtService;

async fn start() -> Option<TestServer> {
    if !check_test_env() {
        return None;
    }
    Some(TestServer::start().await.expect("Failed to start server"))
}

async fn create_todo(server: &TestServer, token: &str, todo: &CreateTodo) -> TodoPublic {
    let response = server.post_auth("/todos", token, todo).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Root & Health Tests
// ============================================================================

#[tokio::test]
async fn test_root_returns_hello_world() {
    let Some(server) = start().await else { return };

    let response = server.get("/").await.unwrap();
    let body: Message = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Hello World!");
}

#[tokio::test]
async fn test_health_endpoints() {
    let Some(server) = start().await else { return };

    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let Some(server) = start().await else { return };

    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_create_user() {
    let Some(server) = start().await else { return };
    let schema = UserSchema::unique();

    let user = server.register(&schema).await.unwrap();
    assert_eq!(user.username, schema.username);
    assert_eq!(user.email, schema.email);
}

#[tokio::test]
async fn test_create_user_conflicts() {
    let Some(server) = start().await else { return };
    let existing = UserSchema::unique();
    server.register(&existing).await.unwrap();

    // Username is checked before email.
    let response = server.post("/users", &existing).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "USERNAME_ALREADY_EXISTS");

    let same_email = UserSchema {
        username: UserSchema::unique().username,
        ..existing.clone()
    };
    let response = server.post("/users", &same_email).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let Some(server) = start().await else { return };
    let schema = UserSchema {
        email: "not-an-email".to_string(),
        ..UserSchema::unique()
    };

    let response = server.post("/users", &schema).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_users_pagination() {
    let Some(server) = start().await else { return };
    server.register(&UserSchema::unique()).await.unwrap();
    server.register(&UserSchema::unique()).await.unwrap();

    let response = server.get("/users?offset=0&limit=1").await.unwrap();
    let list: UserList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.users.len(), 1);

    let response = server.get("/users?limit=1000").await.unwrap();
    let list: UserList = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list.users.len() <= 100);
    assert!(list.users.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_update_user() {
    let Some(server) = start().await else { return };
    let (user, _, token) = server.register_and_login().await.unwrap();

    let replacement = UserSchema::unique();
    let response = server
        .put_auth(&format!("/users/{}", user.id), &token, &replacement)
        .await
        .unwrap();
    let updated: UserPublic = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.username, replacement.username);

    // The token subject was the old email, which no longer names anyone.
    let response = server.get_auth("/todos", &token).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");

    // The new password works.
    server.login(&replacement).await.unwrap();
}

#[tokio::test]
async fn test_update_other_user_is_forbidden() {
    let Some(server) = start().await else { return };
    let (_, _, token) = server.register_and_login().await.unwrap();
    let other = server.register(&UserSchema::unique()).await.unwrap();

    let response = server
        .put_auth(&format!("/users/{}", other.id), &token, &UserSchema::unique())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "INSUFFICIENT_PERMISSIONS");

    let response = server
        .delete_auth(&format!("/users/{}", other.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_update_user_conflict() {
    let Some(server) = start().await else { return };
    let (user, schema, token) = server.register_and_login().await.unwrap();
    let other = UserSchema::unique();
    server.register(&other).await.unwrap();

    let clash = UserSchema {
        username: other.username.clone(),
        ..schema
    };
    let response = server
        .put_auth(&format!("/users/{}", user.id), &token, &clash)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body["error"]["code"], "USER_CONFLICT");
    assert_eq!(body["error"]["message"], "Username or Email already exists");
}

#[tokio::test]
async fn test_delete_user() {
    let Some(server) = start().await else { return };
    let (user, _, token) = server.register_and_login().await.unwrap();
    create_todo(&server, &token, &CreateTodo::new("t", "d", "draft")).await;

    let response = server
        .delete_auth(&format!("/users/{}", user.id), &token)
        .await
        .unwrap();
    let body: Message = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "User deleted successfully");

    let response = server.get_auth("/todos", &token).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let Some(server) = start().await else { return };
    let schema = UserSchema::unique();
    server.register(&schema).await.unwrap();

    let response = server
        .post_form(
            "/auth/token",
            &[("username", &schema.email), ("password", &schema.password)],
        )
        .await
        .unwrap();
    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(token.token_type, "Bearer");
    assert!(!token.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let Some(server) = start().await else { return };
    let schema = UserSchema::unique();
    server.register(&schema).await.unwrap();

    let wrong_password = [("username", schema.email.as_str()), ("password", "wrong")];
    let response = server.post_form("/auth/token", &wrong_password).await.unwrap();
    assert_eq!(
        response.headers().get("www-authenticate").unwrap(),
        "Bearer"
    );
    let body: serde_json::Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(body["error"]["message"], "Incorrect username or password");

    let unknown_user = [("username", "nobody@example.com"), ("password", "x")];
    let response = server.post_form("/auth/token", &unknown_user).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_missing_and_malformed_tokens() {
    let Some(server) = start().await else { return };

    let response = server.get("/todos").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTH");

    let response = server.get_auth("/todos", "not-a-jwt").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_invalid() {
    let Some(server) = start().await else { return };
    let (_, schema, _) = server.register_and_login().await.unwrap();

    let jwt = server.jwt_service();
    let forged = JwtService::new(
        "some-other-secret",
        server.config.jwt.algorithm,
        jwt.ttl().num_minutes(),
    )
    .issue(&schema.email)
    .unwrap();

    let response = server.get_auth("/todos", &forged).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_refresh_token() {
    let Some(server) = start().await else { return };
    let (_, _, token) = server.register_and_login().await.unwrap();

    let response = server.post_auth_empty("/auth/refresh_token", &token).await.unwrap();
    let refreshed: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.token_type, "Bearer");
    assert_ne!(refreshed.access_token, token);

    let response = server.get_auth("/todos", &refreshed.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let Some(server) = start().await else { return };
    let (_, schema, _) = server.register_and_login().await.unwrap();

    let jwt = server.jwt_service();
    let issued_at = Utc::now() - jwt.ttl() - Duration::minutes(1);
    let expired = jwt.issue_at(&schema.email, issued_at).unwrap();

    let response = server.get_auth("/todos", &expired).await.unwrap();
    assert_eq!(
        response.headers().get("www-authenticate").unwrap(),
        "Bearer"
    );
    let body: serde_json::Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
    assert_eq!(body["error"]["message"], "Token has expired");

    let response = server.post_auth_empty("/auth/refresh_token", &expired).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "TOKEN_EXPIRED");
}

// ============================================================================
// Todo Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_todo() {
    let Some(server) = start().await else { return };
    let (user, _, token) = server.register_and_login().await.unwrap();

    let todo = create_todo(&server, &token, &CreateTodo::new("Test todo", "desc", "draft")).await;
    assert_eq!(todo.title, "Test todo");
    assert_eq!(todo.state, "draft");
    assert_eq!(todo.user_id, user.id);

    let response = server
        .get_auth(&format!("/todos/{}", todo.id), &token)
        .await
        .unwrap();
    let fetched: TodoPublic = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched, todo);
}

#[tokio::test]
async fn test_create_todo_invalid_state() {
    let Some(server) = start().await else { return };
    let (_, _, token) = server.register_and_login().await.unwrap();

    let response = server
        .post_auth("/todos", &token, &CreateTodo::new("t", "d", "finished"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_todos_filters() {
    let Some(server) = start().await else { return };
    let (_, _, token) = server.register_and_login().await.unwrap();

    for i in 0..5 {
        create_todo(
            &server,
            &token,
            &CreateTodo::new(&format!("Test todo {i}"), "description", "draft"),
        )
        .await;
    }
    create_todo(&server, &token, &CreateTodo::new("other", "plain", "done")).await;

    let response = server.get_auth("/todos", &token).await.unwrap();
    let all: TodoList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.todos.len(), 6);

    let response = server.get_auth("/todos?title=Test%20todo", &token).await.unwrap();
    let list: TodoList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.todos.len(), 5);

    let response = server.get_auth("/todos?title=test%20todo", &token).await.unwrap();
    let list: TodoList = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list.todos.is_empty());

    let response = server
        .get_auth("/todos?description=descr&state=draft", &token)
        .await
        .unwrap();
    let list: TodoList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.todos.len(), 5);

    let response = server.get_auth("/todos?state=done", &token).await.unwrap();
    let list: TodoList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.todos.len(), 1);
    assert_eq!(list.todos[0].title, "other");

    let response = server.get_auth("/todos?offset=1&limit=2", &token).await.unwrap();
    let list: TodoList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.todos.len(), 2);
    assert_eq!(list.todos[0].id, all.todos[1].id);

    let response = server.get_auth("/todos?state=unknown", &token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_todos_are_scoped_to_owner() {
    let Some(server) = start().await else { return };
    let (_, _, owner) = server.register_and_login().await.unwrap();
    let (_, _, stranger) = server.register_and_login().await.unwrap();

    let todo = create_todo(&server, &owner, &CreateTodo::new("mine", "d", "todo")).await;
    let path = format!("/todos/{}", todo.id);

    let response = server.get_auth(&path, &stranger).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body["error"]["message"], "Todo not found");

    let response = server
        .patch_auth(&path, &stranger, &serde_json::json!({"title": "stolen"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_auth(&path, &stranger).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth("/todos", &stranger).await.unwrap();
    let list: TodoList = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list.todos.is_empty());
}

#[tokio::test]
async fn test_patch_todo() {
    let Some(server) = start().await else { return };
    let (_, _, token) = server.register_and_login().await.unwrap();
    let todo = create_todo(&server, &token, &CreateTodo::new("title", "desc", "todo")).await;
    let path = format!("/todos/{}", todo.id);

    let response = server
        .patch_auth(&path, &token, &serde_json::json!({"state": "doing"}))
        .await
        .unwrap();
    let patched: TodoPublic = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(patched.state, "doing");
    assert_eq!(patched.title, "title");
    assert_eq!(patched.description, "desc");

    let response = server
        .patch_auth(&path, &token, &serde_json::json!({}))
        .await
        .unwrap();
    let unchanged: TodoPublic = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unchanged, patched);

    let response = server
        .patch_auth("/todos/999999999", &token, &serde_json::json!({"title": "x"}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_TODO");
}

#[tokio::test]
async fn test_delete_todo() {
    let Some(server) = start().await else { return };
    let (_, _, token) = server.register_and_login().await.unwrap();
    let todo = create_todo(&server, &token, &CreateTodo::new("t", "d", "trash")).await;
    let path = format!("/todos/{}", todo.id);

    let response = server.delete_auth(&path, &token).await.unwrap();
    let body: Message = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Todo deleted successfully");

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_invalid_path_parameter() {
    let Some(server) = start().await else { return };
    let (_, _, token) = server.register_and_login().await.unwrap();

    let response = server.get_auth("/todos/abc", &token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}
