//! Todo handlers
//!
//! Every endpoint here requires a bearer token and only ever sees the
//! caller's own todos.

use axum::{extract::State, Json};
use todo_service::{
    CreateTodoRequest, ListTodosQuery, Message, TodoList, TodoPublic, TodoService,
    UpdateTodoRequest,
};

use crate::extractors::{CurrentUser, IdPath, JsonBody, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /todos
pub async fn create_todo(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    JsonBody(request): JsonBody<CreateTodoRequest>,
) -> ApiResult<Json<TodoPublic>> {
    let service = TodoService::new(state.service_context());
    let todo = service.create_todo(&current, request).await?;
    Ok(Json(todo))
}

/// GET /todos
pub async fn list_todos(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    QueryParams(query): QueryParams<ListTodosQuery>,
) -> ApiResult<Json<TodoList>> {
    let service = TodoService::new(state.service_context());
    let todos = service
        .list_todos(&current, &query.filter(), query.page())
        .await?;
    Ok(Json(todos))
}

/// GET /todos/:todo_id
pub async fn get_todo(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    IdPath(todo_id): IdPath,
) -> ApiResult<Json<TodoPublic>> {
    let service = TodoService::new(state.service_context());
    let todo = service.get_todo(&current, todo_id).await?;
    Ok(Json(todo))
}

/// PATCH /todos/:todo_id
pub async fn patch_todo(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    IdPath(todo_id): IdPath,
    JsonBody(request): JsonBody<UpdateTodoRequest>,
) -> ApiResult<Json<TodoPublic>> {
    let service = TodoService::new(state.service_context());
    let todo = service.update_todo(&current, todo_id, request).await?;
    Ok(Json(todo))
}

/// DELETE /todos/:todo_id
pub async fn delete_todo(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    IdPath(todo_id): IdPath,
) -> ApiResult<Json<Message>> {
    let service = TodoService::new(state.service_context());
    let message = service.delete_todo(&current, todo_id).await?;
    Ok(Json(message))
}
