//! User handlers

use axum::{extract::State, Json};
use todo_service::{Message, PageQuery, UserList, UserPublic, UserSchema, UserService};

use crate::extractors::{CurrentUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserSchema>,
) -> ApiResult<Created<Json<UserPublic>>> {
    let service = UserService::new(state.service_context());
    let user = service.create_user(request).await?;
    Ok(Created(Json(user)))
}

/// List users
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Json<UserList>> {
    let service = UserService::new(state.service_context());
    let users = service.list_users(query.page()).await?;
    Ok(Json(users))
}

/// Replace the caller's profile
///
/// PUT /users/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<UserSchema>,
) -> ApiResult<Json<UserPublic>> {
    let service = UserService::new(state.service_context());
    let user = service.update_user(&current, user_id, request).await?;
    Ok(Json(user))
}

/// Delete the caller's account
///
/// DELETE /users/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<Message>> {
    let service = UserService::new(state.service_context());
    let message = service.delete_user(&current, user_id).await?;
    Ok(Json(message))
}
