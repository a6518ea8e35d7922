//! Authentication handlers
//!
//! Password login and token refresh.

use axum::{extract::State, Json};
use todo_service::{AuthService, LoginRequest, TokenResponse};

use crate::extractors::{CurrentUser, FormBody};
use crate::response::ApiResult;
use crate::state::AppState;

/// Exchange email and password for an access token
///
/// POST /auth/token
pub async fn login_for_access_token(
    State(state): State<AppState>,
    FormBody(request): FormBody<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Issue a fresh token for the bearer of a still valid one
///
/// POST /auth/refresh_token
pub async fn refresh_access_token(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(&user)?;
    Ok(Json(response))
}
