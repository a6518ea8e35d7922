//! Authentication extractor
//!
//! Resolves the bearer token in the Authorization header to a stored user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use todo_core::entities::User;
use todo_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// The user a valid access token was issued for
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::missing_auth())?;

        let app_state = AppState::from_ref(state);
        let user = AuthService::new(app_state.service_context())
            .authenticate(bearer.token())
            .await?;

        Ok(CurrentUser(user))
    }
}
