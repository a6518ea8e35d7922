//! Authentication service
//!
//! Handles login, per-request token validation, and token refresh.
//! Tokens are never stored; validity is signature plus expiry.

use chrono::{DateTime, Utc};
use todo_common::AppError;
use todo_core::entities::User;
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, TokenResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Exchange email and password for a bearer token
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    #[instrument(skip(self, request), fields(email = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let Some(user) = self
            .ctx
            .user_repo()
            .find_by_email(&request.username)
            .await?
        else {
            // Costs the same as a wrong password.
            self.ctx
                .password_service()
                .verify_placeholder(&request.password)
                .await?;
            warn!("Login failed: user not found");
            return Err(ServiceError::invalid_credentials());
        };

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user.id, "Login failed: no password hash");
                ServiceError::invalid_credentials()
            })?;

        if !self
            .ctx
            .password_service()
            .verify(&request.password, &password_hash)
            .await?
        {
            warn!(user_id = user.id, "Login failed: invalid password");
            return Err(ServiceError::invalid_credentials());
        }

        let access_token = self.ctx.jwt_service().issue(&user.email)?;
        info!(user_id = user.id, "User logged in successfully");

        Ok(TokenResponse::bearer(access_token))
    }

    /// Resolve a bearer token to the user it was issued for
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        self.authenticate_at(token, Utc::now()).await
    }

    /// Resolve a bearer token against an explicit clock
    ///
    /// A subject that no longer names a user is reported exactly like a bad
    /// signature.
    #[instrument(skip(self, token))]
    pub async fn authenticate_at(&self, token: &str, now: DateTime<Utc>) -> ServiceResult<User> {
        let claims = self
            .ctx
            .jwt_service()
            .decode_at(token, now)
            .map_err(|e| {
                warn!(reason = e.error_code(), "Token rejected");
                ServiceError::from(e)
            })?;

        let email = claims.subject()?;
        self.ctx
            .user_repo()
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                warn!(reason = "UNKNOWN_SUBJECT", "Token rejected");
                ServiceError::App(AppError::InvalidToken)
            })
    }

    /// Issue a fresh token for an already authenticated user
    pub fn refresh(&self, user: &User) -> ServiceResult<TokenResponse> {
        self.refresh_at(user, Utc::now())
    }

    /// Issue a fresh token as if the current time were `now`
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub fn refresh_at(&self, user: &User, now: DateTime<Utc>) -> ServiceResult<TokenResponse> {
        let access_token = self.ctx.jwt_service().issue_at(&user.email, now)?;
        info!("Token refreshed");
        Ok(TokenResponse::bearer(access_token))
    }
}
