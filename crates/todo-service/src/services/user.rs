//! User service
//!
//! Handles registration, listing, and self-service profile changes.

use todo_core::entities::User;
use todo_core::error::DomainError;
use todo_core::PageRequest;
use tracing::{info, instrument};

use crate::dto::{Message, UserList, UserPublic, UserSchema};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// A taken username is reported before a taken email.
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn create_user(&self, request: UserSchema) -> ServiceResult<UserPublic> {
        if self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        if self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password).await?;
        let user = self
            .ctx
            .user_repo()
            .create(&request.username, &request.email, &password_hash)
            .await?;

        info!(user_id = user.id, "User registered successfully");
        Ok(UserPublic::from(user))
    }

    /// List users ordered by id
    #[instrument(skip(self))]
    pub async fn list_users(&self, page: PageRequest) -> ServiceResult<UserList> {
        let users = self.ctx.user_repo().list(page).await?;

        Ok(UserList {
            users: users.into_iter().map(UserPublic::from).collect(),
        })
    }

    /// Replace the caller's own profile and password
    #[instrument(skip(self, current, request), fields(current_user_id = current.id))]
    pub async fn update_user(
        &self,
        current: &User,
        user_id: i64,
        request: UserSchema,
    ) -> ServiceResult<UserPublic> {
        if !current.owns(user_id) {
            return Err(ServiceError::forbidden());
        }

        let password_hash = self.ctx.password_service().hash(&request.password).await?;

        let mut user = current.clone();
        user.set_profile(request.username, request.email);
        let updated = self.ctx.user_repo().update(&user, &password_hash).await?;

        info!(user_id, "User updated");
        Ok(UserPublic::from(updated))
    }

    /// Delete the caller's own account and, with it, their todos
    #[instrument(skip(self, current), fields(current_user_id = current.id))]
    pub async fn delete_user(&self, current: &User, user_id: i64) -> ServiceResult<Message> {
        if !current.owns(user_id) {
            return Err(ServiceError::forbidden());
        }

        self.ctx.user_repo().delete(user_id).await?;

        info!(user_id, "User deleted");
        Ok(Message::new("User deleted successfully"))
    }
}
