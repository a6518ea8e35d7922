//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! business logic and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod todo;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use todo::TodoService;
pub use user::UserService;
