//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and request parsing.
//! Every rejection is an [`ApiError`](crate::response::ApiError) so clients
//! always see the same error body.

mod auth;
mod request;
mod validated;

pub use auth::CurrentUser;
pub use request::{FormBody, IdPath, JsonBody, QueryParams};
pub use validated::ValidatedJson;
