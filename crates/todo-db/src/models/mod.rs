//! Database models - SQLx-compatible structs for PostgreSQL tables

mod todo;
mod user;

pub use todo::TodoModel;
pub use user::UserModel;
