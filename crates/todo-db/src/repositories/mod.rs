//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in todo-core.

mod error;
mod todo;
mod user;

pub use todo::PgTodoRepository;
pub use user::PgUserRepository;
