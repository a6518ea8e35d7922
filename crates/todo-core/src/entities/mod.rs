//! Domain entities - core business objects

mod todo;
mod user;

pub use todo::{NewTodo, Todo, TodoChanges, TodoState, TodoStateParseError};
pub use user::User;
