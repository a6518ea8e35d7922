//! Repository traits (ports)

mod repositories;

pub use repositories::{RepoResult, TodoRepository, UserRepository};
