//! Todo database model

use sqlx::FromRow;

/// Database model for todos table
///
/// `state` is stored as lower-case text guarded by a CHECK constraint.
#[derive(Debug, Clone, FromRow)]
pub struct TodoModel {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub state: String,
    pub user_id: i64,
}
