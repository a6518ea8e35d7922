//! User entity - represents an account that owns todos

use chrono::{DateTime, Utc};

/// User entity
///
/// The password hash is deliberately not part of the entity; it is only
/// read through [`UserRepository::get_password_hash`](crate::traits::UserRepository::get_password_hash)
/// during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether this user is the owner of a resource
    #[inline]
    pub fn owns(&self, owner_id: i64) -> bool {
        self.id == owner_id
    }

    /// Replace the profile fields
    pub fn set_profile(&mut self, username: String, email: String) {
        self.username = username;
        self.email = email;
        self.updated_at = Utc::now();
    }
}
