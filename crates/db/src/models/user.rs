//! User model.

use serde::Serialize;
use sqlx::FromRow;
use ucampus_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// `password_hash` is intentionally excluded from serialization.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public view of a user, safe to embed in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub username: String,
    pub display_name: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

/// Values for inserting a new user. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
}
