//! Refresh-token session model.

use sqlx::FromRow;
use ucampus_core::types::{DbId, Timestamp};

/// A row from the `user_sessions` table.
///
/// Only the SHA-256 hash of the refresh token is stored, so a database
/// leak does not compromise active sessions.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// Values for inserting a new session.
#[derive(Debug)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
