//! Discussion comment models.

use serde::Serialize;
use sqlx::FromRow;
use ucampus_core::types::{DbId, Timestamp};

/// A row from the `discussions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Discussion {
    pub id: DbId,
    pub contribution_id: DbId,
    pub author_id: DbId,
    pub parent_id: Option<DbId>,
    pub body: String,
    pub created_at: Timestamp,
}

/// A discussion comment joined with its interest data for a viewer.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DiscussionWithInterest {
    pub id: DbId,
    pub contribution_id: DbId,
    pub author_id: DbId,
    pub parent_id: Option<DbId>,
    pub body: String,
    pub created_at: Timestamp,
    /// Count of distinct interested users.
    pub interest_count: i64,
    /// Whether the requesting viewer has toggled interest on.
    pub viewer_interested: bool,
}

/// Validated values for inserting a comment.
#[derive(Debug)]
pub struct CreateDiscussion {
    pub contribution_id: DbId,
    pub parent_id: Option<DbId>,
    pub body: String,
}

/// Result of toggling a user's interest on a comment.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InterestState {
    /// Whether the user is interested after the toggle.
    pub interested: bool,
    /// Count of distinct interested users after the toggle.
    pub interest_count: i64,
}
