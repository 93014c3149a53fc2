//! Collaborator note model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use ucampus_core::types::{DbId, Timestamp};

/// A row from the `notes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub contribution_id: DbId,
    pub author_id: DbId,
    pub kind: String,
    pub content_key: Option<String>,
    pub body: String,
    pub status: String,
    pub resolved_by: Option<DbId>,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Validated values for inserting a note.
#[derive(Debug)]
pub struct CreateNote {
    pub contribution_id: DbId,
    pub kind: String,
    pub content_key: Option<String>,
    pub body: String,
}

/// Optional filters for listing a contribution's notes.
#[derive(Debug, Default)]
pub struct NoteFilter {
    pub kind: Option<String>,
    pub status: Option<String>,
}
