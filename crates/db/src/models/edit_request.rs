//! Edit request model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use ucampus_core::types::{DbId, Timestamp};

/// A row from the `edit_requests` table.
///
/// `old_value` is the live value of the field at submission time (absent
/// when the field had no value yet); `new_value` is the proposed
/// replacement. Once `status` leaves `pending` the row is immutable.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EditRequest {
    pub id: DbId,
    pub contribution_id: DbId,
    pub requester_id: DbId,
    pub content_key: String,
    pub old_value: Option<serde_json::Value>,
    pub new_value: serde_json::Value,
    pub editor_note: Option<String>,
    pub status: String,
    pub review_note: Option<String>,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated values for inserting an edit request.
#[derive(Debug)]
pub struct CreateEditRequest {
    pub contribution_id: DbId,
    pub content_key: String,
    pub old_value: Option<serde_json::Value>,
    pub new_value: serde_json::Value,
    pub editor_note: Option<String>,
}

/// Optional filters for listing a contribution's edit requests.
#[derive(Debug, Default)]
pub struct EditRequestFilter {
    pub content_key: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
