//! Edit request lifecycle: a collaborator proposes one field change, the
//! contribution owner approves or rejects it exactly once.

use crate::content::{values_equivalent, FieldValue};
use crate::error::CoreError;

/// Maximum length of the requester's free-text note, in characters.
pub const MAX_EDITOR_NOTE_LEN: usize = 2_000;

/// Maximum length of the reviewer's rejection note, in characters.
pub const MAX_REVIEW_NOTE_LEN: usize = 2_000;

/// Status of an edit request. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl EditRequestStatus {
    /// The database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditRequestStatus::Pending => "pending",
            EditRequestStatus::Approved => "approved",
            EditRequestStatus::Rejected => "rejected",
        }
    }

    /// Parse a status string (from the database or a query filter).
    pub fn parse(status: &str) -> Result<Self, CoreError> {
        match status {
            "pending" => Ok(EditRequestStatus::Pending),
            "approved" => Ok(EditRequestStatus::Approved),
            "rejected" => Ok(EditRequestStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid edit request status '{other}'. Must be one of: pending, approved, rejected"
            ))),
        }
    }

    /// Reviewed requests are immutable.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EditRequestStatus::Pending)
    }
}

/// Validate a proposed change against the current value of the field.
///
/// The proposed value must differ from the live value read at submission
/// time; link lists are compared order-insensitively so a pure reordering
/// is not accepted as a change. A field with no current value accepts any
/// valid proposal.
pub fn validate_proposal(
    current: Option<&FieldValue>,
    proposed: &FieldValue,
) -> Result<(), CoreError> {
    if let Some(current) = current {
        if values_equivalent(current, proposed) {
            return Err(CoreError::Validation(
                "Proposed value is identical to the current value".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validate an optional free-text note (editor note or review note).
pub fn validate_note(note: &str, max_len: usize) -> Result<(), CoreError> {
    if note.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "Note must be at most {max_len} characters"
        )));
    }
    Ok(())
}
