//! Collaborator notes: lightweight annotations grouped by kind, resolved or
//! rejected once by the contribution owner. Notes never touch contribution
//! content.

use crate::error::CoreError;

/// Maximum note body length, in characters. Mirrored by the client; the
/// server is authoritative.
pub const MAX_NOTE_LEN: usize = 5_000;

/// The annotation kind a collaborator files a note under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Idea,
    Concern,
    Improvement,
}

impl NoteKind {
    /// All valid note kinds.
    pub const ALL: &'static [NoteKind] =
        &[NoteKind::Idea, NoteKind::Concern, NoteKind::Improvement];

    /// The database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteKind::Idea => "idea",
            NoteKind::Concern => "concern",
            NoteKind::Improvement => "improvement",
        }
    }

    /// Parse a note kind received at the API boundary.
    pub fn parse(kind: &str) -> Result<Self, CoreError> {
        NoteKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == kind)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid note kind '{kind}'. Must be one of: idea, concern, improvement"
                ))
            })
    }
}

/// Status of a note. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteStatus {
    Pending,
    Resolved,
    Rejected,
}

impl NoteStatus {
    /// The database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteStatus::Pending => "pending",
            NoteStatus::Resolved => "resolved",
            NoteStatus::Rejected => "rejected",
        }
    }

    /// Parse a status string (from the database or a query filter).
    pub fn parse(status: &str) -> Result<Self, CoreError> {
        match status {
            "pending" => Ok(NoteStatus::Pending),
            "resolved" => Ok(NoteStatus::Resolved),
            "rejected" => Ok(NoteStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid note status '{other}'. Must be one of: pending, resolved, rejected"
            ))),
        }
    }
}

/// Validate a note body: non-empty after trimming and within the length cap.
pub fn validate_note_body(body: &str) -> Result<(), CoreError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Note text is required".to_string()));
    }
    if trimmed.chars().count() > MAX_NOTE_LEN {
        return Err(CoreError::Validation(format!(
            "Note must be less than {MAX_NOTE_LEN} characters"
        )));
    }
    Ok(())
}
