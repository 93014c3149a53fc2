//! Discussion comments: append-only, one rendered reply level, with a
//! per-user interest toggle.

use crate::error::CoreError;

/// Maximum comment body length, in characters.
pub const MAX_COMMENT_LEN: usize = 10_000;

/// Validate a comment body: non-empty after trimming and within the cap.
pub fn validate_comment_body(body: &str) -> Result<(), CoreError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Comment text is required".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_COMMENT_LEN {
        return Err(CoreError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_LEN} characters"
        )));
    }
    Ok(())
}
