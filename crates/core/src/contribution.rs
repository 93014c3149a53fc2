//! Contribution kinds, field limits, and the two-party authorization model.
//!
//! A contribution is exclusively owned by its creator for mutation rights;
//! collaborators author edit requests and notes, but review authority over
//! those always belongs to the contribution owner.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a contribution title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum number of tags on a single contribution.
pub const MAX_TAGS: usize = 20;

/// Maximum length of a single tag, in characters.
pub const MAX_TAG_LEN: usize = 50;

/// A user-authored idea, question, or project post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionKind {
    Idea,
    Question,
    Project,
}

impl ContributionKind {
    /// All valid contribution kinds.
    pub const ALL: &'static [ContributionKind] = &[
        ContributionKind::Idea,
        ContributionKind::Question,
        ContributionKind::Project,
    ];

    /// The database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionKind::Idea => "idea",
            ContributionKind::Question => "question",
            ContributionKind::Project => "project",
        }
    }

    /// Parse a kind string received at the API boundary.
    pub fn parse(kind: &str) -> Result<Self, CoreError> {
        ContributionKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == kind)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid contribution kind '{kind}'. Must be one of: idea, question, project"
                ))
            })
    }
}

/// Validate a contribution title: non-empty after trimming, bounded length.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a tag list: bounded count, each tag non-empty and bounded.
pub fn validate_tags(tags: &[String]) -> Result<(), CoreError> {
    if tags.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_TAGS} tags are allowed"
        )));
    }
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("Tags must not be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_TAG_LEN {
            return Err(CoreError::Validation(format!(
                "Tags must be at most {MAX_TAG_LEN} characters"
            )));
        }
    }
    Ok(())
}

/// Whether a viewer may see a contribution at all.
///
/// Private contributions are visible only to their owner; everyone may see
/// public ones.
pub fn can_view(owner_id: DbId, is_public: bool, viewer_id: DbId) -> bool {
    is_public || owner_id == viewer_id
}

/// Guard for owner-only operations (direct edits, soft delete, and review
/// of edit requests and notes).
pub fn ensure_owner(owner_id: DbId, actor_id: DbId) -> Result<(), CoreError> {
    if owner_id == actor_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the contribution owner may perform this action".to_string(),
        ))
    }
}
