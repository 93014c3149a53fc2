//! Bookmark model.

use serde::Serialize;

/// Result of toggling a bookmark.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BookmarkState {
    /// Whether the contribution is bookmarked after the toggle.
    pub bookmarked: bool,
}
