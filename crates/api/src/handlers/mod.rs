//! HTTP handlers, one module per resource.

pub mod auth;
pub mod bookmarks;
pub mod contributions;
pub mod discussions;
pub mod edit_requests;
pub mod notes;
