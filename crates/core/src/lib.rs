//! Domain logic for the U Campus content-sharing platform.
//!
//! Pure validation rules, typed content fields, state machines, and slug
//! derivation. No I/O; everything here is exercised by the `ucampus-db`
//! repositories and `ucampus-api` handlers.

pub mod content;
pub mod contribution;
pub mod discussion;
pub mod edit_request;
pub mod error;
pub mod note;
pub mod pagination;
pub mod slug;
pub mod types;
