//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize`-free create struct built by the handlers after
//!   validation (never deserialized straight from a request body)
//! - An update struct with `Option` fields for partial updates

pub mod bookmark;
pub mod contribution;
pub mod discussion;
pub mod edit_request;
pub mod note;
pub mod session;
pub mod user;
