//! Contribution model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use ucampus_core::types::{DbId, Timestamp};

/// A row from the `contributions` table.
///
/// `content` is a JSON map keyed by the fixed content-field set; values are
/// validated before every write, so rows never hold unknown keys.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contribution {
    pub id: DbId,
    pub owner_id: DbId,
    pub kind: String,
    pub title: String,
    pub slug: Option<String>,
    pub content: serde_json::Value,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated values for inserting a contribution.
#[derive(Debug)]
pub struct CreateContribution {
    pub kind: String,
    pub title: String,
    pub content: serde_json::Value,
    pub tags: Vec<String>,
    pub is_public: bool,
}

/// Validated values for an owner's direct update. `None` fields are left
/// untouched; `content` replaces the whole map when present.
#[derive(Debug, Default)]
pub struct UpdateContribution {
    pub title: Option<String>,
    pub content: Option<serde_json::Value>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// Optional filters for listing contributions.
#[derive(Debug, Default)]
pub struct ContributionFilter {
    pub kind: Option<String>,
    pub tag: Option<String>,
    pub owner_id: Option<DbId>,
    pub title_query: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A row selected by the slug backfill pass.
#[derive(Debug, Clone, FromRow)]
pub struct SlugTarget {
    pub id: DbId,
    pub title: String,
    pub slug: Option<String>,
}
