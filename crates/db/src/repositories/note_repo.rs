//! Repository for the `notes` table.
//!
//! Resolve/reject use the same conditional-update pattern as edit request
//! review: only a pending note transitions, and only once.

use sqlx::PgPool;
use ucampus_core::types::DbId;

use crate::models::note::{CreateNote, Note, NoteFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, contribution_id, author_id, kind, content_key, body, status, \
    resolved_by, resolved_at, created_at";

/// Provides CRUD operations and resolution transitions for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new pending note, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateNote,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (contribution_id, author_id, kind, content_key, body)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(input.contribution_id)
            .bind(author_id)
            .bind(&input.kind)
            .bind(&input.content_key)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find a note by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a contribution's notes, newest first, optionally filtered by
    /// kind and status (the client groups by kind for display).
    pub async fn list_by_contribution(
        pool: &PgPool,
        contribution_id: DbId,
        filter: &NoteFilter,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE contribution_id = $1
               AND ($2::text IS NULL OR kind = $2)
               AND ($3::text IS NULL OR status = $3)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(contribution_id)
            .bind(&filter.kind)
            .bind(&filter.status)
            .fetch_all(pool)
            .await
    }

    /// Mark a pending note resolved. Returns `None` when the note is
    /// already terminal.
    pub async fn resolve(
        pool: &PgPool,
        id: DbId,
        resolver_id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        Self::transition(pool, id, resolver_id, "resolved").await
    }

    /// Mark a pending note rejected. Returns `None` when the note is
    /// already terminal.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        resolver_id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        Self::transition(pool, id, resolver_id, "rejected").await
    }

    async fn transition(
        pool: &PgPool,
        id: DbId,
        resolver_id: DbId,
        status: &str,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes
             SET status = $3, resolved_by = $2, resolved_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(resolver_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
