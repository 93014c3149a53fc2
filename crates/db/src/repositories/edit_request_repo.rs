//! Repository for the `edit_requests` table.
//!
//! The pending -> approved/rejected transition is a single conditional
//! UPDATE (`WHERE status = 'pending'`), so two concurrent reviewers cannot
//! both win: the loser sees zero affected rows. The approve write-back to
//! the contribution shares the same transaction as the status flip.

use sqlx::PgPool;
use ucampus_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use ucampus_core::types::DbId;

use crate::models::contribution::Contribution;
use crate::models::edit_request::{CreateEditRequest, EditRequest, EditRequestFilter};
use crate::repositories::ContributionRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, contribution_id, requester_id, content_key, old_value, new_value, \
    editor_note, status, review_note, reviewed_by, reviewed_at, created_at, updated_at";

/// Provides CRUD operations and review transitions for edit requests.
pub struct EditRequestRepo;

impl EditRequestRepo {
    /// Insert a new pending edit request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        requester_id: DbId,
        input: &CreateEditRequest,
    ) -> Result<EditRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO edit_requests
                (contribution_id, requester_id, content_key, old_value, new_value, editor_note)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EditRequest>(&query)
            .bind(input.contribution_id)
            .bind(requester_id)
            .bind(&input.content_key)
            .bind(&input.old_value)
            .bind(&input.new_value)
            .bind(&input.editor_note)
            .fetch_one(pool)
            .await
    }

    /// Find an edit request by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EditRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM edit_requests WHERE id = $1");
        sqlx::query_as::<_, EditRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a contribution's edit requests, newest first, optionally
    /// filtered by field key and status.
    pub async fn list_by_contribution(
        pool: &PgPool,
        contribution_id: DbId,
        filter: &EditRequestFilter,
    ) -> Result<Vec<EditRequest>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(filter.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM edit_requests
             WHERE contribution_id = $1
               AND ($2::text IS NULL OR content_key = $2)
               AND ($3::text IS NULL OR status = $3)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, EditRequest>(&query)
            .bind(contribution_id)
            .bind(&filter.content_key)
            .bind(&filter.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Approve a pending edit request and write the proposed value into the
    /// contribution's content map, atomically.
    ///
    /// Returns `None` when the request is not pending (already reviewed, or
    /// reviewed concurrently). The stored `old_value` is NOT re-checked
    /// against the live content: if the field changed since submission, the
    /// approved value still wins (last-approval-wins).
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
    ) -> Result<Option<(EditRequest, Contribution)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE edit_requests
             SET status = 'approved', reviewed_by = $2, reviewed_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        let Some(request) = sqlx::query_as::<_, EditRequest>(&query)
            .bind(id)
            .bind(reviewer_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let contribution = ContributionRepo::set_content_field(
            &mut tx,
            request.contribution_id,
            &request.content_key,
            &request.new_value,
        )
        .await?;

        tx.commit().await?;
        Ok(Some((request, contribution)))
    }

    /// Reject a pending edit request, storing the optional review note.
    ///
    /// Returns `None` when the request is not pending. Contribution content
    /// is untouched.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
        review_note: Option<&str>,
    ) -> Result<Option<EditRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE edit_requests
             SET status = 'rejected', review_note = $3, reviewed_by = $2,
                 reviewed_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EditRequest>(&query)
            .bind(id)
            .bind(reviewer_id)
            .bind(review_note)
            .fetch_optional(pool)
            .await
    }
}
