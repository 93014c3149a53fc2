//! Repository for the `discussions` and `discussion_interests` tables.

use sqlx::PgPool;
use ucampus_core::types::DbId;

use crate::models::discussion::{
    CreateDiscussion, Discussion, DiscussionWithInterest, InterestState,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, contribution_id, author_id, parent_id, body, created_at";

/// Select list for comments joined with interest data; `$2` is the viewer.
const WITH_INTEREST: &str = "d.id, d.contribution_id, d.author_id, d.parent_id, d.body, \
    d.created_at, \
    COUNT(di.user_id) AS interest_count, \
    COALESCE(BOOL_OR(di.user_id = $2), FALSE) AS viewer_interested";

/// Provides operations for discussion comments and the interest toggle.
pub struct DiscussionRepo;

impl DiscussionRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateDiscussion,
    ) -> Result<Discussion, sqlx::Error> {
        let query = format!(
            "INSERT INTO discussions (contribution_id, author_id, parent_id, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(input.contribution_id)
            .bind(author_id)
            .bind(input.parent_id)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Discussion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM discussions WHERE id = $1");
        sqlx::query_as::<_, Discussion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a contribution's top-level comments, newest first, with
    /// interest counts and the viewer's own interest flag.
    pub async fn list_top_level(
        pool: &PgPool,
        contribution_id: DbId,
        viewer_id: DbId,
    ) -> Result<Vec<DiscussionWithInterest>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_INTEREST}
             FROM discussions d
             LEFT JOIN discussion_interests di ON di.discussion_id = d.id
             WHERE d.contribution_id = $1 AND d.parent_id IS NULL
             GROUP BY d.id
             ORDER BY d.created_at DESC"
        );
        sqlx::query_as::<_, DiscussionWithInterest>(&query)
            .bind(contribution_id)
            .bind(viewer_id)
            .fetch_all(pool)
            .await
    }

    /// List every response on a contribution, oldest first. The handler
    /// groups them under their parent comments.
    pub async fn list_responses(
        pool: &PgPool,
        contribution_id: DbId,
        viewer_id: DbId,
    ) -> Result<Vec<DiscussionWithInterest>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_INTEREST}
             FROM discussions d
             LEFT JOIN discussion_interests di ON di.discussion_id = d.id
             WHERE d.contribution_id = $1 AND d.parent_id IS NOT NULL
             GROUP BY d.id
             ORDER BY d.created_at ASC"
        );
        sqlx::query_as::<_, DiscussionWithInterest>(&query)
            .bind(contribution_id)
            .bind(viewer_id)
            .fetch_all(pool)
            .await
    }

    /// Toggle a user's interest on a comment.
    ///
    /// Idempotent per (user, comment) pair: toggling twice returns to the
    /// original state. The returned count reflects distinct interested
    /// users after the toggle.
    pub async fn toggle_interest(
        pool: &PgPool,
        discussion_id: DbId,
        user_id: DbId,
    ) -> Result<InterestState, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query(
            "DELETE FROM discussion_interests WHERE discussion_id = $1 AND user_id = $2",
        )
        .bind(discussion_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let interested = removed == 0;
        if interested {
            sqlx::query(
                "INSERT INTO discussion_interests (discussion_id, user_id) VALUES ($1, $2)",
            )
            .bind(discussion_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        let interest_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM discussion_interests WHERE discussion_id = $1",
        )
        .bind(discussion_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(InterestState {
            interested,
            interest_count,
        })
    }
}
