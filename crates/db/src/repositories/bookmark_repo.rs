//! Repository for the `bookmarks` table.

use sqlx::PgPool;
use ucampus_core::types::DbId;

use crate::models::bookmark::BookmarkState;
use crate::models::contribution::Contribution;

/// Provides the bookmark toggle and listing.
pub struct BookmarkRepo;

impl BookmarkRepo {
    /// Toggle a user's bookmark on a contribution. Idempotent per pair:
    /// toggling twice returns to the original state.
    pub async fn toggle(
        pool: &PgPool,
        user_id: DbId,
        contribution_id: DbId,
    ) -> Result<BookmarkState, sqlx::Error> {
        let removed =
            sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND contribution_id = $2")
                .bind(user_id)
                .bind(contribution_id)
                .execute(pool)
                .await?
                .rows_affected();

        let bookmarked = removed == 0;
        if bookmarked {
            sqlx::query("INSERT INTO bookmarks (user_id, contribution_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(contribution_id)
                .execute(pool)
                .await?;
        }

        Ok(BookmarkState { bookmarked })
    }

    /// List a user's bookmarked contributions, most recently bookmarked
    /// first. Soft-deleted contributions are hidden.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Contribution>, sqlx::Error> {
        sqlx::query_as::<_, Contribution>(
            "SELECT c.id, c.owner_id, c.kind, c.title, c.slug, c.content, c.tags, c.is_public,
                    c.deleted_at, c.created_at, c.updated_at
             FROM bookmarks b
             JOIN contributions c ON c.id = b.contribution_id
             WHERE b.user_id = $1 AND c.deleted_at IS NULL
             ORDER BY b.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
