//! Repository for the `contributions` table, including slug assignment and
//! the offline slug backfill pass.

use std::collections::HashSet;

use sqlx::{PgPool, Postgres, Transaction};
use ucampus_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use ucampus_core::slug::{fallback_slug, slugify, uniquify};
use ucampus_core::types::DbId;

use crate::models::contribution::{
    Contribution, ContributionFilter, CreateContribution, SlugTarget, UpdateContribution,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, kind, title, slug, content, tags, is_public, \
    deleted_at, created_at, updated_at";

/// Outcome of a slug backfill pass.
#[derive(Debug, Default)]
pub struct SlugBackfillReport {
    /// Rows that received a new slug.
    pub assigned: usize,
    /// Rows whose existing slug was already correct.
    pub skipped: usize,
    /// Rows whose save failed; the pass continues past them.
    pub failed: usize,
}

/// Provides CRUD operations for contributions.
pub struct ContributionRepo;

impl ContributionRepo {
    /// Insert a new contribution and assign its slug in one transaction.
    ///
    /// The slug is derived from the title, falls back to
    /// `contribution-{id}` when the title has no ASCII alphanumerics, and
    /// takes a numeric suffix on collision with any existing row
    /// (soft-deleted rows keep their slugs reserved).
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateContribution,
    ) -> Result<Contribution, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO contributions (owner_id, kind, title, content, tags, is_public)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Contribution>(&query)
            .bind(owner_id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.tags)
            .bind(input.is_public)
            .fetch_one(&mut *tx)
            .await?;

        let candidate = slug_candidate(&inserted.title, inserted.id);
        let slug = free_slug(&mut tx, &candidate).await?;

        let query = format!(
            "UPDATE contributions SET slug = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let contribution = sqlx::query_as::<_, Contribution>(&query)
            .bind(inserted.id)
            .bind(&slug)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(contribution)
    }

    /// Find a non-deleted contribution by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contribution>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM contributions WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Contribution>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-deleted contribution by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Contribution>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM contributions WHERE slug = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Contribution>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List public, non-deleted contributions, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ContributionFilter,
    ) -> Result<Vec<Contribution>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(filter.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM contributions
             WHERE deleted_at IS NULL AND is_public = TRUE
               AND ($1::text IS NULL OR kind = $1)
               AND ($2::text IS NULL OR $2 = ANY(tags))
               AND ($3::bigint IS NULL OR owner_id = $3)
               AND ($4::text IS NULL OR title ILIKE '%' || $4 || '%')
             ORDER BY created_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(&filter.kind)
            .bind(&filter.tag)
            .bind(filter.owner_id)
            .bind(&filter.title_query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply an owner's direct update, returning the updated row.
    ///
    /// The slug is never regenerated here; a title change keeps the
    /// original slug (regeneration happens only in the backfill pass with
    /// `--force`).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContribution,
    ) -> Result<Option<Contribution>, sqlx::Error> {
        let query = format!(
            "UPDATE contributions SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                tags = COALESCE($4, tags),
                is_public = COALESCE($5, is_public),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.tags)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a contribution. Returns `true` if a row was hidden.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE contributions SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted contribution. Returns `true` if a row was
    /// restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE contributions SET deleted_at = NULL WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the owner of a possibly soft-deleted contribution.
    ///
    /// Used by restore, which must work on hidden rows.
    pub async fn find_owner_any(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT owner_id FROM contributions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Write the new value of a single content field.
    ///
    /// Exposed for the approve path; runs inside the caller's transaction.
    pub async fn set_content_field(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        content_key: &str,
        value: &serde_json::Value,
    ) -> Result<Contribution, sqlx::Error> {
        let query = format!(
            "UPDATE contributions
             SET content = jsonb_set(content, ARRAY[$2::text], $3),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(id)
            .bind(content_key)
            .bind(value)
            .fetch_one(&mut **tx)
            .await
    }

    // -----------------------------------------------------------------------
    // Slug backfill
    // -----------------------------------------------------------------------

    /// Assign slugs to contributions that lack one, or regenerate all slugs
    /// when `force` is set. Soft-deleted rows are included: their slugs stay
    /// reserved and they receive slugs themselves.
    ///
    /// Each row is saved independently with a quiet update (no `updated_at`
    /// bump); a failure on one row is logged and does not abort the pass.
    pub async fn backfill_slugs(
        pool: &PgPool,
        force: bool,
    ) -> Result<SlugBackfillReport, sqlx::Error> {
        let targets = Self::slug_targets(pool, force).await?;
        let existing: Vec<String> =
            sqlx::query_scalar("SELECT slug FROM contributions WHERE slug IS NOT NULL")
                .fetch_all(pool)
                .await?;
        let mut taken: HashSet<String> = existing.into_iter().collect();

        let mut report = SlugBackfillReport::default();

        for target in targets {
            // A forced regeneration may legitimately land on the row's own
            // current slug, so it must not collide with itself.
            if let Some(current) = &target.slug {
                taken.remove(current);
            }

            let candidate = slug_candidate(&target.title, target.id);
            let slug = uniquify(&candidate, &taken);

            if target.slug.as_deref() == Some(slug.as_str()) {
                taken.insert(slug);
                report.skipped += 1;
                continue;
            }

            match Self::set_slug_quiet(pool, target.id, &slug).await {
                Ok(()) => {
                    tracing::info!(contribution_id = target.id, slug = %slug, "Slug assigned");
                    taken.insert(slug);
                    report.assigned += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        contribution_id = target.id,
                        error = %err,
                        "Failed to save slug, continuing"
                    );
                    if let Some(current) = target.slug {
                        taken.insert(current);
                    }
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Rows the backfill pass will visit: slug-less rows, or every row when
    /// forced. Includes soft-deleted rows.
    async fn slug_targets(pool: &PgPool, force: bool) -> Result<Vec<SlugTarget>, sqlx::Error> {
        sqlx::query_as::<_, SlugTarget>(
            "SELECT id, title, slug FROM contributions
             WHERE $1 OR slug IS NULL
             ORDER BY id",
        )
        .bind(force)
        .fetch_all(pool)
        .await
    }

    /// Write a slug without touching `updated_at` or any other column.
    async fn set_slug_quiet(pool: &PgPool, id: DbId, slug: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE contributions SET slug = $2 WHERE id = $1")
            .bind(id)
            .bind(slug)
            .execute(pool)
            .await?;
        Ok(())
    }
}

/// Derive the base slug candidate for a title, falling back to
/// `contribution-{id}` when the title slugifies to nothing.
fn slug_candidate(title: &str, id: DbId) -> String {
    let base = slugify(title);
    if base.is_empty() {
        fallback_slug(id)
    } else {
        base
    }
}

/// Find a free variant of `candidate` by probing the table, appending
/// `-1`, `-2`, … until no row holds the attempt.
async fn free_slug(
    tx: &mut Transaction<'_, Postgres>,
    candidate: &str,
) -> Result<String, sqlx::Error> {
    let mut attempt = candidate.to_string();
    let mut suffix = 1u32;
    loop {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM contributions WHERE slug = $1)")
                .bind(&attempt)
                .fetch_one(&mut **tx)
                .await?;
        if !taken {
            return Ok(attempt);
        }
        attempt = format!("{candidate}-{suffix}");
        suffix += 1;
    }
}
