//! Handlers for the `/contributions` resource.
//!
//! Contributions carry a typed content map: every key must parse into the
//! fixed field enumeration and every value is validated before it is
//! stored, so rows never hold unknown keys or malformed values.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::Serialize;
use ucampus_core::content::{ContentField, FieldValue};
use ucampus_core::contribution::{self, ContributionKind};
use ucampus_core::error::CoreError;
use ucampus_core::types::DbId;
use ucampus_db::models::contribution::{
    Contribution, ContributionFilter, CreateContribution, UpdateContribution,
};
use ucampus_db::models::user::PublicUser;
use ucampus_db::repositories::{ContributionRepo, UserRepo};
use ucampus_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Request body for `POST /contributions`.
#[derive(Debug, serde::Deserialize)]
pub struct CreateContributionRequest {
    pub kind: String,
    pub title: String,
    pub content: Option<serde_json::Map<String, serde_json::Value>>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// Request body for `PUT /contributions/{id}`.
#[derive(Debug, serde::Deserialize)]
pub struct UpdateContributionRequest {
    pub title: Option<String>,
    pub content: Option<serde_json::Map<String, serde_json::Value>>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// Query parameters for listing contributions.
#[derive(Debug, serde::Deserialize)]
pub struct ContributionListParams {
    pub kind: Option<String>,
    pub tag: Option<String>,
    pub owner_id: Option<DbId>,
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A contribution joined with its owner's public info, returned by the
/// single-item fetch endpoints.
#[derive(Debug, Serialize)]
pub struct ContributionDetail {
    #[serde(flatten)]
    pub contribution: Contribution,
    pub owner: PublicUser,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /contributions
///
/// Create a new contribution owned by the caller.
pub async fn create_contribution(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateContributionRequest>,
) -> AppResult<impl IntoResponse> {
    let kind = ContributionKind::parse(&input.kind)?;
    contribution::validate_title(&input.title)?;

    let tags = input.tags.unwrap_or_default();
    contribution::validate_tags(&tags)?;

    let content = match &input.content {
        Some(raw) => validate_content_map(raw)?,
        None => serde_json::Value::Object(serde_json::Map::new()),
    };

    let created = ContributionRepo::create(
        &state.pool,
        auth.user_id,
        &CreateContribution {
            kind: kind.as_str().to_string(),
            title: input.title.trim().to_string(),
            content,
            tags,
            is_public: input.is_public.unwrap_or(true),
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        contribution_id = created.id,
        kind = %created.kind,
        slug = created.slug.as_deref().unwrap_or(""),
        "Contribution created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /contributions?kind=&tag=&owner_id=&q=&limit=&offset=
///
/// List public, non-deleted contributions.
pub async fn list_contributions(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ContributionListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref kind) = params.kind {
        ContributionKind::parse(kind)?;
    }

    let contributions = ContributionRepo::list(
        &state.pool,
        &ContributionFilter {
            kind: params.kind,
            tag: params.tag,
            owner_id: params.owner_id,
            title_query: params.q,
            limit: params.limit,
            offset: params.offset,
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: contributions,
    }))
}

/// GET /contributions/{id}
pub async fn get_contribution(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let contribution = load_visible(&state.pool, id, auth.user_id).await?;
    let detail = with_owner(&state.pool, contribution).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /contributions/slug/{slug}
pub async fn get_contribution_by_slug(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let contribution = ContributionRepo::find_by_slug(&state.pool, &slug)
        .await?
        .filter(|c| contribution::can_view(c.owner_id, c.is_public, auth.user_id))
        .ok_or_else(|| not_found_by_slug(&slug))?;

    let detail = with_owner(&state.pool, contribution).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /contributions/{id}
///
/// Owner-only direct edit. Collaborators go through edit requests instead.
pub async fn update_contribution(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContributionRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = load_visible(&state.pool, id, auth.user_id).await?;
    contribution::ensure_owner(existing.owner_id, auth.user_id)?;

    if let Some(ref title) = input.title {
        contribution::validate_title(title)?;
    }
    if let Some(ref tags) = input.tags {
        contribution::validate_tags(tags)?;
    }
    let content = match &input.content {
        Some(raw) => Some(validate_content_map(raw)?),
        None => None,
    };

    let updated = ContributionRepo::update(
        &state.pool,
        id,
        &UpdateContribution {
            title: input.title.map(|t| t.trim().to_string()),
            content,
            tags: input.tags,
            is_public: input.is_public,
        },
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Contribution",
            id,
        })
    })?;

    tracing::info!(
        user_id = auth.user_id,
        contribution_id = id,
        "Contribution updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /contributions/{id}
///
/// Owner-only soft delete. The slug stays reserved.
pub async fn delete_contribution(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = load_visible(&state.pool, id, auth.user_id).await?;
    contribution::ensure_owner(existing.owner_id, auth.user_id)?;

    ContributionRepo::soft_delete(&state.pool, id).await?;

    tracing::info!(
        user_id = auth.user_id,
        contribution_id = id,
        "Contribution soft-deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /contributions/{id}/restore
///
/// Owner-only restore of a soft-deleted contribution.
pub async fn restore_contribution(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let owner_id = ContributionRepo::find_owner_any(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Contribution",
                id,
            })
        })?;
    contribution::ensure_owner(owner_id, auth.user_id)?;

    let restored = ContributionRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Contribution {id} is not deleted"
        ))));
    }

    let contribution = ContributionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Contribution",
                id,
            })
        })?;

    tracing::info!(
        user_id = auth.user_id,
        contribution_id = id,
        "Contribution restored"
    );

    Ok(Json(DataResponse { data: contribution }))
}

// ---------------------------------------------------------------------------
// Helpers shared with other handler modules
// ---------------------------------------------------------------------------

/// Load a contribution the viewer is allowed to see.
///
/// Private contributions are indistinguishable from missing ones for
/// non-owners.
pub(crate) async fn load_visible(
    pool: &DbPool,
    id: DbId,
    viewer_id: DbId,
) -> Result<Contribution, AppError> {
    let contribution = ContributionRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Contribution",
            id,
        })
    })?;

    if !contribution::can_view(contribution.owner_id, contribution.is_public, viewer_id) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Contribution",
            id,
        }));
    }

    Ok(contribution)
}

/// Join a contribution with its owner's public info.
pub(crate) async fn with_owner(
    pool: &DbPool,
    contribution: Contribution,
) -> Result<ContributionDetail, AppError> {
    let owner = UserRepo::find_by_id(pool, contribution.owner_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "Contribution {} references missing owner {}",
                contribution.id, contribution.owner_id
            ))
        })?;

    Ok(ContributionDetail {
        owner: PublicUser::from(&owner),
        contribution,
    })
}

/// Slug lookups have no numeric id to report.
fn not_found_by_slug(slug: &str) -> AppError {
    AppError::NotFound(format!("No contribution with slug '{slug}'"))
}

/// Validate a raw content map into its stored JSON form.
pub(crate) fn validate_content_map(
    raw: &serde_json::Map<String, serde_json::Value>,
) -> Result<serde_json::Value, AppError> {
    let mut content = serde_json::Map::new();
    for (key, value) in raw {
        let field = ContentField::parse(key)?;
        let parsed = FieldValue::from_json(field, value)?;
        content.insert(field.as_str().to_string(), parsed.to_json());
    }
    Ok(serde_json::Value::Object(content))
}
