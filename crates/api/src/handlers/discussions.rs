//! Handlers for discussion comments and the interest toggle.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use ucampus_core::discussion::validate_comment_body;
use ucampus_core::error::CoreError;
use ucampus_core::types::DbId;
use ucampus_db::models::discussion::{CreateDiscussion, DiscussionWithInterest};
use ucampus_db::repositories::DiscussionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::contributions::load_visible;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /discussions`.
#[derive(Debug, Deserialize)]
pub struct CreateDiscussionRequest {
    pub contribution_id: DbId,
    pub body: String,
    /// When set, the comment is a response to a top-level comment.
    pub parent_id: Option<DbId>,
}

/// A top-level comment with its one level of responses.
#[derive(Debug, Serialize)]
pub struct DiscussionThread {
    #[serde(flatten)]
    pub comment: DiscussionWithInterest,
    pub responses: Vec<DiscussionWithInterest>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /discussions
///
/// Append a comment or a response. Responses must target a top-level
/// comment on the same contribution; deeper nesting is rejected.
pub async fn create_discussion(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDiscussionRequest>,
) -> AppResult<impl IntoResponse> {
    load_visible(&state.pool, input.contribution_id, auth.user_id).await?;
    validate_comment_body(&input.body)?;

    if let Some(parent_id) = input.parent_id {
        let parent = DiscussionRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Discussion",
                    id: parent_id,
                })
            })?;
        if parent.contribution_id != input.contribution_id {
            return Err(AppError::Core(CoreError::Validation(
                "Parent comment belongs to a different contribution".to_string(),
            )));
        }
        if parent.parent_id.is_some() {
            return Err(AppError::Core(CoreError::Validation(
                "Responses cannot be nested".to_string(),
            )));
        }
    }

    let created = DiscussionRepo::create(
        &state.pool,
        auth.user_id,
        &CreateDiscussion {
            contribution_id: input.contribution_id,
            parent_id: input.parent_id,
            body: input.body.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        contribution_id = input.contribution_id,
        discussion_id = created.id,
        is_response = created.parent_id.is_some(),
        "Discussion comment created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /contributions/{id}/discussions
///
/// Top-level comments newest first, each with its responses oldest first,
/// interest counts, and the caller's own interest flags.
pub async fn list_discussions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(contribution_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_visible(&state.pool, contribution_id, auth.user_id).await?;

    let top_level =
        DiscussionRepo::list_top_level(&state.pool, contribution_id, auth.user_id).await?;
    let mut responses =
        DiscussionRepo::list_responses(&state.pool, contribution_id, auth.user_id).await?;

    let mut threads = Vec::with_capacity(top_level.len());
    for comment in top_level {
        let (own, rest): (Vec<_>, Vec<_>) = responses
            .into_iter()
            .partition(|r| r.parent_id == Some(comment.id));
        responses = rest;
        threads.push(DiscussionThread {
            comment,
            responses: own,
        });
    }

    Ok(Json(DataResponse { data: threads }))
}

/// POST /discussions/{id}/interest
///
/// Toggle the caller's interest. Calling twice returns to the original
/// state; the count reflects distinct interested users.
pub async fn toggle_interest(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let discussion = DiscussionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Discussion",
                id,
            })
        })?;
    load_visible(&state.pool, discussion.contribution_id, auth.user_id).await?;

    let interest = DiscussionRepo::toggle_interest(&state.pool, id, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        discussion_id = id,
        interested = interest.interested,
        "Interest toggled"
    );

    Ok(Json(DataResponse { data: interest }))
}
