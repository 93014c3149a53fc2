//! Handlers for collaborator notes.
//!
//! Any authenticated viewer may file a note; only the contribution owner
//! resolves or rejects one, and only once. Notes never touch contribution
//! content.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use ucampus_core::content::ContentField;
use ucampus_core::contribution;
use ucampus_core::error::CoreError;
use ucampus_core::note::{self, NoteKind, NoteStatus};
use ucampus_core::types::DbId;
use ucampus_db::models::note::{CreateNote, Note, NoteFilter};
use ucampus_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::contributions::load_visible;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Request body for `POST /contributions/{id}/notes`.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub kind: String,
    pub body: String,
    /// Optional field anchor: a note may target one content field.
    pub content_key: Option<String>,
}

/// Query parameters for listing a contribution's notes.
#[derive(Debug, Deserialize)]
pub struct NoteListParams {
    pub kind: Option<String>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /contributions/{id}/notes
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(contribution_id): Path<DbId>,
    Json(input): Json<CreateNoteRequest>,
) -> AppResult<impl IntoResponse> {
    load_visible(&state.pool, contribution_id, auth.user_id).await?;

    let kind = NoteKind::parse(&input.kind)?;
    note::validate_note_body(&input.body)?;
    let content_key = match &input.content_key {
        Some(key) => Some(ContentField::parse(key)?),
        None => None,
    };

    let created = NoteRepo::create(
        &state.pool,
        auth.user_id,
        &CreateNote {
            contribution_id,
            kind: kind.as_str().to_string(),
            content_key: content_key.map(|f| f.as_str().to_string()),
            body: input.body.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        contribution_id,
        note_id = created.id,
        kind = %created.kind,
        "Note created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /contributions/{id}/notes?kind=&status=
///
/// List a contribution's notes; the client groups them by kind for display.
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(contribution_id): Path<DbId>,
    Query(params): Query<NoteListParams>,
) -> AppResult<impl IntoResponse> {
    load_visible(&state.pool, contribution_id, auth.user_id).await?;

    let kind = match &params.kind {
        Some(k) => Some(NoteKind::parse(k)?),
        None => None,
    };
    let status = match &params.status {
        Some(s) => Some(NoteStatus::parse(s)?),
        None => None,
    };

    let notes = NoteRepo::list_by_contribution(
        &state.pool,
        contribution_id,
        &NoteFilter {
            kind: kind.map(|k| k.as_str().to_string()),
            status: status.map(|s| s.as_str().to_string()),
        },
    )
    .await?;

    Ok(Json(DataResponse { data: notes }))
}

/// PATCH /notes/{id}/resolve
pub async fn resolve_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transition_note(auth, state, id, NoteStatus::Resolved).await
}

/// PATCH /notes/{id}/reject
pub async fn reject_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transition_note(auth, state, id, NoteStatus::Rejected).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Shared owner-gated pending -> terminal transition for notes.
async fn transition_note(
    auth: AuthUser,
    state: AppState,
    id: DbId,
    target: NoteStatus,
) -> AppResult<Json<DataResponse<Note>>> {
    let note = NoteRepo::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Note",
            id,
        })
    })?;

    let contribution = load_visible(&state.pool, note.contribution_id, auth.user_id).await?;
    contribution::ensure_owner(contribution.owner_id, auth.user_id)?;

    let transitioned = match target {
        NoteStatus::Resolved => NoteRepo::resolve(&state.pool, id, auth.user_id).await?,
        NoteStatus::Rejected => NoteRepo::reject(&state.pool, id, auth.user_id).await?,
        NoteStatus::Pending => None,
    };

    let note = transitioned.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Note {id} has already been resolved or rejected"
        )))
    })?;

    tracing::info!(
        user_id = auth.user_id,
        note_id = id,
        status = %note.status,
        "Note reviewed"
    );

    Ok(Json(DataResponse { data: note }))
}
