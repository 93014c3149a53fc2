//! Handlers for the edit-request workflow.
//!
//! A collaborator proposes one field change; the contribution owner
//! approves or rejects it exactly once. Approval writes the proposed value
//! into the contribution in the same transaction as the status flip.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use ucampus_core::content::{ContentField, FieldValue};
use ucampus_core::contribution;
use ucampus_core::edit_request::{
    self, EditRequestStatus, MAX_EDITOR_NOTE_LEN, MAX_REVIEW_NOTE_LEN,
};
use ucampus_core::error::CoreError;
use ucampus_core::types::DbId;
use ucampus_db::models::contribution::Contribution;
use ucampus_db::models::edit_request::{CreateEditRequest, EditRequest, EditRequestFilter};
use ucampus_db::repositories::EditRequestRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::contributions::load_visible;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /contributions/{id}/edit-requests`.
#[derive(Debug, Deserialize)]
pub struct SubmitEditRequest {
    pub content_key: String,
    pub new_value: serde_json::Value,
    pub note: Option<String>,
}

/// Request body for `POST /edit-requests/{id}/reject`.
#[derive(Debug, Deserialize)]
pub struct RejectEditRequest {
    pub note: Option<String>,
}

/// Query parameters for listing a contribution's edit requests.
#[derive(Debug, Deserialize)]
pub struct EditRequestListParams {
    pub field: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response for a successful approval: the reviewed request plus the
/// contribution it updated.
#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    pub edit_request: EditRequest,
    pub contribution: Contribution,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /contributions/{id}/edit-requests
///
/// Submit a proposed change to one content field. The proposal must differ
/// from the field's current value (link lists compared order-insensitively);
/// the live value is captured as `old_value`.
pub async fn submit_edit_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(contribution_id): Path<DbId>,
    Json(input): Json<SubmitEditRequest>,
) -> AppResult<impl IntoResponse> {
    let contribution = load_visible(&state.pool, contribution_id, auth.user_id).await?;

    let field = ContentField::parse(&input.content_key)?;
    let proposed = FieldValue::from_json(field, &input.new_value)?;

    // The live value at submission time. Stored rows are validated on
    // every write, so a parse failure here means the field is absent.
    let current_json = contribution.content.get(field.as_str()).cloned();
    let current = current_json
        .as_ref()
        .and_then(|v| FieldValue::from_json(field, v).ok());

    edit_request::validate_proposal(current.as_ref(), &proposed)?;

    if let Some(ref note) = input.note {
        edit_request::validate_note(note, MAX_EDITOR_NOTE_LEN)?;
    }

    let created = EditRequestRepo::create(
        &state.pool,
        auth.user_id,
        &CreateEditRequest {
            contribution_id,
            content_key: field.as_str().to_string(),
            old_value: current_json,
            new_value: proposed.to_json(),
            editor_note: input.note,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        contribution_id,
        edit_request_id = created.id,
        content_key = %created.content_key,
        "Edit request submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /contributions/{id}/edit-requests?field=&status=
///
/// List a contribution's edit requests, newest first. The client separates
/// pending from historical requests with the `status` filter.
pub async fn list_edit_requests(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(contribution_id): Path<DbId>,
    Query(params): Query<EditRequestListParams>,
) -> AppResult<impl IntoResponse> {
    load_visible(&state.pool, contribution_id, auth.user_id).await?;

    let field = match &params.field {
        Some(key) => Some(ContentField::parse(key)?),
        None => None,
    };
    let status = match &params.status {
        Some(s) => Some(EditRequestStatus::parse(s)?),
        None => None,
    };

    let requests = EditRequestRepo::list_by_contribution(
        &state.pool,
        contribution_id,
        &EditRequestFilter {
            content_key: field.map(|f| f.as_str().to_string()),
            status: status.map(|s| s.as_str().to_string()),
            limit: params.limit,
            offset: params.offset,
        },
    )
    .await?;

    Ok(Json(DataResponse { data: requests }))
}

/// GET /edit-requests/{id}
pub async fn get_edit_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = find_request(&state, id).await?;
    load_visible(&state.pool, request.contribution_id, auth.user_id).await?;

    Ok(Json(DataResponse { data: request }))
}

/// POST /edit-requests/{id}/approve
///
/// Approve a pending request, writing the proposed value into the
/// contribution. Owner-only; a request that is already reviewed (or loses
/// a concurrent review race) yields 409.
pub async fn approve_edit_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = find_request(&state, id).await?;
    let contribution = load_visible(&state.pool, request.contribution_id, auth.user_id).await?;
    contribution::ensure_owner(contribution.owner_id, auth.user_id)?;

    let (request, contribution) = EditRequestRepo::approve(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| already_reviewed(id))?;

    tracing::info!(
        user_id = auth.user_id,
        edit_request_id = id,
        contribution_id = contribution.id,
        content_key = %request.content_key,
        "Edit request approved"
    );

    Ok(Json(DataResponse {
        data: ApprovalResponse {
            edit_request: request,
            contribution,
        },
    }))
}

/// POST /edit-requests/{id}/reject
///
/// Reject a pending request with an optional review note. Owner-only;
/// contribution content is untouched.
pub async fn reject_edit_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectEditRequest>,
) -> AppResult<impl IntoResponse> {
    let request = find_request(&state, id).await?;
    let contribution = load_visible(&state.pool, request.contribution_id, auth.user_id).await?;
    contribution::ensure_owner(contribution.owner_id, auth.user_id)?;

    if let Some(ref note) = input.note {
        edit_request::validate_note(note, MAX_REVIEW_NOTE_LEN)?;
    }

    let rejected = EditRequestRepo::reject(&state.pool, id, auth.user_id, input.note.as_deref())
        .await?
        .ok_or_else(|| already_reviewed(id))?;

    tracing::info!(
        user_id = auth.user_id,
        edit_request_id = id,
        contribution_id = rejected.contribution_id,
        "Edit request rejected"
    );

    Ok(Json(DataResponse { data: rejected }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_request(state: &AppState, id: DbId) -> Result<EditRequest, AppError> {
    EditRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "EditRequest",
                id,
            })
        })
}

fn already_reviewed(id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Edit request {id} has already been reviewed"
    )))
}
