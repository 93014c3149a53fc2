//! Handlers for the bookmark toggle.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use ucampus_core::types::DbId;
use ucampus_db::repositories::BookmarkRepo;

use crate::error::AppResult;
use crate::handlers::contributions::load_visible;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /contributions/{id}/bookmark
///
/// Toggle the caller's bookmark on a contribution. Idempotent: toggling
/// twice returns to the original state.
pub async fn toggle_bookmark(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(contribution_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_visible(&state.pool, contribution_id, auth.user_id).await?;

    let bookmark = BookmarkRepo::toggle(&state.pool, auth.user_id, contribution_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        contribution_id,
        bookmarked = bookmark.bookmarked,
        "Bookmark toggled"
    );

    Ok(Json(DataResponse { data: bookmark }))
}

/// GET /user/bookmarks
///
/// List the caller's bookmarked contributions, most recent first.
pub async fn list_bookmarks(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let contributions = BookmarkRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: contributions,
    }))
}
