//! Route tree construction.

pub mod health;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                  register (public)
/// /auth/login                                     login (public)
/// /auth/refresh                                   refresh (public)
/// /auth/logout                                    logout (requires auth)
///
/// /contributions                                  list, create
/// /contributions/{id}                             get, update, soft delete
/// /contributions/{id}/restore                     restore (POST)
/// /contributions/slug/{slug}                      get by slug
///
/// /contributions/{id}/edit-requests               list, submit
/// /edit-requests/{id}                             get
/// /edit-requests/{id}/approve                     approve (POST, owner only)
/// /edit-requests/{id}/reject                      reject (POST, owner only)
///
/// /contributions/{id}/notes                       list, create
/// /notes/{id}/resolve                             resolve (PATCH, owner only)
/// /notes/{id}/reject                              reject (PATCH, owner only)
///
/// /discussions                                    create comment / response
/// /contributions/{id}/discussions                 list threads
/// /discussions/{id}/interest                      interest toggle (POST)
///
/// /contributions/{id}/bookmark                    bookmark toggle (POST)
/// /user/bookmarks                                 caller's bookmarks (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // -- Auth --
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        // -- Contributions --
        .route(
            "/contributions",
            get(handlers::contributions::list_contributions)
                .post(handlers::contributions::create_contribution),
        )
        .route(
            "/contributions/{id}",
            get(handlers::contributions::get_contribution)
                .put(handlers::contributions::update_contribution)
                .delete(handlers::contributions::delete_contribution),
        )
        .route(
            "/contributions/{id}/restore",
            post(handlers::contributions::restore_contribution),
        )
        .route(
            "/contributions/slug/{slug}",
            get(handlers::contributions::get_contribution_by_slug),
        )
        // -- Edit requests --
        .route(
            "/contributions/{id}/edit-requests",
            get(handlers::edit_requests::list_edit_requests)
                .post(handlers::edit_requests::submit_edit_request),
        )
        .route(
            "/edit-requests/{id}",
            get(handlers::edit_requests::get_edit_request),
        )
        .route(
            "/edit-requests/{id}/approve",
            post(handlers::edit_requests::approve_edit_request),
        )
        .route(
            "/edit-requests/{id}/reject",
            post(handlers::edit_requests::reject_edit_request),
        )
        // -- Notes --
        .route(
            "/contributions/{id}/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route("/notes/{id}/resolve", patch(handlers::notes::resolve_note))
        .route("/notes/{id}/reject", patch(handlers::notes::reject_note))
        // -- Discussions --
        .route("/discussions", post(handlers::discussions::create_discussion))
        .route(
            "/contributions/{id}/discussions",
            get(handlers::discussions::list_discussions),
        )
        .route(
            "/discussions/{id}/interest",
            post(handlers::discussions::toggle_interest),
        )
        // -- Bookmarks --
        .route(
            "/contributions/{id}/bookmark",
            post(handlers::bookmarks::toggle_bookmark),
        )
        .route("/user/bookmarks", get(handlers::bookmarks::list_bookmarks))
}
