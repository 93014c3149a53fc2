//! HTTP-level integration tests for the edit-request workflow.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_empty, post_json, seed_user};
use serde_json::json;
use sqlx::PgPool;

/// Create a contribution through the API and return its id.
async fn create_contribution(
    app: &axum::Router,
    token: &str,
    content: serde_json::Value,
) -> i64 {
    let response = post_json(
        app,
        "/api/v1/contributions",
        token,
        json!({
            "kind": "idea",
            "title": "Campus bike share",
            "content": content,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: the full submit -> approve -> re-approve scenario
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_approve_then_conflict(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_owner, owner_token) = seed_user(&pool, "owner").await;
    let (_collab, collab_token) = seed_user(&pool, "collaborator").await;

    let contribution_id =
        create_contribution(&app, &owner_token, json!({"problem": "A"})).await;

    // Collaborator proposes problem: A -> B.
    let response = post_json(
        &app,
        &format!("/api/v1/contributions/{contribution_id}/edit-requests"),
        &collab_token,
        json!({"content_key": "problem", "new_value": "B"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["status"], "pending");
    assert_eq!(created["data"]["old_value"], "A");
    let request_id = created["data"]["id"].as_i64().unwrap();

    // Owner approves: content updates, request becomes terminal.
    let response = post_empty(
        &app,
        &format!("/api/v1/edit-requests/{request_id}/approve"),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let approved = body_json(response).await;
    assert_eq!(approved["data"]["edit_request"]["status"], "approved");
    assert_eq!(approved["data"]["contribution"]["content"]["problem"], "B");

    // A second approval attempt conflicts.
    let response = post_empty(
        &app,
        &format!("/api/v1/edit-requests/{request_id}/approve"),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let conflict = body_json(response).await;
    assert_eq!(conflict["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Test: only the owner may review
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_owner_review_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_owner, owner_token) = seed_user(&pool, "owner").await;
    let (_collab, collab_token) = seed_user(&pool, "collaborator").await;

    let contribution_id =
        create_contribution(&app, &owner_token, json!({"problem": "A"})).await;

    let response = post_json(
        &app,
        &format!("/api/v1/contributions/{contribution_id}/edit-requests"),
        &collab_token,
        json!({"content_key": "problem", "new_value": "B"}),
    )
    .await;
    let request_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // The requester cannot approve their own proposal.
    let response = post_empty(
        &app,
        &format!("/api/v1/edit-requests/{request_id}/approve"),
        &collab_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json(
        &app,
        &format!("/api/v1/edit-requests/{request_id}/reject"),
        &collab_token,
        json!({"note": "self-reject"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The request is still pending for the real owner.
    let response = get(
        &app,
        &format!("/api/v1/edit-requests/{request_id}"),
        &owner_token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["status"], "pending");
}

// ---------------------------------------------------------------------------
// Test: reject stores the note and leaves content untouched
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reject_keeps_content(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_owner, owner_token) = seed_user(&pool, "owner").await;
    let (_collab, collab_token) = seed_user(&pool, "collaborator").await;

    let contribution_id =
        create_contribution(&app, &owner_token, json!({"problem": "A"})).await;

    let response = post_json(
        &app,
        &format!("/api/v1/contributions/{contribution_id}/edit-requests"),
        &collab_token,
        json!({"content_key": "problem", "new_value": "B"}),
    )
    .await;
    let request_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        &format!("/api/v1/edit-requests/{request_id}/reject"),
        &owner_token,
        json!({"note": "needs more detail"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rejected = body_json(response).await;
    assert_eq!(rejected["data"]["status"], "rejected");
    assert_eq!(rejected["data"]["review_note"], "needs more detail");

    let response = get(
        &app,
        &format!("/api/v1/contributions/{contribution_id}"),
        &owner_token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["content"]["problem"], "A");
}

// ---------------------------------------------------------------------------
// Test: validation failures on submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_validation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_owner, owner_token) = seed_user(&pool, "owner").await;
    let (_collab, collab_token) = seed_user(&pool, "collaborator").await;

    let contribution_id = create_contribution(
        &app,
        &owner_token,
        json!({
            "problem": "A",
            "references": ["https://example.org/b", "https://example.org/a"],
        }),
    )
    .await;

    // Identical value is not a change.
    let response = post_json(
        &app,
        &format!("/api/v1/contributions/{contribution_id}/edit-requests"),
        &collab_token,
        json!({"content_key": "problem", "new_value": "A"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // A reordering of the same references is not a change either.
    let response = post_json(
        &app,
        &format!("/api/v1/contributions/{contribution_id}/edit-requests"),
        &collab_token,
        json!({
            "content_key": "references",
            "new_value": ["https://example.org/a", "https://example.org/b"],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown field keys are rejected at the boundary.
    let response = post_json(
        &app,
        &format!("/api/v1/contributions/{contribution_id}/edit-requests"),
        &collab_token,
        json!({"content_key": "porblem", "new_value": "B"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Empty values are rejected.
    let response = post_json(
        &app,
        &format!("/api/v1/contributions/{contribution_id}/edit-requests"),
        &collab_token,
        json!({"content_key": "problem", "new_value": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Malformed reference URLs are rejected.
    let response = post_json(
        &app,
        &format!("/api/v1/contributions/{contribution_id}/edit-requests"),
        &collab_token,
        json!({"content_key": "references", "new_value": ["not-a-url"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: listing filters by field and status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_filtering(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_owner, owner_token) = seed_user(&pool, "owner").await;
    let (_collab, collab_token) = seed_user(&pool, "collaborator").await;

    let contribution_id = create_contribution(
        &app,
        &owner_token,
        json!({"problem": "A", "impact": "X"}),
    )
    .await;

    for (key, value) in [("problem", "B"), ("impact", "Y")] {
        let response = post_json(
            &app,
            &format!("/api/v1/contributions/{contribution_id}/edit-requests"),
            &collab_token,
            json!({"content_key": key, "new_value": value}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(
        &app,
        &format!("/api/v1/contributions/{contribution_id}/edit-requests?field=problem"),
        &owner_token,
    )
    .await;
    let filtered = body_json(response).await;
    assert_eq!(filtered["data"].as_array().unwrap().len(), 1);
    assert_eq!(filtered["data"][0]["content_key"], "problem");

    let response = get(
        &app,
        &format!("/api/v1/contributions/{contribution_id}/edit-requests?status=pending"),
        &owner_token,
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Test: requests require authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unauthenticated_requests_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::request(
        &app,
        axum::http::Method::GET,
        "/api/v1/contributions/1/edit-requests",
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
