//! Integration tests for the edit-request review workflow.
//!
//! Exercises the repository layer against a real database to verify that:
//! - Approval writes the proposed value into the contribution content
//! - Rejection leaves contribution content unchanged
//! - A reviewed request can never be reviewed again (conditional update)
//! - Approval overwrites intervening direct edits (last-approval-wins)
//! - Listing filters by field key and status

use serde_json::json;
use sqlx::PgPool;
use ucampus_db::models::contribution::{CreateContribution, UpdateContribution};
use ucampus_db::models::edit_request::{CreateEditRequest, EditRequestFilter};
use ucampus_db::models::user::{CreateUser, User};
use ucampus_db::repositories::{ContributionRepo, EditRequestRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@campus.edu"),
            password_hash: "$argon2id$test-hash".to_string(),
            display_name: None,
        },
    )
    .await
    .expect("user creation should succeed")
}

async fn seed_contribution(
    pool: &PgPool,
    owner_id: i64,
    title: &str,
    content: serde_json::Value,
) -> ucampus_db::models::contribution::Contribution {
    ContributionRepo::create(
        pool,
        owner_id,
        &CreateContribution {
            kind: "idea".to_string(),
            title: title.to_string(),
            content,
            tags: vec![],
            is_public: true,
        },
    )
    .await
    .expect("contribution creation should succeed")
}

fn problem_change(contribution_id: i64, old: &str, new: &str) -> CreateEditRequest {
    CreateEditRequest {
        contribution_id,
        content_key: "problem".to_string(),
        old_value: Some(json!(old)),
        new_value: json!(new),
        editor_note: Some("typo fix".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Test: submission creates a pending request
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_submission_is_pending(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let requester = seed_user(&pool, "requester").await;
    let contribution =
        seed_contribution(&pool, owner.id, "Bike share", json!({"problem": "A"})).await;

    let request = EditRequestRepo::create(
        &pool,
        requester.id,
        &problem_change(contribution.id, "A", "B"),
    )
    .await
    .unwrap();

    assert_eq!(request.status, "pending");
    assert_eq!(request.requester_id, requester.id);
    assert_eq!(request.old_value, Some(json!("A")));
    assert_eq!(request.new_value, json!("B"));
    assert!(request.reviewed_by.is_none());
    assert!(request.reviewed_at.is_none());
}

// ---------------------------------------------------------------------------
// Test: approve writes the new value into the contribution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_approve_updates_contribution_content(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let requester = seed_user(&pool, "requester").await;
    let contribution =
        seed_contribution(&pool, owner.id, "Bike share", json!({"problem": "A"})).await;

    let request = EditRequestRepo::create(
        &pool,
        requester.id,
        &problem_change(contribution.id, "A", "B"),
    )
    .await
    .unwrap();

    let (approved, updated) = EditRequestRepo::approve(&pool, request.id, owner.id)
        .await
        .unwrap()
        .expect("pending request should approve");

    assert_eq!(approved.status, "approved");
    assert_eq!(approved.reviewed_by, Some(owner.id));
    assert!(approved.reviewed_at.is_some());
    assert_eq!(updated.content["problem"], json!("B"));

    // The row in the database reflects the write-back too.
    let reloaded = ContributionRepo::find_by_id(&pool, contribution.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.content["problem"], json!("B"));
}

// ---------------------------------------------------------------------------
// Test: a reviewed request cannot be reviewed again
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_second_review_loses(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let requester = seed_user(&pool, "requester").await;
    let contribution =
        seed_contribution(&pool, owner.id, "Bike share", json!({"problem": "A"})).await;

    let request = EditRequestRepo::create(
        &pool,
        requester.id,
        &problem_change(contribution.id, "A", "B"),
    )
    .await
    .unwrap();

    EditRequestRepo::approve(&pool, request.id, owner.id)
        .await
        .unwrap()
        .expect("first approve should win");

    let second = EditRequestRepo::approve(&pool, request.id, owner.id)
        .await
        .unwrap();
    assert!(second.is_none(), "second approve must observe zero rows");

    let reject = EditRequestRepo::reject(&pool, request.id, owner.id, Some("late"))
        .await
        .unwrap();
    assert!(reject.is_none(), "reject after approve must observe zero rows");

    let reloaded = EditRequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, "approved");
    assert!(reloaded.review_note.is_none());
}

// ---------------------------------------------------------------------------
// Test: reject stores the note and leaves content untouched
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_reject_leaves_content_unchanged(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let requester = seed_user(&pool, "requester").await;
    let contribution =
        seed_contribution(&pool, owner.id, "Bike share", json!({"problem": "A"})).await;

    let request = EditRequestRepo::create(
        &pool,
        requester.id,
        &problem_change(contribution.id, "A", "B"),
    )
    .await
    .unwrap();

    let rejected = EditRequestRepo::reject(&pool, request.id, owner.id, Some("not convincing"))
        .await
        .unwrap()
        .expect("pending request should reject");

    assert_eq!(rejected.status, "rejected");
    assert_eq!(rejected.review_note.as_deref(), Some("not convincing"));

    let reloaded = ContributionRepo::find_by_id(&pool, contribution.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.content["problem"], json!("A"));
}

// ---------------------------------------------------------------------------
// Test: approval overwrites intervening edits (last-approval-wins)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_approve_overwrites_intervening_edit(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let requester = seed_user(&pool, "requester").await;
    let contribution =
        seed_contribution(&pool, owner.id, "Bike share", json!({"problem": "A"})).await;

    let request = EditRequestRepo::create(
        &pool,
        requester.id,
        &problem_change(contribution.id, "A", "B"),
    )
    .await
    .unwrap();

    // The owner edits the field directly while the request is pending.
    ContributionRepo::update(
        &pool,
        contribution.id,
        &UpdateContribution {
            content: Some(json!({"problem": "C"})),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let (_, updated) = EditRequestRepo::approve(&pool, request.id, owner.id)
        .await
        .unwrap()
        .expect("pending request should approve");

    // old_value ("A") no longer matches, but the approved value still wins.
    assert_eq!(updated.content["problem"], json!("B"));
}

// ---------------------------------------------------------------------------
// Test: approve creates the field when it was absent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_approve_creates_missing_field(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let requester = seed_user(&pool, "requester").await;
    let contribution = seed_contribution(&pool, owner.id, "Bike share", json!({})).await;

    let request = EditRequestRepo::create(
        &pool,
        requester.id,
        &CreateEditRequest {
            contribution_id: contribution.id,
            content_key: "solution".to_string(),
            old_value: None,
            new_value: json!("Dock stations at every gate"),
            editor_note: None,
        },
    )
    .await
    .unwrap();

    let (_, updated) = EditRequestRepo::approve(&pool, request.id, owner.id)
        .await
        .unwrap()
        .expect("pending request should approve");

    assert_eq!(
        updated.content["solution"],
        json!("Dock stations at every gate")
    );
}

// ---------------------------------------------------------------------------
// Test: list filters by field key and status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_filters(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let requester = seed_user(&pool, "requester").await;
    let contribution = seed_contribution(
        &pool,
        owner.id,
        "Bike share",
        json!({"problem": "A", "impact": "X"}),
    )
    .await;

    let first = EditRequestRepo::create(
        &pool,
        requester.id,
        &problem_change(contribution.id, "A", "B"),
    )
    .await
    .unwrap();
    EditRequestRepo::create(
        &pool,
        requester.id,
        &CreateEditRequest {
            contribution_id: contribution.id,
            content_key: "impact".to_string(),
            old_value: Some(json!("X")),
            new_value: json!("Y"),
            editor_note: None,
        },
    )
    .await
    .unwrap();

    EditRequestRepo::approve(&pool, first.id, owner.id)
        .await
        .unwrap()
        .unwrap();

    let all = EditRequestRepo::list_by_contribution(
        &pool,
        contribution.id,
        &EditRequestFilter::default(),
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 2);

    let problem_only = EditRequestRepo::list_by_contribution(
        &pool,
        contribution.id,
        &EditRequestFilter {
            content_key: Some("problem".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(problem_only.len(), 1);
    assert_eq!(problem_only[0].content_key, "problem");

    let pending_only = EditRequestRepo::list_by_contribution(
        &pool,
        contribution.id,
        &EditRequestFilter {
            status: Some("pending".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(pending_only.len(), 1);
    assert_eq!(pending_only[0].content_key, "impact");
}
