//! Integration tests for the discussion interest toggle and the bookmark
//! toggle: both must be idempotent per (user, target) pair.

use serde_json::json;
use sqlx::PgPool;
use ucampus_db::models::contribution::CreateContribution;
use ucampus_db::models::discussion::CreateDiscussion;
use ucampus_db::models::user::{CreateUser, User};
use ucampus_db::repositories::{BookmarkRepo, ContributionRepo, DiscussionRepo, UserRepo};

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

async fn seed_discussion(pool: &PgPool) -> (User, i64, i64) {
    let owner = seed_user(pool, "owner").await;
    let contribution = ContributionRepo::create(
        pool,
        owner.id,
        &CreateContribution {
            kind: "question".to_string(),
            title: "Where to park?".to_string(),
            content: json!({}),
            tags: vec![],
            is_public: true,
        },
    )
    .await
    .unwrap();

    let discussion = DiscussionRepo::create(
        pool,
        owner.id,
        &CreateDiscussion {
            contribution_id: contribution.id,
            parent_id: None,
            body: "The east lot is always empty".to_string(),
        },
    )
    .await
    .unwrap();

    (owner, contribution.id, discussion.id)
}

// ---------------------------------------------------------------------------
// Test: toggling twice returns to the original state
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_interest_toggle_is_idempotent(pool: PgPool) {
    let (_, _, discussion_id) = seed_discussion(&pool).await;
    let viewer = seed_user(&pool, "viewer").await;

    let on = DiscussionRepo::toggle_interest(&pool, discussion_id, viewer.id)
        .await
        .unwrap();
    assert!(on.interested);
    assert_eq!(on.interest_count, 1);

    let off = DiscussionRepo::toggle_interest(&pool, discussion_id, viewer.id)
        .await
        .unwrap();
    assert!(!off.interested);
    assert_eq!(off.interest_count, 0);
}

// ---------------------------------------------------------------------------
// Test: the count reflects distinct users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_interest_count_is_distinct_users(pool: PgPool) {
    let (owner, _, discussion_id) = seed_discussion(&pool).await;
    let viewer_a = seed_user(&pool, "viewer-a").await;
    let viewer_b = seed_user(&pool, "viewer-b").await;

    DiscussionRepo::toggle_interest(&pool, discussion_id, viewer_a.id)
        .await
        .unwrap();
    DiscussionRepo::toggle_interest(&pool, discussion_id, owner.id)
        .await
        .unwrap();
    let last = DiscussionRepo::toggle_interest(&pool, discussion_id, viewer_b.id)
        .await
        .unwrap();

    assert_eq!(last.interest_count, 3);

    // One user withdrawing only removes their own interest.
    let after = DiscussionRepo::toggle_interest(&pool, discussion_id, owner.id)
        .await
        .unwrap();
    assert_eq!(after.interest_count, 2);
}

// ---------------------------------------------------------------------------
// Test: top-level listing carries counts and the viewer flag
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_listing_carries_viewer_flag(pool: PgPool) {
    let (_, contribution_id, discussion_id) = seed_discussion(&pool).await;
    let viewer = seed_user(&pool, "viewer").await;
    let other = seed_user(&pool, "other").await;

    DiscussionRepo::toggle_interest(&pool, discussion_id, viewer.id)
        .await
        .unwrap();
    DiscussionRepo::toggle_interest(&pool, discussion_id, other.id)
        .await
        .unwrap();

    let as_viewer = DiscussionRepo::list_top_level(&pool, contribution_id, viewer.id)
        .await
        .unwrap();
    assert_eq!(as_viewer.len(), 1);
    assert_eq!(as_viewer[0].interest_count, 2);
    assert!(as_viewer[0].viewer_interested);

    let bystander = seed_user(&pool, "bystander").await;
    let as_bystander = DiscussionRepo::list_top_level(&pool, contribution_id, bystander.id)
        .await
        .unwrap();
    assert!(!as_bystander[0].viewer_interested);
}

// ---------------------------------------------------------------------------
// Test: responses list under their parents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_responses_are_separated_from_top_level(pool: PgPool) {
    let (owner, contribution_id, discussion_id) = seed_discussion(&pool).await;

    DiscussionRepo::create(
        &pool,
        owner.id,
        &CreateDiscussion {
            contribution_id,
            parent_id: Some(discussion_id),
            body: "Only before 9am".to_string(),
        },
    )
    .await
    .unwrap();

    let top_level = DiscussionRepo::list_top_level(&pool, contribution_id, owner.id)
        .await
        .unwrap();
    assert_eq!(top_level.len(), 1);

    let responses = DiscussionRepo::list_responses(&pool, contribution_id, owner.id)
        .await
        .unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].parent_id, Some(discussion_id));
}

// ---------------------------------------------------------------------------
// Test: bookmark toggle is idempotent and lists hide deleted rows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_bookmark_toggle(pool: PgPool) {
    let (_, contribution_id, _) = seed_discussion(&pool).await;
    let viewer = seed_user(&pool, "viewer").await;

    let on = BookmarkRepo::toggle(&pool, viewer.id, contribution_id)
        .await
        .unwrap();
    assert!(on.bookmarked);

    let listed = BookmarkRepo::list_for_user(&pool, viewer.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, contribution_id);

    ContributionRepo::soft_delete(&pool, contribution_id)
        .await
        .unwrap();
    let listed = BookmarkRepo::list_for_user(&pool, viewer.id).await.unwrap();
    assert!(listed.is_empty(), "deleted contributions leave the list");

    ContributionRepo::restore(&pool, contribution_id).await.unwrap();
    let off = BookmarkRepo::toggle(&pool, viewer.id, contribution_id)
        .await
        .unwrap();
    assert!(!off.bookmarked);

    let listed = BookmarkRepo::list_for_user(&pool, viewer.id).await.unwrap();
    assert!(listed.is_empty());
}
