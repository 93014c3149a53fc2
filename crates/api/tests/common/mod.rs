#![allow(dead_code)]

//! Shared helpers for API integration tests.
//!
//! Builds the full application router with the same middleware stack as
//! production (via [`build_app_router`]) and provides request helpers that
//! send requests directly to the router with `tower::ServiceExt::oneshot`,
//! without a TCP listener.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ucampus_api::auth::jwt::{generate_access_token, JwtConfig};
use ucampus_api::auth::password::hash_password;
use ucampus_api::config::ServerConfig;
use ucampus_api::router::build_app_router;
use ucampus_api::state::AppState;
use ucampus_db::models::user::{CreateUser, User};
use ucampus_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Create a user directly through the repository and mint an access token
/// for it. Returns the user and a bearer token string.
pub async fn seed_user(pool: &PgPool, username: &str) -> (User, String) {
    let password_hash = hash_password("campus-pass-123").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@campus.edu"),
            password_hash,
            display_name: None,
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_access_token(user.id, &test_config().jwt)
        .expect("token generation should succeed");

    (user, token)
}

/// Send a request to the router. `token` adds a Bearer Authorization
/// header; `body` is serialized as JSON.
pub async fn request(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, path: &str, token: &str) -> Response {
    request(app, Method::GET, path, Some(token), None).await
}

pub async fn post_json(
    app: &Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    request(app, Method::POST, path, Some(token), Some(body)).await
}

pub async fn post_empty(app: &Router, path: &str, token: &str) -> Response {
    request(app, Method::POST, path, Some(token), None).await
}

pub async fn patch_empty(app: &Router, path: &str, token: &str) -> Response {
    request(app, Method::PATCH, path, Some(token), None).await
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
