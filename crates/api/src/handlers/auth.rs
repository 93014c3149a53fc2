//! Handlers for the `/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use ucampus_core::error::CoreError;
use ucampus_core::types::DbId;
use ucampus_db::models::session::CreateSession;
use ucampus_db::models::user::{CreateUser, User};
use ucampus_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum username length, in characters.
const MAX_USERNAME_LEN: usize = 50;
/// Minimum username length, in characters.
const MIN_USERNAME_LEN: usize = 3;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by register, login, and
/// refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a new account. Duplicate usernames and emails surface as 409 via
/// the `uq_users_*` constraints.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let username = input.username.trim();
    validate_username(username)?;
    validate_email(input.email.trim())?;
    validate_password_strength(&input.password).map_err(CoreError::Validation)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: input.email.trim().to_string(),
            password_hash,
            display_name: input.display_name.map(|n| n.trim().to_string()),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let response = issue_tokens(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let verified = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");

    let response = issue_tokens(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Rotate a refresh token: the presented token's session is revoked and a
/// fresh token pair is issued.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account unavailable".into())))?;

    SessionRepo::revoke_by_hash(&state.pool, &hash).await?;

    let response = issue_tokens(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented refresh token's session.
pub async fn logout(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<StatusCode> {
    let hash = hash_refresh_token(&input.refresh_token);
    SessionRepo::revoke_by_hash(&state.pool, &hash).await?;

    tracing::info!(user_id = auth.user_id, "User logged out");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue an access/refresh token pair and persist the refresh session.
async fn issue_tokens(state: &AppState, user: &User) -> Result<AuthResponse, AppError> {
    let jwt = &state.config.jwt;

    let access_token = generate_access_token(user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    let refresh_token = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: hash_refresh_token(&refresh_token),
            expires_at: Utc::now() + Duration::days(jwt.refresh_token_expiry_days),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserInfo::from(user),
    })
}

fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be between {MIN_USERNAME_LEN} and {MAX_USERNAME_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(
            "Username may contain only letters, digits, '-' and '_'".to_string(),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), CoreError> {
    // Full RFC validation is the mail provider's problem; this catches
    // obviously malformed input.
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    });
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation("Invalid email address".to_string()))
    }
}
