use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// The session context (who the caller is) is NOT here: it is carried by
/// the [`crate::middleware::auth::AuthUser`] extractor, so handlers receive
/// the caller explicitly instead of reading ambient global state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ucampus_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
