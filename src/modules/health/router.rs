use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{health, welcome};

/// Mounted at the root, outside the versioned API.
pub fn init_health_router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
}
