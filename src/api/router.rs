use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // User management
        .nest("/api/users", users::create_users_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
