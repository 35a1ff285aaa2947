//! User management API

mod handlers;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub use handlers::{
    activate_user, create_user, deactivate_user, get_user, list_users, suspend_user, update_user,
};
pub use types::{CreateUserApiRequest, UpdateUserApiRequest, UserApiRequest, UserResponse};

/// Routes mounted under `/api/users`
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{user_id}", get(get_user).put(update_user))
        .route("/{user_id}/activate", post(activate_user))
        .route("/{user_id}/deactivate", post(deactivate_user))
        .route("/{user_id}/suspend", post(suspend_user))
}
