//! User endpoints

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PageQuery, PaginatedResponse};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

use super::types::{CreateUserApiRequest, UpdateUserApiRequest, UserResponse};

/// GET /api/users?_page=&_size=&_order=
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<UserResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let request = query.into_page_request(&state.pagination)?;

    debug!(
        page = request.page_number,
        page_size = request.page_size,
        order_by = request.order_by().unwrap_or_default(),
        "Listing users"
    );

    let page = state.user_service.list(&request).await?;

    Ok(Json(PaginatedResponse::from(
        page.map(|user| UserResponse::from(&user)),
    )))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(username = %request.username, "Creating user");

    let (profile, password) = request.into_parts();
    let user = state
        .user_service
        .create(CreateUserRequest { profile, password })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Getting user");

    let user = state
        .user_service
        .get(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", user_id)))?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Updating user");

    let (profile, password) = request.into_parts();
    let user = state
        .user_service
        .update(&user_id, UpdateUserRequest { profile, password })
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/users/{user_id}/activate
pub async fn activate_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Activating user");

    let user = state.user_service.activate(&user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/users/{user_id}/deactivate
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Deactivating user");

    let user = state.user_service.deactivate(&user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/users/{user_id}/suspend
pub async fn suspend_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Suspending user");

    let user = state.user_service.suspend(&user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}
