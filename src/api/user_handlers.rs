//! User and follow route handlers.
//!
//! All routes here sit behind the auth middleware; the acting user
//! comes from the token, never from the request body.

use crate::api::auth_handlers::UserResponse;
use crate::api::handlers::{ApiState, AppError};
use crate::auth::extractor::AuthUser;
use crate::graph::FollowPartition;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for PATCH /api/users/{id}
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

/// Response for GET /api/users/me/directory
#[derive(Debug, Serialize)]
pub struct DirectoryResponse {
    pub following: Vec<UserResponse>,
    pub others: Vec<UserResponse>,
}

impl From<FollowPartition> for DirectoryResponse {
    fn from(p: FollowPartition) -> Self {
        Self {
            following: p.following.into_iter().map(UserResponse::from).collect(),
            others: p.others.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// GET /api/users — every registered user.
pub async fn list_users(
    State(state): State<ApiState>,
    _auth: AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<ApiState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found: {}", id)))?;

    Ok(Json(UserResponse::from(user)))
}

/// PATCH /api/users/{id} — rename. Users may only rename themselves.
pub async fn rename_user(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<StatusCode, AppError> {
    if id != auth.user_id {
        return Err(AppError::Forbidden(
            "Cannot modify another user's profile".to_string(),
        ));
    }

    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    if state.store.get_user(id).await?.is_none() {
        return Err(AppError::NotFound(format!("User not found: {}", id)));
    }

    state.store.rename_user(id, name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/users/{id} — remove the account and every FOLLOWS edge
/// touching it, both directions. Users may only delete themselves.
pub async fn delete_user(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if id != auth.user_id {
        return Err(AppError::Forbidden(
            "Cannot delete another user's account".to_string(),
        ));
    }

    if state.store.get_user(id).await?.is_none() {
        return Err(AppError::NotFound(format!("User not found: {}", id)));
    }

    state.store.delete_user(id).await?;
    tracing::info!(user_id = %id, "deleted user");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/users/{id}/follow — the caller starts following `id`.
pub async fn follow_user(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if id == auth.user_id {
        return Err(AppError::BadRequest(
            "Cannot follow yourself".to_string(),
        ));
    }

    if state.store.get_user(id).await?.is_none() {
        return Err(AppError::NotFound(format!("User not found: {}", id)));
    }

    state.store.follow(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/users/{id}/unfollow — stop following `id`.
///
/// A no-op (still 204) when no such edge exists.
pub async fn unfollow_user(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.get_user(id).await?.is_none() {
        return Err(AppError::NotFound(format!("User not found: {}", id)));
    }

    state.store.unfollow(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/me/directory — all other users partitioned into
/// followed / not-followed, caller excluded from both lists.
pub async fn directory(
    State(state): State<ApiState>,
    auth: AuthUser,
) -> Result<Json<DirectoryResponse>, AppError> {
    let partition = state.store.following_and_others(auth.user_id).await?;
    Ok(Json(DirectoryResponse::from(partition)))
}
