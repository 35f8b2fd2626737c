//! Authentication route handlers — registration, login, user info.
//!
//! Endpoints:
//! - `POST /auth/register` — Create an account, returns JWT + user
//! - `POST /auth/login`    — Email/password login, returns JWT + user
//! - `GET  /auth/me`       — Returns the authenticated user (protected)

use crate::api::handlers::{ApiState, AppError};
use crate::auth::extractor::AuthUser;
use crate::auth::jwt::encode_jwt;
use crate::auth::password::{hash_password, verify_password};
use crate::graph::{NewUser, User};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Request / Response types
// ============================================================================

/// Request body for POST /auth/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for POST /auth/register
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Response carrying a fresh token + the user it identifies
#[derive(Serialize)]
pub struct AuthTokenResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Public user info (safe to send to clients — no password hash)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register — Create a new account.
///
/// Only available when `allow_registration` is true in auth config.
/// Hashes the password, creates the `:User` node, and returns
/// JWT + user info (auto-login after registration).
pub async fn register(
    State(state): State<ApiState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthTokenResponse>, AppError> {
    let auth_config = state
        .auth_config
        .as_ref()
        .ok_or_else(|| AppError::Forbidden("Authentication not configured".to_string()))?;

    if !auth_config.allow_registration {
        return Err(AppError::Forbidden("Registration is disabled".to_string()));
    }

    let email = validate_registration(&req)?;

    // Email uniqueness, checked before the write (the store re-checks)
    if state.store.get_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password).map_err(AppError::Internal)?;

    let user = state
        .store
        .create_user(&NewUser {
            name: req.name.trim().to_string(),
            email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "registered new user");

    let token = encode_jwt(
        user.id,
        &user.email,
        &user.name,
        &auth_config.jwt_secret,
        auth_config.jwt_expiry_secs,
    )
    .map_err(AppError::Internal)?;

    Ok(Json(AuthTokenResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// POST /auth/login — Email/password authentication.
///
/// Security: error messages never reveal whether the email exists.
pub async fn login(
    State(state): State<ApiState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthTokenResponse>, AppError> {
    let auth_config = state
        .auth_config
        .as_ref()
        .ok_or_else(|| AppError::Forbidden("Authentication not configured".to_string()))?;

    // Generic error to prevent user enumeration
    let invalid_credentials = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .store
        .get_user_by_email(req.email.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(invalid_credentials());
    }

    let token = encode_jwt(
        user.id,
        &user.email,
        &user.name,
        &auth_config.jwt_secret,
        auth_config.jwt_expiry_secs,
    )
    .map_err(AppError::Internal)?;

    Ok(Json(AuthTokenResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// GET /auth/me — Returns the authenticated user's current record.
pub async fn me(
    State(state): State<ApiState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .store
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User no longer exists".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

/// Validate registration fields; returns the normalized email.
fn validate_registration(req: &RegisterRequest) -> Result<String, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let email = req.email.trim().to_lowercase();
    if !email.contains('@') || !email.split('@').nth(1).is_some_and(|d| d.contains('.')) {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }

    if req.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    Ok(email)
}
