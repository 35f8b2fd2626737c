//! API route definitions

use super::auth_handlers;
use super::handlers::{self, ApiState};
use super::user_handlers;
use crate::auth::middleware::require_auth;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router.
///
/// Everything under /api plus /auth/me requires a Bearer token;
/// /health, /auth/register and /auth/login are public.
pub fn create_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/auth/me", get(auth_handlers::me))
        .route("/api/users", get(user_handlers::list_users))
        .route("/api/users/me/directory", get(user_handlers::directory))
        .route(
            "/api/users/{id}",
            get(user_handlers::get_user)
                .patch(user_handlers::rename_user)
                .delete(user_handlers::delete_user),
        )
        .route("/api/users/{id}/follow", post(user_handlers::follow_user))
        .route(
            "/api/users/{id}/unfollow",
            post(user_handlers::unfollow_user),
        )
        .layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
