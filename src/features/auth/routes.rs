use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use crate::features::users::services::UserService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>, users: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .with_state(service)
        .merge(
            Router::new()
                .route("/api/auth/register", post(handlers::register))
                .with_state(users),
        )
}

/// Protected auth routes (require JWT authentication)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::get_me))
        .with_state(service)
}
