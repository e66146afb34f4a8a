// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/signup", post(crate::handlers::signup::signup_handler))
        .route("/login", post(crate::handlers::login::login_handler))
        .route("/health", get(crate::handlers::health::health_handler))

        // Bearer token required
        .route("/user", get(crate::handlers::user::user_handler))
        .route("/borrow", post(crate::handlers::borrow::borrow_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
