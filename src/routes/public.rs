use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines the unauthenticated endpoints. The login handler validates its own input and
/// never reveals whether the username or the password was wrong.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // POST /login
        // Single login form for every role; answers with identity and destination.
        .route("/login", post(handlers::login))
        // POST /roles/infer
        // Role suggestion from an email domain.
        .route("/roles/infer", post(handlers::infer_role))
}
