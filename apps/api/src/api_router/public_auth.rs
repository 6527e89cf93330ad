use axum::Router;
use axum::routing::post;

use crate::auth;
use crate::state::AppState;

/// Session and password reset routes reachable without a session. The reset
/// route is throttled inside the password reset service.
pub(super) fn build_public_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/session", post(auth::open_session_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/forgot-password", post(auth::forgot_password_handler))
}
