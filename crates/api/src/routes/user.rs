//! Route definitions for the `/user/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user/auth`.
///
/// ```text
/// POST /register   -> register
/// POST /login      -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(user::register))
        .route("/login", post(user::login))
}
