//! Route definitions for `/user`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET   /             -> get_profile
/// PATCH /             -> update_profile
/// POST  /password     -> change_password
/// GET   /active-team  -> get_active_team
/// PUT   /active-team  -> set_active_team
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::get_profile).patch(user::update_profile))
        .route("/password", post(user::change_password))
        .route(
            "/active-team",
            get(user::get_active_team).put(user::set_active_team),
        )
}
