//! Route definitions for `/teams` and `/team`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id (member)
/// PATCH  /{id}                      -> update (owner/admin)
/// DELETE /{id}                      -> delete (owner)
/// GET    /{id}/members              -> list_members
/// POST   /{id}/members              -> add_member (owner/admin)
/// PATCH  /{id}/members/{user_id}    -> update_member
/// DELETE /{id}/members/{user_id}    -> remove_member (or leave)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teams::list).post(teams::create))
        .route(
            "/{id}",
            get(teams::get_by_id)
                .patch(teams::update)
                .delete(teams::delete),
        )
        .route(
            "/{id}/members",
            get(teams::list_members).post(teams::add_member),
        )
        .route(
            "/{id}/members/{user_id}",
            patch(teams::update_member).delete(teams::remove_member),
        )
}

/// Routes mounted at `/team` (the active team).
///
/// ```text
/// GET   /  -> active
/// PATCH /  -> update_active (owner/admin)
/// ```
pub fn active_router() -> Router<AppState> {
    Router::new().route("/", get(teams::active).patch(teams::update_active))
}
