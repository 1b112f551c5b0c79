//! Route definitions for `/shoots`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{shoot_export, shoot_items, shoots};
use crate::state::AppState;

/// Routes mounted at `/shoots`.
///
/// ```text
/// GET    /                                         -> list
/// POST   /                                         -> create
/// GET    /board                                    -> board
/// GET    /{id}                                     -> get_by_id
/// PATCH  /{id}                                     -> update
/// DELETE /{id}                                     -> delete
/// PATCH  /{id}/status                              -> move_card
/// PATCH  /{id}/resources                           -> replace_resources
/// POST   /{id}/resources/{kind}/{resource_id}      -> attach_resource
/// DELETE /{id}/resources/{kind}/{resource_id}      -> detach_resource
/// GET    /{id}/references                          -> list_references
/// POST   /{id}/references                          -> create_reference
/// PATCH  /{id}/references/{ref_id}                 -> update_reference
/// DELETE /{id}/references/{ref_id}                 -> delete_reference
/// GET    /{id}/participants                        -> list_participants
/// POST   /{id}/participants                        -> create_participant
/// PATCH  /{id}/participants/{pid}                  -> update_participant
/// DELETE /{id}/participants/{pid}                  -> delete_participant
/// POST   /{id}/create-calendar-event               -> create_calendar_event
/// POST   /{id}/create-doc                          -> create_doc
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shoots::list).post(shoots::create))
        .route("/board", get(shoots::board))
        .route(
            "/{id}",
            get(shoots::get_by_id)
                .patch(shoots::update)
                .delete(shoots::delete),
        )
        .route("/{id}/status", patch(shoots::move_card))
        .route("/{id}/resources", patch(shoots::replace_resources))
        .route(
            "/{id}/resources/{kind}/{resource_id}",
            post(shoots::attach_resource).delete(shoots::detach_resource),
        )
        .route(
            "/{id}/references",
            get(shoot_items::list_references).post(shoot_items::create_reference),
        )
        .route(
            "/{id}/references/{ref_id}",
            patch(shoot_items::update_reference).delete(shoot_items::delete_reference),
        )
        .route(
            "/{id}/participants",
            get(shoot_items::list_participants).post(shoot_items::create_participant),
        )
        .route(
            "/{id}/participants/{pid}",
            patch(shoot_items::update_participant).delete(shoot_items::delete_participant),
        )
        .route(
            "/{id}/create-calendar-event",
            post(shoot_export::create_calendar_event),
        )
        .route("/{id}/create-doc", post(shoot_export::create_doc))
}
