//! Route definitions for the team resource libraries.
//!
//! Each library has the same shape:
//!
//! ```text
//! GET    /      -> list (?q=&limit=&offset=)
//! POST   /      -> create
//! GET    /{id}  -> get_by_id
//! PATCH  /{id}  -> update
//! DELETE /{id}  -> delete
//! ```
//!
//! Locations additionally proxy place search.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{costumes, equipment, locations, personnel, props};
use crate::state::AppState;

/// Routes mounted at `/personnel`.
pub fn personnel_router() -> Router<AppState> {
    Router::new()
        .route("/", get(personnel::list).post(personnel::create))
        .route(
            "/{id}",
            get(personnel::get_by_id)
                .patch(personnel::update)
                .delete(personnel::delete),
        )
}

/// Routes mounted at `/equipment`.
pub fn equipment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(equipment::list).post(equipment::create))
        .route(
            "/{id}",
            get(equipment::get_by_id)
                .patch(equipment::update)
                .delete(equipment::delete),
        )
}

/// Routes mounted at `/costumes`.
pub fn costumes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(costumes::list).post(costumes::create))
        .route(
            "/{id}",
            get(costumes::get_by_id)
                .patch(costumes::update)
                .delete(costumes::delete),
        )
}

/// Routes mounted at `/props`.
pub fn props_router() -> Router<AppState> {
    Router::new()
        .route("/", get(props::list).post(props::create))
        .route(
            "/{id}",
            get(props::get_by_id)
                .patch(props::update)
                .delete(props::delete),
        )
}

/// Routes mounted at `/locations`.
///
/// ```text
/// GET  /autocomplete?q=&session_token=  -> autocomplete
/// GET  /geocode?address=                -> geocode
/// POST /from-place                      -> from_place
/// ```
pub fn locations_router() -> Router<AppState> {
    Router::new()
        .route("/", get(locations::list).post(locations::create))
        .route("/autocomplete", get(locations::autocomplete))
        .route("/geocode", get(locations::geocode))
        .route("/from-place", post(locations::from_place))
        .route(
            "/{id}",
            get(locations::get_by_id)
                .patch(locations::update)
                .delete(locations::delete),
        )
}
