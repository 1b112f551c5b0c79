pub mod auth;
pub mod health;
pub mod resources;
pub mod shoots;
pub mod teams;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh      public
/// /auth/logout                                     requires auth
///
/// /user                                            profile, password
/// /user/active-team                                resolve / switch active team
///
/// /teams                                           my teams, create
/// /teams/{id}                                      read, update, delete
/// /teams/{id}/members[/{user_id}]                  roster management
/// /team                                            active team with roster
///
/// /shoots                                          list, create (active team)
/// /shoots/board                                    kanban columns
/// /shoots/{id}                                     detail, update, delete
/// /shoots/{id}/status                              move card
/// /shoots/{id}/resources[/{kind}/{resource_id}]    resource links
/// /shoots/{id}/references[/{ref_id}]               reference images
/// /shoots/{id}/participants[/{pid}]                participants
/// /shoots/{id}/create-calendar-event               push to calendar
/// /shoots/{id}/create-doc                          planning document
///
/// /personnel, /equipment, /costumes, /props        team libraries
/// /locations                                       team library + place search
/// ```
///
/// Everything except `/auth/{register,login,refresh}` requires a token;
/// everything under `/team`, `/shoots`, and the libraries is scoped to the
/// caller's active team.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", user::router())
        .nest("/teams", teams::router())
        .nest("/team", teams::active_router())
        .nest("/shoots", shoots::router())
        .nest("/personnel", resources::personnel_router())
        .nest("/equipment", resources::equipment_router())
        .nest("/costumes", resources::costumes_router())
        .nest("/props", resources::props_router())
        .nest("/locations", resources::locations_router())
}
