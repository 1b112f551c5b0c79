//! Handlers for `/locations`.
//!
//! Besides CRUD, this module proxies the Maps place search so the browser
//! never sees the API key: `autocomplete` and `geocode` return provider
//! results as-is, and `from_place` turns a chosen suggestion into a saved
//! location.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shootboard_core::error::CoreError;
use shootboard_core::types::DbId;
use shootboard_db::models::location::{
    CreateLocation, CreateLocationFromPlace, Location, UpdateLocation,
};
use shootboard_db::models::ResourceListParams;
use shootboard_db::repositories::LocationRepo;
use shootboard_google::maps::{GeocodeResult, PlaceDetails, PlaceSuggestion};

use crate::error::{AppError, AppResult};
use crate::extract::NormalizedJson;
use crate::middleware::team::TeamContext;
use crate::query::{AutocompleteParams, GeocodeParams};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Location",
        id,
    })
}

/// POST /api/locations
pub async fn create(
    State(state): State<AppState>,
    ctx: TeamContext,
    NormalizedJson(input): NormalizedJson<CreateLocation>,
) -> AppResult<(StatusCode, Json<DataResponse<Location>>)> {
    let location = LocationRepo::create(&state.pool, ctx.team_id, &input).await?;
    tracing::info!(team_id = ctx.team_id, location_id = location.id, "Location created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: location })))
}

/// GET /api/locations
///
/// `?q=` matches the name or the address.
pub async fn list(
    State(state): State<AppState>,
    ctx: TeamContext,
    Query(params): Query<ResourceListParams>,
) -> AppResult<Json<DataResponse<Vec<Location>>>> {
    let locations = LocationRepo::list(&state.pool, ctx.team_id, &params).await?;
    Ok(Json(DataResponse { data: locations }))
}

/// GET /api/locations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Location>>> {
    let location = LocationRepo::find_by_id(&state.pool, ctx.team_id, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: location }))
}

/// PATCH /api/locations/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
    NormalizedJson(input): NormalizedJson<UpdateLocation>,
) -> AppResult<Json<DataResponse<Location>>> {
    let location = LocationRepo::update(&state.pool, ctx.team_id, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: location }))
}

/// DELETE /api/locations/{id}
///
/// Shoots that used it as their primary location keep their note but lose
/// the link.
pub async fn delete(
    State(state): State<AppState>,
    ctx: TeamContext,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LocationRepo::delete(&state.pool, ctx.team_id, id).await? {
        tracing::info!(team_id = ctx.team_id, location_id = id, "Location deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/locations/autocomplete?q=&session_token=
///
/// Fewer than three characters yields an empty list without calling out.
pub async fn autocomplete(
    State(state): State<AppState>,
    _ctx: TeamContext,
    Query(params): Query<AutocompleteParams>,
) -> AppResult<Json<DataResponse<Vec<PlaceSuggestion>>>> {
    let suggestions = state
        .maps
        .autocomplete(&params.q, params.session_token.as_deref())
        .await?;
    Ok(Json(DataResponse { data: suggestions }))
}

/// GET /api/locations/geocode?address=
pub async fn geocode(
    State(state): State<AppState>,
    _ctx: TeamContext,
    Query(params): Query<GeocodeParams>,
) -> AppResult<Json<DataResponse<GeocodeResult>>> {
    let address = params.address.trim();
    if address.is_empty() {
        return Err(AppError::field("address", "must not be blank"));
    }
    let result = state.maps.geocode(address).await?;
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/locations/from-place
///
/// Save the place as a team location. If the team already saved this place
/// the existing row is returned with 200 instead of creating a duplicate.
pub async fn from_place(
    State(state): State<AppState>,
    ctx: TeamContext,
    NormalizedJson(input): NormalizedJson<CreateLocationFromPlace>,
) -> AppResult<(StatusCode, Json<DataResponse<Location>>)> {
    let place_id = input.place_id.trim();
    if let Some(existing) = LocationRepo::find_by_place_id(&state.pool, ctx.team_id, place_id).await? {
        return Ok((StatusCode::OK, Json(DataResponse { data: existing })));
    }

    let details = state.maps.place_details(place_id).await?;
    let create = location_from_place(details, input.name, input.notes);
    let location = LocationRepo::create(&state.pool, ctx.team_id, &create).await?;

    tracing::info!(
        team_id = ctx.team_id,
        location_id = location.id,
        place_id,
        "Location created from place"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: location })))
}

/// Build the insert DTO from provider details. A non-blank `name` wins over
/// the provider's.
fn location_from_place(
    details: PlaceDetails,
    name: Option<String>,
    notes: Option<String>,
) -> CreateLocation {
    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or(details.name);
    CreateLocation {
        name,
        address: details.formatted_address,
        latitude: details.latitude,
        longitude: details.longitude,
        place_id: Some(details.place_id),
        notes,
        image_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> PlaceDetails {
        PlaceDetails {
            place_id: "ChIJ-garden".into(),
            name: "Botanic Garden".into(),
            formatted_address: Some("1 Garden Way".into()),
            latitude: Some(52.5),
            longitude: Some(13.4),
        }
    }

    #[test]
    fn provider_name_is_default() {
        let create = location_from_place(details(), None, None);
        assert_eq!(create.name, "Botanic Garden");
        assert_eq!(create.address.as_deref(), Some("1 Garden Way"));
        assert_eq!(create.place_id.as_deref(), Some("ChIJ-garden"));
        assert_eq!(create.latitude, Some(52.5));
    }

    #[test]
    fn blank_override_is_ignored() {
        let create = location_from_place(details(), Some("   ".into()), Some("gate B".into()));
        assert_eq!(create.name, "Botanic Garden");
        assert_eq!(create.notes.as_deref(), Some("gate B"));

        let create = location_from_place(details(), Some(" Rose arbor ".into()), None);
        assert_eq!(create.name, "Rose arbor");
    }
}
