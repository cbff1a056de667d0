use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::database::models::trip::{NewTrip, Trip, TripUpdate};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

/// POST /trips/ - create a trip owned by the authenticated caller.
///
/// Returns the full stored document, identifier included, as the top-level
/// body (no envelope) to match the original wire contract.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<NewTrip>,
) -> Result<Json<Trip>, ApiError> {
    let trip = state.trips.create(payload, &user.username).await?;
    Ok(Json(trip))
}

/// GET /trips/ - list the caller's trips.
///
/// The id-less path deliberately resolves to an ownership-scoped listing
/// rather than a 404.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Trip>>, ApiError> {
    let trips = state.trips.list(&user.username).await?;
    Ok(Json(trips))
}

/// GET /trips/:id - exact-id lookup; 404 carries the `{"data": []}` body.
pub async fn get(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Trip>, ApiError> {
    let id = parse_id(&id)?;
    let trip = state.trips.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(trip))
}

/// PUT /trips/:id - field-level merge; absent fields keep their prior value.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(changes): Json<TripUpdate>,
) -> Result<Json<Trip>, ApiError> {
    let id = parse_id(&id)?;
    let trip = state
        .trips
        .update(id, changes)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(trip))
}

/// DELETE /trips/:id - returns the removed document; 404 when the id
/// matched nothing.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Trip>, ApiError> {
    let id = parse_id(&id)?;
    let trip = state.trips.delete(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(trip))
}

// An identifier that does not parse can match no document
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}
