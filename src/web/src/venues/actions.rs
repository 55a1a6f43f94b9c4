use crate::{ApiResult, LeagueAppData};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use engine::club::{NewVenue, Venue, VenueUpdate};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AvailableVenuesQuery {
    pub date: NaiveDate,
}

pub async fn venue_list_action(State(state): State<LeagueAppData>) -> Json<Vec<Venue>> {
    Json(state.tournament.clubs().list_venues())
}

pub async fn venue_get_action(
    State(state): State<LeagueAppData>,
    Path(venue_id): Path<u32>,
) -> ApiResult<Json<Venue>> {
    Ok(Json(state.tournament.clubs().get_venue(venue_id)?))
}

pub async fn venue_create_action(
    State(state): State<LeagueAppData>,
    payload: Result<Json<NewVenue>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Venue>)> {
    let Json(new_venue) = payload?;

    let venue = state.tournament.clubs().create_venue(&new_venue)?;

    Ok((StatusCode::CREATED, Json(venue)))
}

pub async fn venue_update_action(
    State(state): State<LeagueAppData>,
    Path(venue_id): Path<u32>,
    payload: Result<Json<VenueUpdate>, JsonRejection>,
) -> ApiResult<Json<Venue>> {
    let Json(update) = payload?;

    Ok(Json(state.tournament.clubs().update_venue(venue_id, &update)?))
}

pub async fn venue_delete_action(
    State(state): State<LeagueAppData>,
    Path(venue_id): Path<u32>,
) -> ApiResult<StatusCode> {
    state.tournament.clubs().delete_venue(venue_id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn venue_available_action(
    State(state): State<LeagueAppData>,
    query: Result<Query<AvailableVenuesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Venue>>> {
    let Query(query) = query?;

    Ok(Json(state.tournament.available_venues(query.date)))
}
