use crate::{ApiResult, LeagueAppData};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use engine::club::{NewPlayer, Player, PlayerPosition, PlayerUpdate};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct PlayerListQuery {
    pub team_id: Option<u32>,
    pub position: Option<PlayerPosition>,
}

#[derive(Deserialize)]
pub struct TopScorersQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct AgeResponse {
    pub aged: usize,
}

#[derive(Deserialize)]
pub struct TransferRequest {
    pub team_id: u32,
    pub jersey_number: Option<u8>,
}

pub async fn player_list_action(
    State(state): State<LeagueAppData>,
    query: Result<Query<PlayerListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Player>>> {
    let Query(query) = query?;
    let clubs = state.tournament.clubs();

    let players = match (query.team_id, query.position) {
        (Some(team_id), Some(position)) => clubs
            .players_of_team(team_id)
            .into_iter()
            .filter(|p| p.position == Some(position))
            .collect(),
        (Some(team_id), None) => clubs.players_of_team(team_id),
        (None, Some(position)) => clubs.players_by_position(position),
        (None, None) => clubs.list_players(),
    };

    Ok(Json(players))
}

pub async fn player_top_scorers_action(
    State(state): State<LeagueAppData>,
    query: Result<Query<TopScorersQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Player>>> {
    let Query(query) = query?;

    Ok(Json(state.tournament.clubs().top_scorers(query.limit)))
}

pub async fn player_get_action(
    State(state): State<LeagueAppData>,
    Path(player_id): Path<u32>,
) -> ApiResult<Json<Player>> {
    Ok(Json(state.tournament.clubs().get_player(player_id)?))
}

pub async fn player_create_action(
    State(state): State<LeagueAppData>,
    payload: Result<Json<NewPlayer>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Player>)> {
    let Json(new_player) = payload?;

    let player = state.tournament.clubs().create_player(&new_player)?;

    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn player_update_action(
    State(state): State<LeagueAppData>,
    Path(player_id): Path<u32>,
    payload: Result<Json<PlayerUpdate>, JsonRejection>,
) -> ApiResult<Json<Player>> {
    let Json(update) = payload?;

    Ok(Json(state.tournament.clubs().update_player(player_id, &update)?))
}

pub async fn player_delete_action(
    State(state): State<LeagueAppData>,
    Path(player_id): Path<u32>,
) -> ApiResult<StatusCode> {
    state.tournament.clubs().delete_player(player_id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn player_goal_action(
    State(state): State<LeagueAppData>,
    Path(player_id): Path<u32>,
) -> ApiResult<Json<Player>> {
    Ok(Json(state.tournament.clubs().score_goal(player_id)?))
}

pub async fn player_age_action(
    State(state): State<LeagueAppData>,
) -> ApiResult<Json<AgeResponse>> {
    let tournament = Arc::clone(&state.tournament);

    let aged = tokio::task::spawn_blocking(move || tournament.clubs().increment_all_player_ages())
        .await?;

    info!("player ages bumped over http");

    Ok(Json(AgeResponse { aged }))
}

pub async fn player_transfer_action(
    State(state): State<LeagueAppData>,
    Path(player_id): Path<u32>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> ApiResult<Json<Player>> {
    let Json(transfer) = payload?;

    let player = state.tournament.clubs().transfer_player(
        player_id,
        transfer.team_id,
        transfer.jersey_number,
    )?;

    Ok(Json(player))
}
