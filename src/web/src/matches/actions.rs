use crate::{ApiResult, LeagueAppData};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use engine::club::Player;
use engine::r#match::{Match, MatchStatus, MatchUpdate, NewMatch};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct MatchListQuery {
    pub team_id: Option<u32>,
    pub status: Option<MatchStatus>,
}

/// Scores arrive as plain integers so that negative values reach the
/// engine and come back as `INVALID_SCORE` instead of a parse error.
#[derive(Deserialize)]
pub struct CompleteMatchRequest {
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
}

pub async fn match_list_action(
    State(state): State<LeagueAppData>,
    query: Result<Query<MatchListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Match>>> {
    let Query(query) = query?;
    let matches = state.tournament.matches();

    let mut result = match query.team_id {
        Some(team_id) => matches.of_team(team_id),
        None => matches.list(),
    };

    if let Some(status) = query.status {
        result.retain(|m| m.status == status);
    }

    Ok(Json(result))
}

pub async fn match_get_action(
    State(state): State<LeagueAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<Json<Match>> {
    Ok(Json(state.tournament.matches().get(match_id)?))
}

pub async fn match_create_action(
    State(state): State<LeagueAppData>,
    payload: Result<Json<NewMatch>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Match>)> {
    let Json(new_match) = payload?;

    let created = state.tournament.create_match(&new_match)?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn match_update_action(
    State(state): State<LeagueAppData>,
    Path(match_id): Path<u32>,
    payload: Result<Json<MatchUpdate>, JsonRejection>,
) -> ApiResult<Json<Match>> {
    let Json(update) = payload?;

    Ok(Json(state.tournament.update_match(match_id, &update)?))
}

pub async fn match_delete_action(
    State(state): State<LeagueAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<StatusCode> {
    state.tournament.delete_match(match_id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn match_start_action(
    State(state): State<LeagueAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<Json<Match>> {
    Ok(Json(state.tournament.start_match(match_id)?))
}

pub async fn match_complete_action(
    State(state): State<LeagueAppData>,
    Path(match_id): Path<u32>,
    payload: Result<Json<CompleteMatchRequest>, JsonRejection>,
) -> ApiResult<Json<Match>> {
    let Json(score) = payload?;

    let finished = state
        .tournament
        .complete_match(match_id, score.home_score, score.away_score)?;

    Ok(Json(finished))
}

pub async fn match_cancel_action(
    State(state): State<LeagueAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<Json<Match>> {
    Ok(Json(state.tournament.cancel_match(match_id)?))
}

pub async fn match_man_of_the_match_action(
    State(state): State<LeagueAppData>,
    Path((match_id, player_id)): Path<(u32, u32)>,
) -> ApiResult<Json<Player>> {
    let player = state
        .tournament
        .clubs()
        .assign_man_of_the_match(match_id, player_id)?;

    Ok(Json(player))
}
