use crate::{ApiResult, LeagueAppData};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use engine::league::{LeagueStatistics, Standing, StandingUpdate};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct StandingListQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct PositionResponse {
    pub team_id: u32,
    pub position: u32,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub reset: usize,
}

pub async fn standing_list_action(
    State(state): State<LeagueAppData>,
    query: Result<Query<StandingListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Standing>>> {
    let Query(query) = query?;

    Ok(Json(state.tournament.ledger().top_standings(query.limit)))
}

pub async fn standing_position_action(
    State(state): State<LeagueAppData>,
    Path(team_id): Path<u32>,
) -> ApiResult<Json<PositionResponse>> {
    let position = state.tournament.position_of(team_id)?;

    Ok(Json(PositionResponse { team_id, position }))
}

pub async fn standing_update_action(
    State(state): State<LeagueAppData>,
    Path(standing_id): Path<u32>,
    payload: Result<Json<StandingUpdate>, JsonRejection>,
) -> ApiResult<Json<Standing>> {
    let Json(update) = payload?;

    let standing = state
        .tournament
        .ledger()
        .update_standing(standing_id, &update)?;

    Ok(Json(standing))
}

pub async fn standing_statistics_action(
    State(state): State<LeagueAppData>,
) -> Json<LeagueStatistics> {
    Json(state.tournament.league_statistics())
}

pub async fn standing_reset_action(
    State(state): State<LeagueAppData>,
) -> ApiResult<Json<ResetResponse>> {
    let tournament = Arc::clone(&state.tournament);

    let reset = tokio::task::spawn_blocking(move || tournament.reset_season()).await?;

    info!("season reset requested over http");

    Ok(Json(ResetResponse { reset }))
}

#[cfg(test)]
mod tests {
    use crate::testing::{app, call, create_team};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_manual_edit_reranks() {
        let app = app();
        create_team(&app, "Leeds Rovers").await;
        let second = create_team(&app, "York Town").await;
        let (_, table) = call(&app, Method::GET, "/api/standings", None).await;
        let standing_id = table[1]["id"].as_u64().unwrap();

        let (status, edited) = call(
            &app,
            Method::PUT,
            &format!("/api/standings/{}", standing_id),
            Some(json!({ "points": 4, "goals_for": 3, "goals_against": 1 })),
        )
        .await;
        let (_, position) = call(
            &app,
            Method::GET,
            &format!("/api/standings/position/{}", second),
            None,
        )
        .await;
        let (_, team) = call(&app, Method::GET, &format!("/api/teams/{}", second), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(edited["goal_difference"], 2);
        assert_eq!(position["position"], 1);
        assert_eq!(team["points"], 4);
    }

    #[tokio::test]
    async fn test_reset_and_statistics() {
        let app = app();
        create_team(&app, "Leeds Rovers").await;
        create_team(&app, "York Town").await;

        let (status, body) = call(&app, Method::POST, "/api/standings/reset", None).await;
        let (_, stats) = call(&app, Method::GET, "/api/standings/statistics", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reset"], 2);
        assert_eq!(stats["total_teams"], 2);
        assert_eq!(stats["total_matches"], 0);
    }

    #[tokio::test]
    async fn test_position_of_unknown_team() {
        let app = app();

        let (status, _) = call(&app, Method::GET, "/api/standings/position/9", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
