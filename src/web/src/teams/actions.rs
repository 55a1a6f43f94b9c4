use crate::{ApiResult, LeagueAppData};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use engine::club::{NewTeam, Team, TeamUpdate};
use engine::league::TeamStatistics;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct TeamListQuery {
    pub city: Option<String>,
    pub name: Option<String>,
}

pub async fn team_list_action(
    State(state): State<LeagueAppData>,
    query: Result<Query<TeamListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Team>>> {
    let Query(query) = query?;
    let clubs = state.tournament.clubs();

    let teams = match (query.name, query.city) {
        (Some(name), _) => clubs.find_team_by_name(&name).into_iter().collect(),
        (None, Some(city)) => clubs.teams_in_city(&city),
        (None, None) => clubs.list_teams(),
    };

    Ok(Json(teams))
}

pub async fn team_get_action(
    State(state): State<LeagueAppData>,
    Path(team_id): Path<u32>,
) -> ApiResult<Json<Team>> {
    Ok(Json(state.tournament.clubs().get_team(team_id)?))
}

pub async fn team_create_action(
    State(state): State<LeagueAppData>,
    payload: Result<Json<NewTeam>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    let Json(new_team) = payload?;

    let team = state.tournament.clubs().create_team(&new_team)?;

    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn team_update_action(
    State(state): State<LeagueAppData>,
    Path(team_id): Path<u32>,
    payload: Result<Json<TeamUpdate>, JsonRejection>,
) -> ApiResult<Json<Team>> {
    let Json(update) = payload?;

    Ok(Json(state.tournament.clubs().update_team(team_id, &update)?))
}

pub async fn team_delete_action(
    State(state): State<LeagueAppData>,
    Path(team_id): Path<u32>,
) -> ApiResult<StatusCode> {
    state.tournament.clubs().delete_team(team_id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn team_statistics_action(
    State(state): State<LeagueAppData>,
    Path(team_id): Path<u32>,
) -> ApiResult<Json<TeamStatistics>> {
    Ok(Json(state.tournament.team_statistics(team_id)?))
}

#[cfg(test)]
mod tests {
    use crate::testing::{app, call, create_team};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_get_team() {
        let app = app();
        let id = create_team(&app, "Leeds Rovers").await;

        let (status, body) = call(&app, Method::GET, &format!("/api/teams/{}", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Leeds Rovers");
        assert_eq!(body["points"], 0);
    }

    #[tokio::test]
    async fn test_duplicate_team_is_conflict() {
        let app = app();
        create_team(&app, "Leeds Rovers").await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/teams",
            Some(json!({ "name": "Leeds Rovers", "city": "Leeds" })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["kind"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app();

        let (status, body) = call(&app, Method::POST, "/api/teams", Some(json!({ "name": 5 }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_unknown_team_statistics() {
        let app = app();

        let (status, _) = call(&app, Method::GET, "/api/teams/42/statistics", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_team() {
        let app = app();
        let id = create_team(&app, "Leeds Rovers").await;

        let (deleted, _) = call(&app, Method::DELETE, &format!("/api/teams/{}", id), None).await;
        let (table, body) = call(&app, Method::GET, "/api/standings", None).await;

        assert_eq!(deleted, StatusCode::NO_CONTENT);
        assert_eq!(table, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
