use crate::{ApiError, ApiResult, LeagueAppData};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RoundRequest {
    pub team_ids: Vec<u32>,
    pub round_start: NaiveDateTime,
    #[serde(default)]
    pub venue_id: Option<u32>,
}

/// 201 with the created matches when every pair was scheduled. Otherwise the
/// status of the first failure, with the matches created before it.
pub async fn round_generate_action(
    State(state): State<LeagueAppData>,
    payload: Result<Json<RoundRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload?;
    let tournament = Arc::clone(&state.tournament);

    let schedule = tokio::task::spawn_blocking(move || {
        tournament.generate_round_schedule(&request.team_ids, request.round_start, request.venue_id)
    })
    .await??;

    if schedule.is_complete() {
        return Ok((StatusCode::CREATED, Json(schedule)).into_response());
    }

    let partial = json!({
        "matches": schedule.matches,
        "requested_pairs": schedule.requested_pairs,
    });

    let error = match schedule.failure {
        Some(err) => ApiError::from(err),
        None => ApiError::InternalError(String::from("round stopped without a reason")),
    };

    Ok((error.status(), Json(error.body_with(partial))).into_response())
}
