use crate::{ApiResult, LeagueAppData};
use axum::Json;
use axum::extract::State;
use engine::tournament::SeasonSummary;
use log::info;
use std::sync::Arc;

/// Opens the next season. Pending fixtures go, finished ones stay as history.
pub async fn season_initialize_action(
    State(state): State<LeagueAppData>,
) -> ApiResult<Json<SeasonSummary>> {
    let tournament = Arc::clone(&state.tournament);

    let summary = tokio::task::spawn_blocking(move || tournament.initialize_season()).await?;

    info!("new season requested over http");

    Ok(Json(summary))
}
