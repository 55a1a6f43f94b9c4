mod actions;

use crate::LeagueAppData;
use axum::Router;
use axum::routing::{get, post, put};

pub fn standing_routes() -> Router<LeagueAppData> {
    Router::new()
        .route("/api/standings", get(actions::standing_list_action))
        .route(
            "/api/standings/position/{team_id}",
            get(actions::standing_position_action),
        )
        .route(
            "/api/standings/statistics",
            get(actions::standing_statistics_action),
        )
        .route("/api/standings/reset", post(actions::standing_reset_action))
        .route("/api/standings/{standing_id}", put(actions::standing_update_action))
}
