mod actions;

use crate::LeagueAppData;
use axum::Router;
use axum::routing::{get, post};

pub fn player_routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/api/players",
            get(actions::player_list_action).post(actions::player_create_action),
        )
        .route("/api/players/top-scorers", get(actions::player_top_scorers_action))
        .route("/api/players/age", post(actions::player_age_action))
        .route(
            "/api/players/{player_id}",
            get(actions::player_get_action)
                .put(actions::player_update_action)
                .delete(actions::player_delete_action),
        )
        .route("/api/players/{player_id}/goal", post(actions::player_goal_action))
        .route(
            "/api/players/{player_id}/transfer",
            post(actions::player_transfer_action),
        )
}
