mod actions;

use crate::LeagueAppData;
use axum::Router;
use axum::routing::{get, post};

pub fn match_routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/api/matches",
            get(actions::match_list_action).post(actions::match_create_action),
        )
        .route(
            "/api/matches/{match_id}",
            get(actions::match_get_action)
                .put(actions::match_update_action)
                .delete(actions::match_delete_action),
        )
        .route("/api/matches/{match_id}/start", post(actions::match_start_action))
        .route(
            "/api/matches/{match_id}/complete",
            post(actions::match_complete_action),
        )
        .route("/api/matches/{match_id}/cancel", post(actions::match_cancel_action))
        .route(
            "/api/matches/{match_id}/man-of-the-match/{player_id}",
            post(actions::match_man_of_the_match_action),
        )
}
