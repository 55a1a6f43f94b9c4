mod actions;

use crate::LeagueAppData;
use axum::Router;
use axum::routing::get;

pub fn team_routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/api/teams",
            get(actions::team_list_action).post(actions::team_create_action),
        )
        .route(
            "/api/teams/{team_id}",
            get(actions::team_get_action)
                .put(actions::team_update_action)
                .delete(actions::team_delete_action),
        )
        .route(
            "/api/teams/{team_id}/statistics",
            get(actions::team_statistics_action),
        )
}
