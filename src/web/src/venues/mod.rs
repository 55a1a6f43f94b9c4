mod actions;

use crate::LeagueAppData;
use axum::Router;
use axum::routing::get;

pub fn venue_routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/api/venues",
            get(actions::venue_list_action).post(actions::venue_create_action),
        )
        .route("/api/venues/available", get(actions::venue_available_action))
        .route(
            "/api/venues/{venue_id}",
            get(actions::venue_get_action)
                .put(actions::venue_update_action)
                .delete(actions::venue_delete_action),
        )
}
