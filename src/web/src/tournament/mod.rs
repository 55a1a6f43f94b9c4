mod rounds;
mod season;

use crate::LeagueAppData;
use axum::Router;
use axum::routing::post;

pub fn tournament_routes() -> Router<LeagueAppData> {
    Router::new()
        .route("/api/tournament/rounds", post(rounds::round_generate_action))
        .route("/api/tournament/season", post(season::season_initialize_action))
}
