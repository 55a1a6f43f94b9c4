use crate::LeagueAppData;
use crate::matches::match_routes;
use crate::players::player_routes;
use crate::standings::standing_routes;
use crate::teams::team_routes;
use crate::tournament::tournament_routes;
use crate::venues::venue_routes;
use crate::ApiError;
use axum::Router;
use axum::http::Uri;

async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::Engine(engine::LeagueError::NotFound(format!("no route for {}", uri.path())))
}

pub struct ServerRoutes;

impl ServerRoutes {
    pub fn create() -> Router<LeagueAppData> {
        Router::<LeagueAppData>::new()
            .merge(team_routes())
            .merge(venue_routes())
            .merge(player_routes())
            .merge(match_routes())
            .merge(standing_routes())
            .merge(tournament_routes())
            .fallback(not_found_handler)
    }
}
