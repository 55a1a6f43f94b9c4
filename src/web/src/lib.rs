mod error;
mod matches;
mod players;
mod routes;
mod standings;
mod teams;
mod tournament;
mod venues;

pub use error::{ApiError, ApiResult};

use crate::routes::ServerRoutes;
use axum::Router;
use axum::response::IntoResponse;
use engine::Tournament;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

pub const DEFAULT_PORT: u16 = 18000;

pub struct LeagueServer {
    data: LeagueAppData,
}

impl LeagueServer {
    pub fn new(data: LeagueAppData) -> Self {
        LeagueServer { data }
    }

    pub fn router(&self) -> Router {
        ServerRoutes::create()
            .layer(
                ServiceBuilder::new()
                    // Catch panics in handlers and convert them to 500 errors
                    .layer(CatchPanicLayer::custom(|_err| {
                        ApiError::InternalError("handler panicked".to_string()).into_response()
                    })),
            )
            .with_state(self.data.clone())
    }

    pub async fn run(&self, port: u16) -> std::io::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let listener = TcpListener::bind(addr).await?;

        info!("listen at: http://localhost:{}", port);

        axum::serve(listener, self.router()).await
    }
}

pub struct LeagueAppData {
    pub tournament: Arc<Tournament>,
}

impl Clone for LeagueAppData {
    fn clone(&self) -> Self {
        LeagueAppData {
            tournament: Arc::clone(&self.tournament),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use engine::clock::FixedClock;
    use engine::store::Repositories;
    use chrono::{NaiveDate, NaiveDateTime};
    use tower::ServiceExt;

    pub fn kickoff() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 10)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap()
    }

    pub fn app() -> Router {
        let tournament = Tournament::new(
            Repositories::in_memory(),
            Arc::new(FixedClock::new(kickoff())),
        );

        LeagueServer::new(LeagueAppData {
            tournament: Arc::new(tournament),
        })
        .router()
    }

    pub async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn create_team(app: &Router, name: &str) -> u32 {
        let (status, body) = call(
            app,
            Method::POST,
            "/api/teams",
            Some(serde_json::json!({ "name": name, "city": "Leeds" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_u64().unwrap() as u32
    }
}
