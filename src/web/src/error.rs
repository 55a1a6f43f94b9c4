use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use engine::{ErrorKind, LeagueError};
use serde_json::json;

/// Error type for API handlers
#[derive(Debug)]
pub enum ApiError {
    Engine(LeagueError),
    BadRequest(String),
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Engine(err) => status_of(err.kind()),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> serde_json::Value {
        match self {
            ApiError::Engine(err) => json!(err.kind()),
            ApiError::BadRequest(_) => json!("BAD_REQUEST"),
            ApiError::InternalError(_) => json!("INTERNAL"),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Engine(err) => err.to_string(),
            ApiError::BadRequest(msg) | ApiError::InternalError(msg) => msg.clone(),
        }
    }

    /// The error body with extra fields merged in.
    pub fn body_with(&self, extra: serde_json::Value) -> serde_json::Value {
        let mut body = json!({
            "error": self.message(),
            "kind": self.kind(),
        });

        if let (Some(target), serde_json::Value::Object(fields)) = (body.as_object_mut(), extra) {
            target.extend(fields);
        }

        body
    }
}

pub fn status_of(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidInput | ErrorKind::InvalidScore => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidTransition | ErrorKind::Conflict => StatusCode::CONFLICT,
        // 425 Too Early
        ErrorKind::NotReady => StatusCode::from_u16(425).unwrap_or(StatusCode::CONFLICT),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(self.body_with(json!({})));

        (self.status(), body).into_response()
    }
}

impl From<LeagueError> for ApiError {
    fn from(err: LeagueError) -> Self {
        ApiError::Engine(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::InternalError(format!("background task failed: {}", err))
    }
}

/// Helper type for handler results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_to_status() {
        assert_eq!(status_of(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ErrorKind::InvalidScore), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(status_of(ErrorKind::NotReady).as_u16(), 425);
    }

    #[test]
    fn test_body_carries_kind() {
        let err = ApiError::from(LeagueError::InvalidTransition(String::from("match 3 is finished")));

        let body = err.body_with(json!({ "match_id": 3 }));

        assert_eq!(body["kind"], "INVALID_TRANSITION");
        assert_eq!(body["error"], "match 3 is finished");
        assert_eq!(body["match_id"], 3);
    }
}
