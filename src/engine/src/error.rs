use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    InvalidScore,
    InvalidTransition,
    NotReady,
    Conflict,
}

/// Every failure the league engine surfaces to its callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeagueError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    InvalidScore(String),
    #[error("{0}")]
    InvalidTransition(String),
    #[error("{0}")]
    NotReady(String),
    #[error("{0}")]
    Conflict(String),
}

impl LeagueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LeagueError::NotFound(_) => ErrorKind::NotFound,
            LeagueError::InvalidInput(_) => ErrorKind::InvalidInput,
            LeagueError::InvalidScore(_) => ErrorKind::InvalidScore,
            LeagueError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            LeagueError::NotReady(_) => ErrorKind::NotReady,
            LeagueError::Conflict(_) => ErrorKind::Conflict,
        }
    }

    pub fn team_not_found(team_id: u32) -> Self {
        LeagueError::NotFound(format!("team {} not found", team_id))
    }

    pub fn venue_not_found(venue_id: u32) -> Self {
        LeagueError::NotFound(format!("venue {} not found", venue_id))
    }

    pub fn match_not_found(match_id: u32) -> Self {
        LeagueError::NotFound(format!("match {} not found", match_id))
    }

    pub fn player_not_found(player_id: u32) -> Self {
        LeagueError::NotFound(format!("player {} not found", player_id))
    }
}

pub type EngineResult<T> = Result<T, LeagueError>;
