use engine::club::PlayerPosition;
use serde::Deserialize;

const STATIC_PLAYERS_JSON: &str = include_str!("../../data/players.json");

/// A squad member; `team` refers to a team by name since ids are only
/// assigned when the team is created.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerEntity {
    pub name: String,
    pub team: String,
    pub position: Option<PlayerPosition>,
    pub jersey_number: Option<u8>,
    pub age: u8,
}

pub struct PlayerLoader;

impl PlayerLoader {
    pub fn load() -> Result<Vec<PlayerEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_PLAYERS_JSON)
    }
}
