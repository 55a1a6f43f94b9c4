use crate::store::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub team_id: u32,
    pub position: Option<PlayerPosition>,
    pub jersey_number: Option<u8>,
    pub age: u8,
    pub goals: u32,
}

impl Entity for Player {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub team_id: u32,
    #[serde(default)]
    pub position: Option<PlayerPosition>,
    #[serde(default)]
    pub jersey_number: Option<u8>,
    pub age: u8,
    #[serde(default)]
    pub goals: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub team_id: Option<u32>,
    pub position: Option<PlayerPosition>,
    pub jersey_number: Option<u8>,
    pub age: Option<u8>,
    pub goals: Option<u32>,
}
