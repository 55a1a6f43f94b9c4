use crate::store::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Surface {
    Grass,
    ArtificialTurf,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub capacity: u32,
    pub surface: Surface,
}

impl Entity for Venue {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub capacity: i64,
    #[serde(default = "default_surface")]
    pub surface: Surface,
}

fn default_surface() -> Surface {
    Surface::Grass
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<i64>,
    pub surface: Option<Surface>,
}
