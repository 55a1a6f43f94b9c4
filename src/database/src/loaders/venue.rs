use engine::club::Surface;
use serde::Deserialize;

const STATIC_VENUES_JSON: &str = include_str!("../../data/venues.json");

#[derive(Debug, Clone, Deserialize)]
pub struct VenueEntity {
    pub name: String,
    pub city: String,
    pub capacity: i64,
    pub surface: Surface,
}

pub struct VenueLoader;

impl VenueLoader {
    pub fn load() -> Result<Vec<VenueEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_VENUES_JSON)
    }
}
