use serde::Deserialize;

const STATIC_TEAMS_JSON: &str = include_str!("../../data/teams.json");

#[derive(Debug, Clone, Deserialize)]
pub struct TeamEntity {
    pub name: String,
    pub city: String,
    pub coach: Option<String>,
    pub founded: Option<u16>,
}

pub struct TeamLoader;

impl TeamLoader {
    pub fn load() -> Result<Vec<TeamEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_TEAMS_JSON)
    }
}
