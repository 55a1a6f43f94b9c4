use crate::store::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub coach: Option<String>,
    pub founded: Option<u16>,
    /// Copy of the team's table points, written only by the standings ledger.
    pub points: u32,
}

impl Team {
    pub fn new(name: &str, city: &str) -> Self {
        Team {
            id: 0,
            name: name.to_string(),
            city: city.to_string(),
            coach: None,
            founded: None,
            points: 0,
        }
    }
}

impl Entity for Team {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub coach: Option<String>,
    #[serde(default)]
    pub founded: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub coach: Option<String>,
    pub founded: Option<u16>,
}
