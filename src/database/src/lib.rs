mod generators;
mod loaders;

pub use generators::*;
pub use loaders::*;

use log::info;

pub struct DatabaseEntity {
    pub teams: Vec<TeamEntity>,
    pub venues: Vec<VenueEntity>,
    pub players: Vec<PlayerEntity>,
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> Result<DatabaseEntity, serde_json::Error> {
        let database = DatabaseEntity {
            teams: TeamLoader::load()?,
            venues: VenueLoader::load()?,
            players: PlayerLoader::load()?,
        };

        info!(
            "seed data loaded: {} teams, {} venues, {} players",
            database.teams.len(),
            database.venues.len(),
            database.players.len()
        );

        Ok(database)
    }
}
