use crate::DatabaseEntity;
use engine::club::{NewPlayer, NewTeam, NewVenue};
use engine::{EngineResult, LeagueError, Tournament};
use log::info;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub teams: usize,
    pub venues: usize,
    pub players: usize,
}

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    /// Registers the seed records through the regular club operations, so
    /// every team gets its place in the table.
    pub fn generate(data: &DatabaseEntity, tournament: &Tournament) -> EngineResult<SeedSummary> {
        let clubs = tournament.clubs();
        let mut team_ids = HashMap::with_capacity(data.teams.len());

        for team in &data.teams {
            let created = clubs.create_team(&NewTeam {
                name: team.name.clone(),
                city: team.city.clone(),
                coach: team.coach.clone(),
                founded: team.founded,
            })?;

            team_ids.insert(team.name.as_str(), created.id);
        }

        for venue in &data.venues {
            clubs.create_venue(&NewVenue {
                name: venue.name.clone(),
                city: venue.city.clone(),
                capacity: venue.capacity,
                surface: venue.surface,
            })?;
        }

        for player in &data.players {
            let team_id = team_ids.get(player.team.as_str()).copied().ok_or_else(|| {
                LeagueError::NotFound(format!(
                    "seed player '{}' refers to unknown team '{}'",
                    player.name, player.team
                ))
            })?;

            clubs.create_player(&NewPlayer {
                name: player.name.clone(),
                team_id,
                position: player.position,
                jersey_number: player.jersey_number,
                age: player.age,
                goals: None,
            })?;
        }

        let summary = SeedSummary {
            teams: data.teams.len(),
            venues: data.venues.len(),
            players: data.players.len(),
        };

        info!(
            "league seeded: {} teams, {} venues, {} players",
            summary.teams, summary.venues, summary.players
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DatabaseLoader, PlayerEntity};
    use engine::ErrorKind;

    #[test]
    fn test_generate_seeds_table() {
        let data = DatabaseLoader::load().unwrap();
        let tournament = Tournament::in_memory();

        let summary = DatabaseGenerator::generate(&data, &tournament).unwrap();

        let table = tournament.standings();
        assert_eq!(summary.teams, table.len());
        let positions: Vec<u32> = table.iter().map(|s| s.position).collect();
        assert_eq!(positions, (1..=table.len() as u32).collect::<Vec<_>>());
        assert_eq!(tournament.clubs().list_players().len(), summary.players);
    }

    #[test]
    fn test_generate_twice_conflicts() {
        let data = DatabaseLoader::load().unwrap();
        let tournament = Tournament::in_memory();
        DatabaseGenerator::generate(&data, &tournament).unwrap();

        let err = DatabaseGenerator::generate(&data, &tournament).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_unknown_player_team() {
        let data = DatabaseEntity {
            teams: Vec::new(),
            venues: Vec::new(),
            players: vec![PlayerEntity {
                name: String::from("Nobody"),
                team: String::from("Ghost FC"),
                position: None,
                jersey_number: None,
                age: 20,
            }],
        };

        let err = DatabaseGenerator::generate(&data, &Tournament::in_memory()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
