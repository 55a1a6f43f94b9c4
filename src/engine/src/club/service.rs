use crate::club::{
    NewPlayer, NewTeam, NewVenue, Player, PlayerPosition, PlayerUpdate, Team, TeamUpdate, Venue,
    VenueUpdate,
};
use crate::error::{EngineResult, LeagueError};
use crate::league::StandingsLedger;
use crate::r#match::{Match, MatchLifecycle, MatchStatus};
use crate::store::Repositories;
use itertools::Itertools;
use log::{debug, info};
use std::sync::{Arc, Mutex, MutexGuard};

/// Teams, venues and players. Name and jersey uniqueness checks run under
/// `registry` together with the write they guard. Removing a team or venue
/// also holds the lifecycle's fixture lock, so no match can be scheduled
/// against it between the check and the delete.
///
/// Lock order: fixtures, registry, table.
pub struct ClubService {
    repositories: Repositories,
    ledger: Arc<StandingsLedger>,
    lifecycle: Arc<MatchLifecycle>,
    registry: Mutex<()>,
}

impl ClubService {
    pub fn new(
        repositories: Repositories,
        ledger: Arc<StandingsLedger>,
        lifecycle: Arc<MatchLifecycle>,
    ) -> Self {
        ClubService {
            repositories,
            ledger,
            lifecycle,
            registry: Mutex::new(()),
        }
    }

    fn registry(&self) -> MutexGuard<'_, ()> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ========== TEAMS ==========

    pub fn get_team(&self, team_id: u32) -> EngineResult<Team> {
        self.repositories
            .teams
            .get(team_id)
            .ok_or_else(|| LeagueError::team_not_found(team_id))
    }

    pub fn list_teams(&self) -> Vec<Team> {
        self.repositories.teams.list_all()
    }

    pub fn find_team_by_name(&self, name: &str) -> Option<Team> {
        self.repositories.teams.find_first(&|t: &Team| t.name == name)
    }

    pub fn teams_in_city(&self, city: &str) -> Vec<Team> {
        self.repositories
            .teams
            .find_by(&|t: &Team| t.city.eq_ignore_ascii_case(city))
    }

    /// Registers the team and opens its row in the table.
    pub fn create_team(&self, new_team: &NewTeam) -> EngineResult<Team> {
        let name = required("team name", &new_team.name)?;
        let city = required("city", &new_team.city)?;

        let team = {
            let _registry = self.registry();

            self.ensure_team_name_free(&name, None)?;

            self.repositories.teams.save(Team {
                coach: new_team.coach.clone(),
                founded: new_team.founded,
                ..Team::new(&name, &city)
            })
        };

        self.ledger.create_standing(team.id)?;

        info!("team {} '{}' registered", team.id, team.name);

        self.get_team(team.id)
    }

    pub fn update_team(&self, team_id: u32, update: &TeamUpdate) -> EngineResult<Team> {
        let _registry = self.registry();

        let mut team = self.get_team(team_id)?;

        if let Some(name) = &update.name {
            let name = required("team name", name)?;
            self.ensure_team_name_free(&name, Some(team_id))?;
            team.name = name;
        }
        if let Some(city) = &update.city {
            team.city = required("city", city)?;
        }
        if let Some(coach) = &update.coach {
            team.coach = Some(coach.clone());
        }
        if let Some(founded) = update.founded {
            team.founded = Some(founded);
        }

        Ok(self.ledger.save_team(team))
    }

    /// Removes the team with its table row and squad. Refused while the team
    /// still has a scheduled or running match.
    pub fn delete_team(&self, team_id: u32) -> EngineResult<()> {
        let _fixtures = self.lifecycle.lock_fixtures();
        let _registry = self.registry();

        let team = self.get_team(team_id)?;

        let active = self
            .repositories
            .matches
            .find_by(&|m: &Match| m.involves(team_id) && m.status.is_active());

        if !active.is_empty() {
            return Err(LeagueError::Conflict(format!(
                "team {} still has {} scheduled or running matches",
                team_id,
                active.len()
            )));
        }

        for player in self.players_of_team(team_id) {
            self.repositories.players.delete(player.id);
        }

        self.ledger.delete_for_team(team_id);
        self.repositories.teams.delete(team_id);

        info!("team {} '{}' deleted", team_id, team.name);

        Ok(())
    }

    fn ensure_team_name_free(&self, name: &str, except: Option<u32>) -> EngineResult<()> {
        let taken = self
            .repositories
            .teams
            .find_first(&|t: &Team| t.name.eq_ignore_ascii_case(name) && Some(t.id) != except);

        match taken {
            Some(existing) => Err(LeagueError::Conflict(format!(
                "team name '{}' is already used by team {}",
                name, existing.id
            ))),
            None => Ok(()),
        }
    }

    // ========== VENUES ==========

    pub fn get_venue(&self, venue_id: u32) -> EngineResult<Venue> {
        self.repositories
            .venues
            .get(venue_id)
            .ok_or_else(|| LeagueError::venue_not_found(venue_id))
    }

    pub fn list_venues(&self) -> Vec<Venue> {
        self.repositories.venues.list_all()
    }

    pub fn create_venue(&self, new_venue: &NewVenue) -> EngineResult<Venue> {
        let name = required("venue name", &new_venue.name)?;
        let city = required("city", &new_venue.city)?;
        let capacity = capacity(new_venue.capacity)?;

        let _registry = self.registry();

        self.ensure_venue_name_free(&name, None)?;

        let venue = self.repositories.venues.save(Venue {
            id: 0,
            name,
            city,
            capacity,
            surface: new_venue.surface,
        });

        info!("venue {} '{}' registered", venue.id, venue.name);

        Ok(venue)
    }

    pub fn update_venue(&self, venue_id: u32, update: &VenueUpdate) -> EngineResult<Venue> {
        let _registry = self.registry();

        let mut venue = self.get_venue(venue_id)?;

        if let Some(name) = &update.name {
            let name = required("venue name", name)?;
            self.ensure_venue_name_free(&name, Some(venue_id))?;
            venue.name = name;
        }
        if let Some(city) = &update.city {
            venue.city = required("city", city)?;
        }
        if let Some(value) = update.capacity {
            venue.capacity = capacity(value)?;
        }
        if let Some(surface) = update.surface {
            venue.surface = surface;
        }

        Ok(self.repositories.venues.save(venue))
    }

    pub fn delete_venue(&self, venue_id: u32) -> EngineResult<()> {
        let _fixtures = self.lifecycle.lock_fixtures();

        self.get_venue(venue_id)?;

        let booked = self
            .repositories
            .matches
            .find_by(&|m: &Match| m.venue_id == Some(venue_id) && m.status.is_active());

        if !booked.is_empty() {
            return Err(LeagueError::Conflict(format!(
                "venue {} still hosts {} scheduled or running matches",
                venue_id,
                booked.len()
            )));
        }

        self.repositories.venues.delete(venue_id);

        info!("venue {} deleted", venue_id);

        Ok(())
    }

    fn ensure_venue_name_free(&self, name: &str, except: Option<u32>) -> EngineResult<()> {
        let taken = self
            .repositories
            .venues
            .find_first(&|v: &Venue| v.name.eq_ignore_ascii_case(name) && Some(v.id) != except);

        match taken {
            Some(existing) => Err(LeagueError::Conflict(format!(
                "venue name '{}' is already used by venue {}",
                name, existing.id
            ))),
            None => Ok(()),
        }
    }

    // ========== PLAYERS ==========

    pub fn get_player(&self, player_id: u32) -> EngineResult<Player> {
        self.repositories
            .players
            .get(player_id)
            .ok_or_else(|| LeagueError::player_not_found(player_id))
    }

    pub fn list_players(&self) -> Vec<Player> {
        self.repositories.players.list_all()
    }

    pub fn players_of_team(&self, team_id: u32) -> Vec<Player> {
        self.repositories
            .players
            .find_by(&|p: &Player| p.team_id == team_id)
    }

    pub fn players_by_position(&self, position: PlayerPosition) -> Vec<Player> {
        self.repositories
            .players
            .find_by(&|p: &Player| p.position == Some(position))
    }

    pub fn top_scorers(&self, limit: Option<usize>) -> Vec<Player> {
        self.repositories
            .players
            .list_all()
            .into_iter()
            .sorted_by(|a, b| b.goals.cmp(&a.goals))
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    pub fn create_player(&self, new_player: &NewPlayer) -> EngineResult<Player> {
        let name = required("player name", &new_player.name)?;

        let _registry = self.registry();

        if !self.repositories.teams.exists(new_player.team_id) {
            return Err(LeagueError::team_not_found(new_player.team_id));
        }

        if let Some(jersey) = new_player.jersey_number {
            self.ensure_jersey_free(new_player.team_id, jersey, None)?;
        }

        let player = self.repositories.players.save(Player {
            id: 0,
            name,
            team_id: new_player.team_id,
            position: new_player.position,
            jersey_number: new_player.jersey_number,
            age: new_player.age,
            goals: new_player.goals.unwrap_or(0),
        });

        debug!("player {} joined team {}", player.id, player.team_id);

        Ok(player)
    }

    pub fn update_player(&self, player_id: u32, update: &PlayerUpdate) -> EngineResult<Player> {
        let _registry = self.registry();

        let mut player = self.get_player(player_id)?;

        if let Some(team_id) = update.team_id {
            if team_id != player.team_id && !self.repositories.teams.exists(team_id) {
                return Err(LeagueError::team_not_found(team_id));
            }
            player.team_id = team_id;
        }

        if let Some(jersey) = update.jersey_number.or(player.jersey_number) {
            self.ensure_jersey_free(player.team_id, jersey, Some(player_id))?;
            player.jersey_number = Some(jersey);
        }

        if let Some(name) = &update.name {
            player.name = required("player name", name)?;
        }
        if let Some(position) = update.position {
            player.position = Some(position);
        }
        if let Some(age) = update.age {
            player.age = age;
        }
        if let Some(goals) = update.goals {
            player.goals = goals;
        }

        Ok(self.repositories.players.save(player))
    }

    pub fn transfer_player(
        &self,
        player_id: u32,
        new_team_id: u32,
        new_jersey: Option<u8>,
    ) -> EngineResult<Player> {
        let _registry = self.registry();

        let mut player = self.get_player(player_id)?;

        if !self.repositories.teams.exists(new_team_id) {
            return Err(LeagueError::team_not_found(new_team_id));
        }

        if let Some(jersey) = new_jersey {
            self.ensure_jersey_free(new_team_id, jersey, Some(player_id))?;
            player.jersey_number = Some(jersey);
        } else if let Some(jersey) = player.jersey_number {
            if self.ensure_jersey_free(new_team_id, jersey, Some(player_id)).is_err() {
                player.jersey_number = None;
            }
        }

        let from = player.team_id;
        player.team_id = new_team_id;
        let player = self.repositories.players.save(player);

        info!("player {} transferred from team {} to team {}", player_id, from, new_team_id);

        Ok(player)
    }

    pub fn score_goal(&self, player_id: u32) -> EngineResult<Player> {
        let _registry = self.registry();

        let mut player = self.get_player(player_id)?;
        player.goals += 1;

        Ok(self.repositories.players.save(player))
    }

    /// Everyone gets a year older, once per season.
    pub fn increment_all_player_ages(&self) -> usize {
        let _registry = self.registry();

        let players = self.repositories.players.list_all();
        let count = players.len();

        for mut player in players {
            player.age = player.age.saturating_add(1);
            self.repositories.players.save(player);
        }

        info!("{} players are a year older", count);

        count
    }

    pub fn delete_player(&self, player_id: u32) -> EngineResult<()> {
        if !self.repositories.players.delete(player_id) {
            return Err(LeagueError::player_not_found(player_id));
        }
        Ok(())
    }

    /// Rewards a player of either side of a finished match with one goal.
    pub fn assign_man_of_the_match(&self, match_id: u32, player_id: u32) -> EngineResult<Player> {
        let game = self.lifecycle.get(match_id)?;

        if game.status != MatchStatus::Finished {
            return Err(LeagueError::InvalidTransition(format!(
                "match {} must be finished before naming the man of the match",
                match_id
            )));
        }

        let player = self.get_player(player_id)?;
        if !game.involves(player.team_id) {
            return Err(LeagueError::InvalidInput(format!(
                "player {} did not take part in match {}",
                player_id, match_id
            )));
        }

        self.score_goal(player_id)
    }

    fn ensure_jersey_free(&self, team_id: u32, jersey: u8, except: Option<u32>) -> EngineResult<()> {
        let taken = self.repositories.players.find_first(&|p: &Player| {
            p.team_id == team_id && p.jersey_number == Some(jersey) && Some(p.id) != except
        });

        match taken {
            Some(_) => Err(LeagueError::Conflict(format!(
                "jersey number {} is already taken in team {}",
                jersey, team_id
            ))),
            None => Ok(()),
        }
    }
}

fn required(field: &str, value: &str) -> EngineResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeagueError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn capacity(value: i64) -> EngineResult<u32> {
    match u32::try_from(value) {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(LeagueError::InvalidInput(format!(
            "venue capacity must be positive, got {}",
            value
        ))),
    }
}
