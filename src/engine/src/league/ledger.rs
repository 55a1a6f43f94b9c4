use crate::club::Team;
use crate::error::{EngineResult, LeagueError};
use crate::league::{Standing, StandingUpdate};
use crate::store::EntityStore;
use log::{debug, info};
use std::sync::{Arc, Mutex, MutexGuard};

/// Sole writer of the league table.
///
/// Every mutation of a `Standing` (and of the `points` copy kept on `Team`)
/// happens while holding `table`, and every mutation finishes with a full
/// re-rank before the lock is released, so positions are always `1..=N`.
pub struct StandingsLedger {
    standings: Arc<dyn EntityStore<Standing>>,
    teams: Arc<dyn EntityStore<Team>>,
    table: Mutex<()>,
}

impl StandingsLedger {
    pub fn new(
        standings: Arc<dyn EntityStore<Standing>>,
        teams: Arc<dyn EntityStore<Team>>,
    ) -> Self {
        StandingsLedger {
            standings,
            teams,
            table: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ========== MATCH RESULTS ==========

    pub fn apply_result(
        &self,
        home_team_id: u32,
        away_team_id: u32,
        home_score: u16,
        away_score: u16,
    ) -> EngineResult<(Standing, Standing)> {
        if home_team_id == away_team_id {
            return Err(LeagueError::InvalidInput(format!(
                "team {} cannot play itself",
                home_team_id
            )));
        }

        let guard = self.lock();

        let mut home = self.standing_of(home_team_id).ok_or_else(|| {
            LeagueError::NotFound(format!("standing not found for home team {}", home_team_id))
        })?;
        let mut away = self.standing_of(away_team_id).ok_or_else(|| {
            LeagueError::NotFound(format!("standing not found for away team {}", away_team_id))
        })?;

        let outcome = home.record(home_score, away_score);
        away.record(away_score, home_score);

        debug!(
            "result {}:{} for teams {} and {} booked as home {:?}",
            home_score, away_score, home_team_id, away_team_id, outcome
        );

        self.standings.save(home);
        self.standings.save(away);

        self.recompute_locked(&guard);

        let home = self.mirror_points(home_team_id)?;
        let away = self.mirror_points(away_team_id)?;

        Ok((home, away))
    }

    // ========== RANKING ==========

    pub fn recompute_positions(&self) {
        let guard = self.lock();
        self.recompute_locked(&guard);
    }

    /// Caller must hold the table lock; the guard is taken as proof.
    fn recompute_locked(&self, _guard: &MutexGuard<'_, ()>) {
        let mut table = self.standings.list_all();
        table.sort_by(Standing::table_order);

        let mut changed = 0;

        for (index, mut standing) in table.into_iter().enumerate() {
            let position = index as u32 + 1;
            if standing.position != position {
                standing.position = position;
                self.standings.save(standing);
                changed += 1;
            }
        }

        debug!("table re-ranked, {} positions changed", changed);
    }

    /// Rank of the team derived from the table order itself rather than the
    /// stored `position`, so edits made behind the ledger's back cannot make it
    /// stale. Teams level on every criterion share a rank.
    pub fn position_of(&self, team_id: u32) -> EngineResult<u32> {
        let _guard = self.lock();

        let standing = self.standing_of(team_id).ok_or_else(|| {
            LeagueError::NotFound(format!("standing not found for team {}", team_id))
        })?;

        let ahead = self
            .standings
            .find_by(&|other: &Standing| other.table_order(&standing).is_lt())
            .len();

        Ok(ahead as u32 + 1)
    }

    pub fn standings(&self) -> Vec<Standing> {
        let _guard = self.lock();

        let mut table = self.standings.list_all();
        table.sort_by(Standing::table_order);
        table
    }

    pub fn top_standings(&self, limit: Option<usize>) -> Vec<Standing> {
        let mut table = self.standings();
        if let Some(limit) = limit {
            table.truncate(limit);
        }
        table
    }

    pub fn standing_for_team(&self, team_id: u32) -> Option<Standing> {
        self.standing_of(team_id)
    }

    // ========== TABLE MAINTENANCE ==========

    /// Opens a table row for a new team. Returns the existing row when the team
    /// already has one.
    pub fn create_standing(&self, team_id: u32) -> EngineResult<Standing> {
        if !self.teams.exists(team_id) {
            return Err(LeagueError::team_not_found(team_id));
        }

        let guard = self.lock();

        if let Some(existing) = self.standing_of(team_id) {
            return Ok(existing);
        }

        let created = self.standings.save(Standing::new(team_id));
        self.recompute_locked(&guard);

        debug!("standing {} opened for team {}", created.id, team_id);

        self.standings
            .get(created.id)
            .ok_or_else(|| LeagueError::NotFound(format!("standing {} not found", created.id)))
    }

    /// Manual correction of a table row.
    pub fn update_standing(&self, standing_id: u32, update: &StandingUpdate) -> EngineResult<Standing> {
        let guard = self.lock();

        let mut standing = self
            .standings
            .get(standing_id)
            .ok_or_else(|| LeagueError::NotFound(format!("standing {} not found", standing_id)))?;

        update.apply(&mut standing);
        let team_id = standing.team_id;
        self.standings.save(standing);

        self.recompute_locked(&guard);

        info!("standing {} of team {} edited manually", standing_id, team_id);

        self.mirror_points(team_id)
    }

    pub fn delete_for_team(&self, team_id: u32) -> bool {
        let guard = self.lock();

        let removed = match self.standing_of(team_id) {
            Some(standing) => self.standings.delete(standing.id),
            None => false,
        };

        if removed {
            self.recompute_locked(&guard);
        }

        removed
    }

    /// Season reset: every counter and position back to zero. Rows are kept.
    pub fn reset_all(&self) -> usize {
        let _guard = self.lock();

        let table = self.standings.list_all();
        let count = table.len();

        for mut standing in table {
            let team_id = standing.team_id;
            standing.reset();
            self.standings.save(standing);

            if let Some(mut team) = self.teams.get(team_id) {
                team.points = 0;
                self.teams.save(team);
            }
        }

        info!("season reset: {} standings cleared", count);

        count
    }

    /// New season: the table is rebuilt with one fresh row per team and every
    /// team's points go back to zero. Returns the number of rows.
    pub fn open_new_season(&self) -> usize {
        let guard = self.lock();

        for standing in self.standings.list_all() {
            self.standings.delete(standing.id);
        }

        let teams = self.teams.list_all();
        let count = teams.len();

        for mut team in teams {
            self.standings.save(Standing::new(team.id));
            team.points = 0;
            self.teams.save(team);
        }

        self.recompute_locked(&guard);

        info!("new season opened with {} standings", count);

        count
    }

    /// Stores edits of a team record. `points` is taken from the table under
    /// the table lock, so a stale copy never overwrites the mirrored value.
    pub fn save_team(&self, mut team: Team) -> Team {
        let _guard = self.lock();

        team.points = self.standing_of(team.id).map_or(0, |s| s.points);
        self.teams.save(team)
    }

    // ========== HELPERS ==========

    fn standing_of(&self, team_id: u32) -> Option<Standing> {
        self.standings
            .find_first(&|s: &Standing| s.team_id == team_id)
    }

    /// Copies the table points onto the team record. Must run under the lock.
    fn mirror_points(&self, team_id: u32) -> EngineResult<Standing> {
        let standing = self.standing_of(team_id).ok_or_else(|| {
            LeagueError::NotFound(format!("standing not found for team {}", team_id))
        })?;

        if let Some(mut team) = self.teams.get(team_id) {
            team.points = standing.points;
            self.teams.save(team);
        }

        Ok(standing)
    }
}
