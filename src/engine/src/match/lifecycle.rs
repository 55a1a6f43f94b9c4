use crate::clock::Clock;
use crate::error::{EngineResult, LeagueError};
use crate::league::StandingsLedger;
use crate::locks::KeyedLocks;
use crate::r#match::{Match, MatchScore, MatchStatus, MatchUpdate, NewMatch};
use crate::schedule::ConflictChecker;
use crate::store::Repositories;
use chrono::Duration;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

/// A match may be started at most this long before its kickoff.
pub const START_EARLIEST_BEFORE_KICKOFF: Duration = Duration::hours(1);

/// State machine for single matches.
///
/// Transitions of the same match are serialized through a per-match lock.
/// Anything that writes a kickoff, team pairing or venue holds `fixtures`
/// across validation, the conflict check and the save, so two callers cannot
/// both pass the check for the same team and slot.
pub struct MatchLifecycle {
    repositories: Repositories,
    ledger: Arc<StandingsLedger>,
    conflicts: ConflictChecker,
    clock: Arc<dyn Clock>,
    fixtures: Mutex<()>,
    match_locks: KeyedLocks,
}

impl MatchLifecycle {
    pub fn new(
        repositories: Repositories,
        ledger: Arc<StandingsLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        MatchLifecycle {
            conflicts: ConflictChecker::new(Arc::clone(&repositories.matches)),
            repositories,
            ledger,
            clock,
            fixtures: Mutex::new(()),
            match_locks: KeyedLocks::new(),
        }
    }

    pub fn conflicts(&self) -> &ConflictChecker {
        &self.conflicts
    }

    // ========== QUERIES ==========

    pub fn get(&self, match_id: u32) -> EngineResult<Match> {
        self.repositories
            .matches
            .get(match_id)
            .ok_or_else(|| LeagueError::match_not_found(match_id))
    }

    pub fn list(&self) -> Vec<Match> {
        self.repositories.matches.list_all()
    }

    pub fn of_team(&self, team_id: u32) -> Vec<Match> {
        self.repositories
            .matches
            .find_by(&|m: &Match| m.involves(team_id))
    }

    // ========== TRANSITIONS ==========

    pub fn create(&self, new_match: &NewMatch) -> EngineResult<Match> {
        let _fixtures = self.lock_fixtures();

        self.validate_pairing(new_match.home_team_id, new_match.away_team_id)?;
        self.validate_venue(new_match.venue_id)?;

        self.conflicts.ensure_free(
            new_match.home_team_id,
            new_match.away_team_id,
            new_match.kickoff,
            None,
        )?;

        let created = self.repositories.matches.save(Match::scheduled(
            new_match.home_team_id,
            new_match.away_team_id,
            new_match.venue_id,
            new_match.kickoff,
        ));

        info!(
            "match {} scheduled: {} vs {} at {}",
            created.id, created.home_team_id, created.away_team_id, created.kickoff
        );

        Ok(created)
    }

    pub fn start(&self, match_id: u32) -> EngineResult<Match> {
        let lock = self.lock_existing(match_id)?;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut current = self.get(match_id)?;

        if current.status != MatchStatus::Scheduled {
            return Err(Self::invalid_transition(&current, MatchStatus::InProgress));
        }

        let now = self.clock.now();
        if current.kickoff - now > START_EARLIEST_BEFORE_KICKOFF {
            return Err(LeagueError::NotReady(format!(
                "match {} kicks off at {}, too early to start at {}",
                match_id, current.kickoff, now
            )));
        }

        current.status = MatchStatus::InProgress;
        let started = self.repositories.matches.save(current);

        info!("match {} started", match_id);

        Ok(started)
    }

    pub fn complete(
        &self,
        match_id: u32,
        home_score: Option<i64>,
        away_score: Option<i64>,
    ) -> EngineResult<Match> {
        let lock = self.lock_existing(match_id)?;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut current = self.get(match_id)?;

        if current.status != MatchStatus::InProgress {
            return Err(Self::invalid_transition(&current, MatchStatus::Finished));
        }

        let score = MatchScore::parse(home_score, away_score)?;

        self.ledger.apply_result(
            current.home_team_id,
            current.away_team_id,
            score.home,
            score.away,
        )?;

        current.score = Some(score);
        current.status = MatchStatus::Finished;
        let finished = self.repositories.matches.save(current);

        info!("match {} finished {}:{}", match_id, score.home, score.away);

        Ok(finished)
    }

    pub fn cancel(&self, match_id: u32) -> EngineResult<Match> {
        let lock = self.lock_existing(match_id)?;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut current = self.get(match_id)?;

        if !current.status.can_transition_to(MatchStatus::Cancelled) {
            return Err(Self::invalid_transition(&current, MatchStatus::Cancelled));
        }

        current.status = MatchStatus::Cancelled;
        let cancelled = self.repositories.matches.save(current);

        info!("match {} cancelled", match_id);

        Ok(cancelled)
    }

    /// Partial edit. Moving into `FINISHED` books the result in the table,
    /// once, on the edge from a non-finished status only.
    pub fn update(&self, match_id: u32, update: &MatchUpdate) -> EngineResult<Match> {
        let lock = self.lock_existing(match_id)?;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let current = self.get(match_id)?;
        let next_status = update.status.unwrap_or(current.status);

        if current.status.is_terminal() {
            if update.has_field_changes() || next_status != current.status {
                return Err(LeagueError::InvalidTransition(format!(
                    "match {} is {:?} and can no longer be changed",
                    match_id, current.status
                )));
            }
            return Ok(current);
        }

        if next_status != current.status && !current.status.can_transition_to(next_status) {
            return Err(Self::invalid_transition(&current, next_status));
        }

        let mut candidate = current.clone();
        candidate.status = next_status;

        if let Some(home_team_id) = update.home_team_id {
            candidate.home_team_id = home_team_id;
        }
        if let Some(away_team_id) = update.away_team_id {
            candidate.away_team_id = away_team_id;
        }
        if let Some(kickoff) = update.kickoff {
            candidate.kickoff = kickoff;
        }

        let teams_changed = candidate.home_team_id != current.home_team_id
            || candidate.away_team_id != current.away_team_id;

        let reschedule =
            next_status.is_active() && (teams_changed || candidate.kickoff != current.kickoff);

        let _fixtures = if teams_changed || update.venue_id.is_some() || reschedule {
            Some(self.lock_fixtures())
        } else {
            None
        };

        if teams_changed {
            self.validate_pairing(candidate.home_team_id, candidate.away_team_id)?;
        }

        if let Some(venue_id) = update.venue_id {
            self.validate_venue(Some(venue_id))?;
            candidate.venue_id = Some(venue_id);
        }

        candidate.score = Self::merge_score(&current, update)?;

        if candidate.score.is_some() && next_status == MatchStatus::Scheduled {
            return Err(LeagueError::InvalidScore(format!(
                "match {} has not started, it cannot have a score",
                match_id
            )));
        }

        let finishing = next_status == MatchStatus::Finished;
        if finishing && candidate.score.is_none() {
            return Err(LeagueError::InvalidScore(format!(
                "match {} cannot finish without both scores",
                match_id
            )));
        }

        if reschedule {
            self.conflicts.ensure_free(
                candidate.home_team_id,
                candidate.away_team_id,
                candidate.kickoff,
                Some(match_id),
            )?;
        }

        if finishing {
            if let Some(score) = candidate.score {
                self.ledger.apply_result(
                    candidate.home_team_id,
                    candidate.away_team_id,
                    score.home,
                    score.away,
                )?;
            }
        }

        let saved = self.repositories.matches.save(candidate);

        debug!("match {} updated, status {:?}", match_id, saved.status);

        Ok(saved)
    }

    pub fn delete(&self, match_id: u32) -> EngineResult<()> {
        let lock = self.lock_existing(match_id)?;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let current = self.get(match_id)?;

        if current.status == MatchStatus::InProgress {
            return Err(LeagueError::Conflict(format!(
                "match {} is in progress and cannot be deleted",
                match_id
            )));
        }

        if current.status == MatchStatus::Finished {
            warn!(
                "deleting finished match {}, its result stays in the table",
                match_id
            );
        }

        self.repositories.matches.delete(match_id);
        self.match_locks.forget(match_id);

        info!("match {} deleted", match_id);

        Ok(())
    }

    /// Drops every match that has not finished yet. Each match is
    /// re-checked under its own lock, so one finishing meanwhile survives.
    pub fn clear_unfinished(&self) -> usize {
        let pending = self
            .repositories
            .matches
            .find_by(&|m: &Match| m.status != MatchStatus::Finished);

        let mut removed = 0;

        for game in pending {
            let Ok(lock) = self.lock_existing(game.id) else {
                continue;
            };
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

            match self.repositories.matches.get(game.id) {
                Some(current) if current.status != MatchStatus::Finished => {
                    self.repositories.matches.delete(game.id);
                    removed += 1;
                }
                _ => {}
            }

            self.match_locks.forget(game.id);
        }

        info!("{} unfinished matches cleared", removed);

        removed
    }

    // ========== LOCKING ==========

    /// Held while fixtures are written and while records that fixtures refer
    /// to (teams, venues) are removed, so neither side acts on a stale check.
    pub fn lock_fixtures(&self) -> MutexGuard<'_, ()> {
        self.fixtures.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Per-match lock, handed out only for stored matches.
    fn lock_existing(&self, match_id: u32) -> EngineResult<Arc<Mutex<()>>> {
        if !self.repositories.matches.exists(match_id) {
            return Err(LeagueError::match_not_found(match_id));
        }
        Ok(self.match_locks.lock_for(match_id))
    }

    // ========== VALIDATION ==========

    fn validate_pairing(&self, home_team_id: u32, away_team_id: u32) -> EngineResult<()> {
        for team_id in [home_team_id, away_team_id] {
            if !self.repositories.teams.exists(team_id) {
                return Err(LeagueError::team_not_found(team_id));
            }
        }

        if home_team_id == away_team_id {
            return Err(LeagueError::InvalidInput(format!(
                "team {} cannot play against itself",
                home_team_id
            )));
        }

        Ok(())
    }

    fn validate_venue(&self, venue_id: Option<u32>) -> EngineResult<()> {
        match venue_id {
            Some(id) if !self.repositories.venues.exists(id) => Err(LeagueError::venue_not_found(id)),
            _ => Ok(()),
        }
    }

    /// Supplied goals win; a single supplied side is completed from the
    /// stored score, never from nothing.
    fn merge_score(current: &Match, update: &MatchUpdate) -> EngineResult<Option<MatchScore>> {
        if !update.has_score() {
            return Ok(current.score);
        }

        let stored_home = current.score.map(|s| s.home as i64);
        let stored_away = current.score.map(|s| s.away as i64);

        MatchScore::parse(
            update.home_score.or(stored_home),
            update.away_score.or(stored_away),
        )
        .map(Some)
    }

    fn invalid_transition(current: &Match, next: MatchStatus) -> LeagueError {
        LeagueError::InvalidTransition(format!(
            "match {} cannot move from {:?} to {:?}",
            current.id, current.status, next
        ))
    }
}
