use crate::clock::{Clock, SystemClock};
use crate::club::{ClubService, Venue};
use crate::error::{EngineResult, LeagueError};
use crate::league::{LeagueStatistics, Standing, StandingsLedger, TeamStatistics};
use crate::r#match::{Match, MatchLifecycle, MatchUpdate, NewMatch};
use crate::schedule::{RoundSchedule, RoundScheduler, available_venues};
use crate::store::Repositories;
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use serde::Serialize;
use std::sync::Arc;

/// What opening a new season swept away and rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonSummary {
    pub removed_matches: usize,
    pub standings: usize,
}

/// One league season: the stores plus every service working on them.
pub struct Tournament {
    repositories: Repositories,
    ledger: Arc<StandingsLedger>,
    lifecycle: Arc<MatchLifecycle>,
    rounds: RoundScheduler,
    clubs: ClubService,
}

impl Tournament {
    pub fn new(repositories: Repositories, clock: Arc<dyn Clock>) -> Self {
        let ledger = Arc::new(StandingsLedger::new(
            Arc::clone(&repositories.standings),
            Arc::clone(&repositories.teams),
        ));

        let lifecycle = Arc::new(MatchLifecycle::new(
            repositories.clone(),
            Arc::clone(&ledger),
            clock,
        ));

        Tournament {
            rounds: RoundScheduler::new(Arc::clone(&lifecycle)),
            clubs: ClubService::new(
                repositories.clone(),
                Arc::clone(&ledger),
                Arc::clone(&lifecycle),
            ),
            repositories,
            ledger,
            lifecycle,
        }
    }

    pub fn in_memory() -> Self {
        Tournament::new(Repositories::in_memory(), Arc::new(SystemClock))
    }

    pub fn clubs(&self) -> &ClubService {
        &self.clubs
    }

    pub fn matches(&self) -> &MatchLifecycle {
        &self.lifecycle
    }

    pub fn ledger(&self) -> &StandingsLedger {
        &self.ledger
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    // ========== MATCHES ==========

    pub fn create_match(&self, new_match: &NewMatch) -> EngineResult<Match> {
        self.lifecycle.create(new_match)
    }

    pub fn start_match(&self, match_id: u32) -> EngineResult<Match> {
        self.lifecycle.start(match_id)
    }

    pub fn complete_match(
        &self,
        match_id: u32,
        home_score: Option<i64>,
        away_score: Option<i64>,
    ) -> EngineResult<Match> {
        self.lifecycle.complete(match_id, home_score, away_score)
    }

    pub fn cancel_match(&self, match_id: u32) -> EngineResult<Match> {
        self.lifecycle.cancel(match_id)
    }

    pub fn update_match(&self, match_id: u32, update: &MatchUpdate) -> EngineResult<Match> {
        self.lifecycle.update(match_id, update)
    }

    pub fn delete_match(&self, match_id: u32) -> EngineResult<()> {
        self.lifecycle.delete(match_id)
    }

    pub fn generate_round_schedule(
        &self,
        team_ids: &[u32],
        round_start: NaiveDateTime,
        venue_id: Option<u32>,
    ) -> EngineResult<RoundSchedule> {
        self.rounds.generate_round(team_ids, round_start, venue_id)
    }

    // ========== TABLE ==========

    pub fn standings(&self) -> Vec<Standing> {
        self.ledger.standings()
    }

    pub fn position_of(&self, team_id: u32) -> EngineResult<u32> {
        self.ledger.position_of(team_id)
    }

    /// Zeroes the table. Matches and their results stay in place.
    pub fn reset_season(&self) -> usize {
        self.ledger.reset_all()
    }

    /// Starts the next season: pending fixtures are dropped and every team
    /// gets a fresh table row. Finished matches are kept as history.
    pub fn initialize_season(&self) -> SeasonSummary {
        let removed_matches = self.lifecycle.clear_unfinished();
        let standings = self.ledger.open_new_season();

        info!(
            "season initialized: {} matches removed, {} standings opened",
            removed_matches, standings
        );

        SeasonSummary {
            removed_matches,
            standings,
        }
    }

    pub fn league_statistics(&self) -> LeagueStatistics {
        LeagueStatistics::from_table(&self.ledger.standings())
    }

    pub fn team_statistics(&self, team_id: u32) -> EngineResult<TeamStatistics> {
        if !self.repositories.teams.exists(team_id) {
            return Err(LeagueError::team_not_found(team_id));
        }

        let matches = self.lifecycle.of_team(team_id);
        let squad = self.clubs.players_of_team(team_id);

        Ok(TeamStatistics::collect(team_id, &matches, &squad))
    }

    pub fn available_venues(&self, day: NaiveDate) -> Vec<Venue> {
        available_venues(&self.repositories, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::clock::FixedClock;
    use crate::club::{NewTeam, NewVenue, Surface};
    use crate::r#match::MatchStatus;
    use chrono::Duration;

    fn kickoff() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 12)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap()
    }

    fn tournament() -> (Tournament, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(kickoff()));
        let tournament = Tournament::new(Repositories::in_memory(), clock.clone());
        (tournament, clock)
    }

    fn team(tournament: &Tournament, name: &str) -> u32 {
        tournament
            .clubs()
            .create_team(&NewTeam {
                name: name.to_string(),
                city: String::from("Lisbon"),
                coach: None,
                founded: None,
            })
            .unwrap()
            .id
    }

    fn fixture(home: u32, away: u32, at: NaiveDateTime) -> NewMatch {
        NewMatch {
            home_team_id: home,
            away_team_id: away,
            venue_id: None,
            kickoff: at,
        }
    }

    #[test]
    fn test_three_one_win_scenario() {
        let (tournament, _) = tournament();
        let a = team(&tournament, "Benfica");
        let b = team(&tournament, "Sporting");

        let game = tournament.create_match(&fixture(a, b, kickoff())).unwrap();
        tournament.start_match(game.id).unwrap();
        let finished = tournament.complete_match(game.id, Some(3), Some(1)).unwrap();

        assert_eq!(finished.status, MatchStatus::Finished);

        let home = tournament.ledger().standing_for_team(a).unwrap();
        let away = tournament.ledger().standing_for_team(b).unwrap();
        assert_eq!(home.wins, 1);
        assert_eq!(home.points, 3);
        assert_eq!(home.goals_for, 3);
        assert_eq!(home.goals_against, 1);
        assert_eq!(home.goal_difference, 2);
        assert_eq!(away.losses, 1);
        assert_eq!(away.points, 0);
        assert!(tournament.position_of(a).unwrap() < tournament.position_of(b).unwrap());
        assert_eq!(tournament.clubs().get_team(a).unwrap().points, 3);
    }

    #[test]
    fn test_invalid_score_leaves_match_in_progress() {
        let (tournament, _) = tournament();
        let a = team(&tournament, "Porto");
        let b = team(&tournament, "Braga");
        let game = tournament.create_match(&fixture(a, b, kickoff())).unwrap();
        tournament.start_match(game.id).unwrap();

        let err = tournament.complete_match(game.id, Some(-1), Some(0)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidScore);
        let stored = tournament.matches().get(game.id).unwrap();
        assert_eq!(stored.status, MatchStatus::InProgress);
        assert_eq!(stored.score, None);
        assert_eq!(tournament.ledger().standing_for_team(a).unwrap().played, 0);
    }

    #[test]
    fn test_finished_match_cannot_restart() {
        let (tournament, _) = tournament();
        let a = team(&tournament, "Porto");
        let b = team(&tournament, "Braga");
        let game = tournament.create_match(&fixture(a, b, kickoff())).unwrap();
        tournament.start_match(game.id).unwrap();
        tournament.complete_match(game.id, Some(0), Some(0)).unwrap();

        let err = tournament.start_match(game.id).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_conflict_window_then_free_slot() {
        let (tournament, _) = tournament();
        let a = team(&tournament, "Porto");
        let b = team(&tournament, "Braga");
        let c = team(&tournament, "Boavista");
        tournament.create_match(&fixture(a, b, kickoff())).unwrap();

        let clash = tournament.create_match(&fixture(a, c, kickoff() - Duration::minutes(30)));
        let later = tournament.create_match(&fixture(c, a, kickoff() + Duration::hours(3)));

        assert_eq!(clash.unwrap_err().kind(), ErrorKind::Conflict);
        assert!(later.is_ok());
    }

    #[test]
    fn test_start_too_early_is_not_ready() {
        let (tournament, clock) = tournament();
        let a = team(&tournament, "Porto");
        let b = team(&tournament, "Braga");
        let game = tournament
            .create_match(&fixture(a, b, kickoff() + Duration::hours(5)))
            .unwrap();

        let early = tournament.start_match(game.id);
        clock.advance(Duration::hours(4));
        let on_time = tournament.start_match(game.id);

        assert_eq!(early.unwrap_err().kind(), ErrorKind::NotReady);
        assert!(on_time.is_ok());
    }

    #[test]
    fn test_round_schedule_partial_on_conflict() {
        let (tournament, _) = tournament();
        let ids: Vec<u32> = ["A", "B", "C", "D"]
            .iter()
            .map(|name| team(&tournament, name))
            .collect();
        // D is busy when the second pair would kick off
        let blocker = team(&tournament, "E");
        tournament
            .create_match(&fixture(ids[3], blocker, kickoff() + Duration::hours(3)))
            .unwrap();

        let round = tournament
            .generate_round_schedule(&ids, kickoff(), None)
            .unwrap();

        assert_eq!(round.requested_pairs, 2);
        assert_eq!(round.matches.len(), 1);
        assert!(!round.is_complete());
        assert_eq!(round.failure.map(|e| e.kind()), Some(ErrorKind::Conflict));
    }

    #[test]
    fn test_reset_season_keeps_matches() {
        let (tournament, _) = tournament();
        let a = team(&tournament, "Porto");
        let b = team(&tournament, "Braga");
        let game = tournament.create_match(&fixture(a, b, kickoff())).unwrap();
        tournament.start_match(game.id).unwrap();
        tournament.complete_match(game.id, Some(2), Some(2)).unwrap();

        assert_eq!(tournament.reset_season(), 2);

        assert!(tournament.standings().iter().all(|s| s.points == 0 && s.played == 0));
        assert_eq!(tournament.matches().list().len(), 1);
        assert_eq!(tournament.clubs().get_team(a).unwrap().points, 0);
    }

    #[test]
    fn test_team_statistics_from_finished_matches() {
        let (tournament, _) = tournament();
        let a = team(&tournament, "Porto");
        let b = team(&tournament, "Braga");
        let game = tournament.create_match(&fixture(a, b, kickoff())).unwrap();
        tournament.create_match(&fixture(b, a, kickoff() + Duration::days(7))).unwrap();
        tournament.start_match(game.id).unwrap();
        tournament.complete_match(game.id, Some(1), Some(0)).unwrap();

        let stats = tournament.team_statistics(a).unwrap();
        let league = tournament.league_statistics();

        assert_eq!(stats.played, 1);
        assert_eq!(stats.wins, 1);
        assert_eq!(league.total_matches, 1);
        assert_eq!(league.total_goals, 1);
        assert_eq!(tournament.team_statistics(99).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_available_venues_for_day() {
        let (tournament, _) = tournament();
        let a = team(&tournament, "Porto");
        let b = team(&tournament, "Braga");
        let venue = |name: &str| {
            tournament
                .clubs()
                .create_venue(&NewVenue {
                    name: name.to_string(),
                    city: String::from("Porto"),
                    capacity: 50_000,
                    surface: Surface::Grass,
                })
                .unwrap()
        };
        let dragao = venue("Dragao");
        let bessa = venue("Bessa");
        tournament
            .create_match(&NewMatch {
                venue_id: Some(dragao.id),
                ..fixture(a, b, kickoff())
            })
            .unwrap();

        let free = tournament.available_venues(kickoff().date());
        let next_day = tournament.available_venues(kickoff().date() + Duration::days(1));

        assert_eq!(free, vec![bessa]);
        assert_eq!(next_day.len(), 2);
    }

    #[test]
    fn test_initialize_season_keeps_only_finished_matches() {
        let (tournament, _) = tournament();
        let a = team(&tournament, "Porto");
        let b = team(&tournament, "Braga");
        let finished = tournament.create_match(&fixture(a, b, kickoff())).unwrap();
        tournament.start_match(finished.id).unwrap();
        tournament.complete_match(finished.id, Some(3), Some(0)).unwrap();
        tournament.create_match(&fixture(b, a, kickoff() + Duration::days(7))).unwrap();
        let cancelled = tournament
            .create_match(&fixture(a, b, kickoff() + Duration::days(14)))
            .unwrap();
        tournament.cancel_match(cancelled.id).unwrap();

        let summary = tournament.initialize_season();

        assert_eq!(
            summary,
            SeasonSummary {
                removed_matches: 2,
                standings: 2,
            }
        );
        let left = tournament.matches().list();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, finished.id);
        assert!(tournament.standings().iter().all(|s| s.points == 0 && s.played == 0));
        assert_eq!(tournament.clubs().get_team(a).unwrap().points, 0);

        // the emptied calendar takes new fixtures again
        tournament.create_match(&fixture(b, a, kickoff() + Duration::days(7))).unwrap();
    }

    #[test]
    fn test_kickoff_past_end_of_calendar_is_invalid_input() {
        let (tournament, _) = tournament();
        let a = team(&tournament, "Porto");
        let b = team(&tournament, "Braga");

        let err = tournament
            .create_match(&fixture(a, b, NaiveDateTime::MAX - Duration::minutes(30)))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(tournament.matches().list().is_empty());
    }
}
