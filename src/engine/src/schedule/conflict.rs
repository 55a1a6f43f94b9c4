use crate::error::{EngineResult, LeagueError};
use crate::r#match::{Match, MatchStatus};
use crate::store::EntityStore;
use chrono::{Duration, NaiveDateTime};
use log::warn;
use std::sync::Arc;

/// How long a team is considered busy after a kickoff.
pub const MATCH_DURATION: Duration = Duration::hours(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ConflictWindow {
    /// Fails for kickoffs so late that the window end is not representable.
    pub fn for_kickoff(kickoff: NaiveDateTime) -> EngineResult<Self> {
        let end = kickoff.checked_add_signed(MATCH_DURATION).ok_or_else(|| {
            LeagueError::InvalidInput(format!("kickoff {} is out of range", kickoff))
        })?;

        Ok(ConflictWindow {
            start: kickoff,
            end,
        })
    }

    /// Half-open: `[start, end)`.
    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        moment >= self.start && moment < self.end
    }
}

pub struct ConflictChecker {
    matches: Arc<dyn EntityStore<Match>>,
}

impl ConflictChecker {
    pub fn new(matches: Arc<dyn EntityStore<Match>>) -> Self {
        ConflictChecker { matches }
    }

    pub fn has_conflict(&self, team_id: u32, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        !self
            .conflicting_matches(team_id, ConflictWindow { start, end }, None)
            .is_empty()
    }

    /// Unfinished matches of the team kicking off inside the window. Only
    /// `FINISHED` matches are ignored.
    pub fn conflicting_matches(
        &self,
        team_id: u32,
        window: ConflictWindow,
        exclude_match_id: Option<u32>,
    ) -> Vec<Match> {
        self.matches.find_by(&|m: &Match| {
            m.status != MatchStatus::Finished
                && m.involves(team_id)
                && window.contains(m.kickoff)
                && Some(m.id) != exclude_match_id
        })
    }

    /// Checks both sides of a candidate fixture independently.
    pub fn ensure_free(
        &self,
        home_team_id: u32,
        away_team_id: u32,
        kickoff: NaiveDateTime,
        exclude_match_id: Option<u32>,
    ) -> EngineResult<()> {
        let window = ConflictWindow::for_kickoff(kickoff)?;

        for team_id in [home_team_id, away_team_id] {
            let conflicts = self.conflicting_matches(team_id, window, exclude_match_id);

            if let Some(existing) = conflicts.first() {
                warn!(
                    "team {} already plays match {} at {}, rejecting kickoff {}",
                    team_id, existing.id, existing.kickoff, kickoff
                );

                return Err(LeagueError::Conflict(format!(
                    "team {} has a scheduling conflict with match {}",
                    team_id, existing.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 14)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn checker_with(matches: Vec<Match>) -> ConflictChecker {
        let store: Arc<dyn EntityStore<Match>> = Arc::new(MemoryStore::<Match>::new());
        for m in matches {
            store.save(m);
        }
        ConflictChecker::new(store)
    }

    #[test]
    fn test_same_kickoff_conflicts() {
        let checker = checker_with(vec![Match::scheduled(1, 2, None, at(15))]);

        assert!(checker.has_conflict(1, at(15), at(17)));
        assert!(checker.has_conflict(2, at(14), at(16)));
        assert!(!checker.has_conflict(3, at(15), at(17)));
    }

    #[test]
    fn test_window_end_is_exclusive() {
        let checker = checker_with(vec![Match::scheduled(1, 2, None, at(17))]);

        assert!(!checker.has_conflict(1, at(15), at(17)));
        assert!(checker.ensure_free(1, 5, at(18), None).is_ok());
    }

    #[test]
    fn test_finished_matches_do_not_block() {
        let mut finished = Match::scheduled(1, 2, None, at(15));
        finished.status = MatchStatus::Finished;
        let checker = checker_with(vec![finished]);

        assert!(checker.ensure_free(1, 2, at(15), None).is_ok());
    }

    #[test]
    fn test_away_side_is_checked() {
        let checker = checker_with(vec![Match::scheduled(7, 8, None, at(16))]);

        let err = checker.ensure_free(3, 8, at(15), None).unwrap_err();

        assert_eq!(err.kind(), crate::ErrorKind::Conflict);
    }

    #[test]
    fn test_kickoff_at_end_of_calendar_is_rejected() {
        let checker = checker_with(Vec::new());
        let late = NaiveDateTime::MAX - Duration::hours(1);

        let err = checker.ensure_free(1, 2, late, None).unwrap_err();

        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_excluded_match_is_ignored() {
        let checker = checker_with(vec![Match::scheduled(1, 2, None, at(15))]);

        assert!(checker.ensure_free(1, 2, at(15), Some(1)).is_ok());
    }
}
