use crate::error::{EngineResult, LeagueError};
use crate::store::Entity;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Finished,
    Cancelled,
}

impl MatchStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Finished | MatchStatus::Cancelled)
    }

    /// Whether the match occupies its teams for scheduling purposes.
    pub fn is_active(&self) -> bool {
        matches!(self, MatchStatus::Scheduled | MatchStatus::InProgress)
    }

    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        use MatchStatus::*;

        matches!(
            (self, next),
            (Scheduled, InProgress)
                | (Scheduled, Finished)
                | (Scheduled, Cancelled)
                | (InProgress, Finished)
                | (InProgress, Cancelled)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub home: u16,
    pub away: u16,
}

impl MatchScore {
    pub fn new(home: u16, away: u16) -> Self {
        MatchScore { home, away }
    }

    /// Validates raw caller-supplied goals: both required, neither negative.
    pub fn parse(home: Option<i64>, away: Option<i64>) -> EngineResult<Self> {
        match (home, away) {
            (Some(home), Some(away)) => Ok(MatchScore {
                home: Self::goals(home, "home")?,
                away: Self::goals(away, "away")?,
            }),
            _ => Err(LeagueError::InvalidScore(String::from(
                "both home and away scores are required",
            ))),
        }
    }

    fn goals(value: i64, side: &str) -> EngineResult<u16> {
        u16::try_from(value).map_err(|_| {
            LeagueError::InvalidScore(format!("{} score {} is not a valid goal count", side, value))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: u32,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub venue_id: Option<u32>,
    pub kickoff: NaiveDateTime,
    pub score: Option<MatchScore>,
    pub status: MatchStatus,
}

impl Match {
    pub fn scheduled(
        home_team_id: u32,
        away_team_id: u32,
        venue_id: Option<u32>,
        kickoff: NaiveDateTime,
    ) -> Self {
        Match {
            id: 0,
            home_team_id,
            away_team_id,
            venue_id,
            kickoff,
            score: None,
            status: MatchStatus::Scheduled,
        }
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Goals (scored, conceded) for the given side, if the match has a score.
    pub fn goals_for(&self, team_id: u32) -> Option<(u16, u16)> {
        let score = self.score?;

        if self.home_team_id == team_id {
            Some((score.home, score.away))
        } else if self.away_team_id == team_id {
            Some((score.away, score.home))
        } else {
            None
        }
    }
}

impl Entity for Match {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMatch {
    pub home_team_id: u32,
    pub away_team_id: u32,
    #[serde(default)]
    pub venue_id: Option<u32>,
    pub kickoff: NaiveDateTime,
}

/// Partial edit of a match; `None` leaves the field as it is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchUpdate {
    pub home_team_id: Option<u32>,
    pub away_team_id: Option<u32>,
    pub venue_id: Option<u32>,
    pub kickoff: Option<NaiveDateTime>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub status: Option<MatchStatus>,
}

impl MatchUpdate {
    pub fn has_field_changes(&self) -> bool {
        self.home_team_id.is_some()
            || self.away_team_id.is_some()
            || self.venue_id.is_some()
            || self.kickoff.is_some()
            || self.has_score()
    }

    pub fn has_score(&self) -> bool {
        self.home_score.is_some() || self.away_score.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_terminal_states_have_no_exit() {
        for next in [
            MatchStatus::Scheduled,
            MatchStatus::InProgress,
            MatchStatus::Finished,
            MatchStatus::Cancelled,
        ] {
            assert!(!MatchStatus::Finished.can_transition_to(next));
            assert!(!MatchStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_in_progress_cannot_go_back() {
        assert!(!MatchStatus::InProgress.can_transition_to(MatchStatus::Scheduled));
        assert!(MatchStatus::InProgress.can_transition_to(MatchStatus::Finished));
        assert!(MatchStatus::Scheduled.can_transition_to(MatchStatus::Cancelled));
    }

    #[test]
    fn test_score_parse_rejects_missing_and_negative() {
        assert_eq!(MatchScore::parse(Some(2), Some(0)).unwrap(), MatchScore::new(2, 0));
        assert_eq!(
            MatchScore::parse(Some(-1), Some(0)).unwrap_err().kind(),
            ErrorKind::InvalidScore
        );
        assert_eq!(
            MatchScore::parse(None, Some(1)).unwrap_err().kind(),
            ErrorKind::InvalidScore
        );
    }

    #[test]
    fn test_goals_for_is_side_aware() {
        let kickoff = chrono::NaiveDate::from_ymd_opt(2024, 9, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        let mut game = Match::scheduled(1, 2, None, kickoff);
        assert_eq!(game.goals_for(1), None);

        game.score = Some(MatchScore::new(3, 1));

        assert_eq!(game.goals_for(1), Some((3, 1)));
        assert_eq!(game.goals_for(2), Some((1, 3)));
        assert_eq!(game.goals_for(3), None);
    }
}
