use crate::store::Entity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const WIN_POINTS: u32 = 3;
pub const DRAW_POINTS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    pub fn from_goals(scored: u16, conceded: u16) -> Self {
        match scored.cmp(&conceded) {
            Ordering::Greater => MatchOutcome::Win,
            Ordering::Less => MatchOutcome::Loss,
            Ordering::Equal => MatchOutcome::Draw,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            MatchOutcome::Win => WIN_POINTS,
            MatchOutcome::Draw => DRAW_POINTS,
            MatchOutcome::Loss => 0,
        }
    }
}

/// Per-team row of the league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: u32,
    pub team_id: u32,
    pub position: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
}

impl Standing {
    pub fn new(team_id: u32) -> Self {
        Standing {
            id: 0,
            team_id,
            position: 0,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    /// Books one finished match from this team's point of view.
    pub fn record(&mut self, scored: u16, conceded: u16) -> MatchOutcome {
        let outcome = MatchOutcome::from_goals(scored, conceded);

        self.played += 1;
        self.goals_for += scored as u32;
        self.goals_against += conceded as u32;

        match outcome {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Loss => self.losses += 1,
        }

        self.points += outcome.points();
        self.refresh_goal_difference();

        outcome
    }

    pub fn refresh_goal_difference(&mut self) {
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;
    }

    pub fn reset(&mut self) {
        *self = Standing {
            id: self.id,
            ..Standing::new(self.team_id)
        };
    }

    /// Table order: points, then goal difference, then goals scored, all
    /// descending. Anything still level compares equal.
    pub fn table_order(&self, other: &Standing) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.goal_difference.cmp(&self.goal_difference))
            .then_with(|| other.goals_for.cmp(&self.goals_for))
    }
}

impl Entity for Standing {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingUpdate {
    pub played: Option<u32>,
    pub wins: Option<u32>,
    pub draws: Option<u32>,
    pub losses: Option<u32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    pub points: Option<u32>,
}

impl StandingUpdate {
    pub fn apply(&self, standing: &mut Standing) {
        if let Some(played) = self.played {
            standing.played = played;
        }
        if let Some(wins) = self.wins {
            standing.wins = wins;
        }
        if let Some(draws) = self.draws {
            standing.draws = draws;
        }
        if let Some(losses) = self.losses {
            standing.losses = losses;
        }
        if let Some(goals_for) = self.goals_for {
            standing.goals_for = goals_for;
        }
        if let Some(goals_against) = self.goals_against {
            standing.goals_against = goals_against;
        }
        if let Some(points) = self.points {
            standing.points = points;
        }

        standing.refresh_goal_difference();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_win_and_loss() {
        let mut home = Standing::new(1);
        let mut away = Standing::new(2);

        assert_eq!(home.record(3, 1), MatchOutcome::Win);
        assert_eq!(away.record(1, 3), MatchOutcome::Loss);

        assert_eq!(home.points, 3);
        assert_eq!(home.goal_difference, 2);
        assert_eq!(away.points, 0);
        assert_eq!(away.goal_difference, -2);
        assert_eq!(away.losses, 1);
    }

    #[test]
    fn test_record_draw() {
        let mut standing = Standing::new(1);

        assert_eq!(standing.record(2, 2), MatchOutcome::Draw);
        assert_eq!(standing.draws, 1);
        assert_eq!(standing.points, 1);
        assert_eq!(standing.goal_difference, 0);
    }

    #[test]
    fn test_table_order_uses_goal_difference_on_equal_points() {
        let mut a = Standing::new(1);
        a.points = 10;
        a.goal_difference = 2;
        let mut b = Standing::new(2);
        b.points = 10;
        b.goal_difference = 5;

        assert_eq!(b.table_order(&a), Ordering::Less);
        assert_eq!(a.table_order(&b), Ordering::Greater);
    }

    #[test]
    fn test_update_recomputes_goal_difference() {
        let mut standing = Standing::new(1);
        standing.goals_for = 4;

        StandingUpdate {
            goals_against: Some(7),
            ..Default::default()
        }
        .apply(&mut standing);

        assert_eq!(standing.goal_difference, -3);
    }

    #[test]
    fn test_reset_keeps_identity() {
        let mut standing = Standing::new(9);
        standing.id = 4;
        standing.record(1, 0);
        standing.position = 2;

        standing.reset();

        assert_eq!(standing, Standing { id: 4, ..Standing::new(9) });
    }
}
