use crate::club::{Player, PlayerPosition};
use crate::league::{MatchOutcome, Standing};
use crate::r#match::{Match, MatchStatus};
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

const TITLE_ZONE_SIZE: usize = 4;
const RELEGATION_ZONE_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueStatistics {
    pub total_teams: usize,
    pub total_matches: u32,
    pub total_goals: u32,
    pub average_goals_per_match: f64,
    pub best_attack: Option<Standing>,
    pub best_defense: Option<Standing>,
    pub title_zone: Vec<Standing>,
    pub relegation_zone: Vec<Standing>,
}

impl LeagueStatistics {
    /// `table` is expected in table order.
    pub fn from_table(table: &[Standing]) -> Self {
        // every match is counted once per side
        let total_matches = table.iter().map(|s| s.played).sum::<u32>() / 2;
        let total_goals = table.iter().map(|s| s.goals_for).sum::<u32>();

        let average_goals_per_match = if total_matches > 0 {
            (total_goals as f64 / total_matches as f64 * 100.0).round() / 100.0
        } else {
            0.0
        };

        let relegation_from = table.len().saturating_sub(RELEGATION_ZONE_SIZE);

        LeagueStatistics {
            total_teams: table.len(),
            total_matches,
            total_goals,
            average_goals_per_match,
            best_attack: table.iter().max_set_by_key(|s| s.goals_for).into_iter().next().cloned(),
            best_defense: table.iter().min_by_key(|s| s.goals_against).cloned(),
            title_zone: table.iter().take(TITLE_ZONE_SIZE).cloned().collect(),
            relegation_zone: table[relegation_from..].to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopScorer {
    pub player_id: u32,
    pub name: String,
    pub goals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStatistics {
    pub team_id: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub win_rate: f64,
    pub squad_size: usize,
    pub average_age: f64,
    pub top_scorer: Option<TopScorer>,
    pub positions: HashMap<PlayerPosition, usize>,
}

impl TeamStatistics {
    /// Recomputed from finished matches rather than read from the table.
    pub fn collect(team_id: u32, matches: &[Match], squad: &[Player]) -> Self {
        let mut stats = TeamStatistics {
            team_id,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            win_rate: 0.0,
            squad_size: squad.len(),
            average_age: 0.0,
            top_scorer: None,
            positions: squad.iter().filter_map(|p| p.position).counts(),
        };

        let results = matches
            .iter()
            .filter(|m| m.status == MatchStatus::Finished)
            .filter_map(|m| m.goals_for(team_id));

        for (scored, conceded) in results {
            stats.played += 1;
            stats.goals_for += scored as u32;
            stats.goals_against += conceded as u32;

            match MatchOutcome::from_goals(scored, conceded) {
                MatchOutcome::Win => stats.wins += 1,
                MatchOutcome::Draw => stats.draws += 1,
                MatchOutcome::Loss => stats.losses += 1,
            }
        }

        stats.goal_difference = stats.goals_for as i32 - stats.goals_against as i32;

        if stats.played > 0 {
            stats.win_rate = stats.wins as f64 / stats.played as f64 * 100.0;
        }

        if !squad.is_empty() {
            let total_age: u32 = squad.iter().map(|p| p.age as u32).sum();
            stats.average_age = (total_age as f64 / squad.len() as f64 * 100.0).round() / 100.0;
        }

        stats.top_scorer = squad
            .iter()
            .filter(|p| p.goals > 0)
            .max_by_key(|p| p.goals)
            .map(|p| TopScorer {
                player_id: p.id,
                name: p.name.clone(),
                goals: p.goals,
            });

        stats
    }
}
