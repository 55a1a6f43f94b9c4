use crate::error::{EngineResult, LeagueError};
use crate::r#match::{Match, MatchLifecycle, NewMatch};
use chrono::{Duration, NaiveDateTime};
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

/// Gap between consecutive kickoffs of one round.
pub const ROUND_SLOT_SPACING: Duration = Duration::hours(3);

/// What a round generation produced. Not atomic: when a pair fails, the
/// matches created before it stay and `failure` holds the error.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSchedule {
    pub matches: Vec<Match>,
    pub requested_pairs: usize,
    #[serde(skip)]
    pub failure: Option<LeagueError>,
}

impl RoundSchedule {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.matches.len() == self.requested_pairs
    }

    pub fn into_result(self) -> EngineResult<Vec<Match>> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.matches),
        }
    }
}

pub struct RoundScheduler {
    lifecycle: Arc<MatchLifecycle>,
}

impl RoundScheduler {
    pub fn new(lifecycle: Arc<MatchLifecycle>) -> Self {
        RoundScheduler { lifecycle }
    }

    /// Pairs `team_ids` in the given order (0 v 1, 2 v 3, ...) and schedules
    /// pair `k` at `round_start + k * 3h`, all at the same venue.
    pub fn generate_round(
        &self,
        team_ids: &[u32],
        round_start: NaiveDateTime,
        venue_id: Option<u32>,
    ) -> EngineResult<RoundSchedule> {
        if team_ids.len() % 2 != 0 {
            return Err(LeagueError::InvalidInput(format!(
                "number of teams must be even, got {}",
                team_ids.len()
            )));
        }

        let requested_pairs = team_ids.len() / 2;
        let mut schedule = RoundSchedule {
            matches: Vec::with_capacity(requested_pairs),
            requested_pairs,
            failure: None,
        };

        for (slot, pair) in team_ids.chunks_exact(2).enumerate() {
            let created = Self::slot_kickoff(round_start, slot).and_then(|kickoff| {
                self.lifecycle.create(&NewMatch {
                    home_team_id: pair[0],
                    away_team_id: pair[1],
                    venue_id,
                    kickoff,
                })
            });

            match created {
                Ok(created) => schedule.matches.push(created),
                Err(err) => {
                    warn!(
                        "round stopped at pair {} ({} vs {}): {}",
                        slot, pair[0], pair[1], err
                    );
                    schedule.failure = Some(err);
                    break;
                }
            }
        }

        info!(
            "round from {}: {} of {} matches created",
            round_start,
            schedule.matches.len(),
            requested_pairs
        );

        Ok(schedule)
    }

    fn slot_kickoff(round_start: NaiveDateTime, slot: usize) -> EngineResult<NaiveDateTime> {
        i32::try_from(slot)
            .ok()
            .and_then(|slot| ROUND_SLOT_SPACING.checked_mul(slot))
            .and_then(|offset| round_start.checked_add_signed(offset))
            .ok_or_else(|| {
                LeagueError::InvalidInput(format!(
                    "slot {} of the round starting {} is out of range",
                    slot, round_start
                ))
            })
    }
}
