use crate::club::Venue;
use crate::r#match::{Match, MatchStatus};
use crate::store::Repositories;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Venues with no (non-cancelled) match on the given calendar day.
pub fn available_venues(repositories: &Repositories, day: NaiveDate) -> Vec<Venue> {
    let busy: HashSet<u32> = repositories
        .matches
        .find_by(&|m: &Match| m.kickoff.date() == day && m.status != MatchStatus::Cancelled)
        .iter()
        .filter_map(|m| m.venue_id)
        .collect();

    repositories
        .venues
        .find_by(&|v: &Venue| !busy.contains(&v.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Surface;

    fn venue(name: &str) -> Venue {
        Venue {
            id: 0,
            name: name.to_string(),
            city: String::from("Madrid"),
            capacity: 1000,
            surface: Surface::Grass,
        }
    }

    #[test]
    fn test_busy_venue_excluded_on_that_day_only() {
        let repositories = Repositories::in_memory();
        let busy = repositories.venues.save(venue("Bernabeu"));
        let free = repositories.venues.save(venue("Metropolitano"));
        let day = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();

        repositories.matches.save(Match::scheduled(
            1,
            2,
            Some(busy.id),
            day.and_hms_opt(20, 0, 0).unwrap(),
        ));
        let mut cancelled = Match::scheduled(3, 4, Some(free.id), day.and_hms_opt(16, 0, 0).unwrap());
        cancelled.status = MatchStatus::Cancelled;
        repositories.matches.save(cancelled);

        let on_day: Vec<u32> = available_venues(&repositories, day).iter().map(|v| v.id).collect();
        let next_day = available_venues(&repositories, day.succ_opt().unwrap());

        assert_eq!(on_day, vec![free.id]);
        assert_eq!(next_day.len(), 2);
    }
}
