mod ledger;
mod standing;
pub mod statistics;

pub use ledger::*;
pub use standing::*;
pub use statistics::{LeagueStatistics, TeamStatistics, TopScorer};
