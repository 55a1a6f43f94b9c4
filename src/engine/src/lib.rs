pub mod clock;
pub mod club;
pub mod error;
pub mod league;
pub mod locks;
pub mod r#match;
pub mod schedule;
pub mod store;
pub mod tournament;

pub use error::{EngineResult, ErrorKind, LeagueError};
pub use tournament::Tournament;
