mod player;
mod team;
mod venue;

pub use player::*;
pub use team::*;
pub use venue::*;
