mod player;
mod service;
mod team;
mod venue;

pub use player::*;
pub use service::*;
pub use team::*;
pub use venue::*;
