mod conflict;
mod round;
mod venues;

pub use conflict::*;
pub use round::*;
pub use venues::*;
