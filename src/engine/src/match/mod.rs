mod fixture;
mod lifecycle;

pub use fixture::*;
pub use lifecycle::*;
