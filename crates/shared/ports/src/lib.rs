//! Tempo Ports
//!
//! Port definitions (traits) for the Tempo execution engine.
//! These define the boundaries between the algorithm and infrastructure.

mod clock;
mod random;

pub use clock::Clock;
pub use random::RandomSource;
