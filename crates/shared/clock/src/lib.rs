//! Tempo Clock Infrastructure
//!
//! Time sources for the execution engine:
//! - `SystemClock` — wall clock for production
//! - `FixedClock` — settable/advanceable clock for deterministic tests
//!   and backtests

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use tempo_ports::Clock;
