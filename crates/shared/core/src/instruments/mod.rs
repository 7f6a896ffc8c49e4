//! Instrument definitions for tradeable securities
//!
//! A `Security` carries the static reference data an execution algorithm
//! needs: tick size, lot size, and the venue capabilities that shape
//! order sizing and pricing rules.

mod exchange;
mod security;

pub use exchange::Exchange;
pub use security::{Security, SecurityKind};
