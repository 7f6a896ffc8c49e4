//! Tempo Core Domain
//!
//! Pure domain types for the Tempo execution engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod instruments;
pub mod market;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    ChildOrder, Confirmation, ConfirmationKind, OrderId, OrderType, PositionEffect, Side,
};
pub use instruments::{Exchange, Security, SecurityKind};
pub use market::MarketSnapshot;
pub use values::{Price, Quantity, Symbol, Timestamp};
