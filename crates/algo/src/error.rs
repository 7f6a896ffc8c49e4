//! Execution algorithm errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlgoError {
    #[error("Too short ValidSeconds ({seconds}), must be >= 60")]
    WindowTooShort { seconds: i64 },

    #[error("MinSize required for security without lot size")]
    MissingMinSize,

    #[error("Invalid aggression '{0}', must be in (Low, Medium, High, Highest)")]
    InvalidAggression(String),

    #[error("Algorithm already started")]
    AlreadyStarted,

    #[error("Total quantity must be positive")]
    InvalidQuantity,
}

pub type Result<T> = std::result::Result<T, AlgoError>;
