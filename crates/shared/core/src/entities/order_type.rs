use serde::{Deserialize, Serialize};

/// Order types the routing layer accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Execute at specified price or better
    Limit,
    /// Execute at current market price
    Market,
}
