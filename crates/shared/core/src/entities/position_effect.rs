use serde::{Deserialize, Serialize};

/// Whether an order opens a new position or closes an existing one.
///
/// Relevant on venues that distinguish the two for regulatory or
/// margin purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionEffect {
    Open,
    Close,
}
