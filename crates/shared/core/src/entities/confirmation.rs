use serde::{Deserialize, Serialize};

use super::OrderId;
use crate::values::{Price, Quantity, Timestamp};

/// What the routing layer is confirming
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConfirmationKind {
    /// Order accepted and resting
    Accepted,
    /// Partial or full fill for `quantity` at `price`
    Fill { quantity: Quantity, price: Price },
    /// Order canceled; nothing further will happen to it
    Canceled,
    /// Order rejected by the venue
    Rejected,
}

/// Asynchronous callback payload from the order-routing collaborator.
///
/// Confirmations are delivered serially with respect to timer ticks and
/// market-data updates; they are never reentrant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmation {
    pub order_id: OrderId,
    pub kind: ConfirmationKind,
    pub timestamp: Timestamp,
}

impl Confirmation {
    pub fn new(order_id: OrderId, kind: ConfirmationKind, timestamp: Timestamp) -> Self {
        Self {
            order_id,
            kind,
            timestamp,
        }
    }

    /// True if the order is done after this confirmation
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            ConfirmationKind::Canceled | ConfirmationKind::Rejected
        )
    }
}
