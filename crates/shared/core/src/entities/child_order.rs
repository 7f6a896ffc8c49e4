use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrderType, PositionEffect, Side};
use crate::values::{Price, Quantity, Symbol};

/// Unique identifier for a child order
pub type OrderId = Uuid;

/// A single child order emitted by an execution algorithm.
///
/// Ownership passes to the order-routing layer once placed; the
/// algorithm keeps only the id and resting price for reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildOrder {
    pub id: OrderId,
    pub symbol: Symbol,
    pub side: Side,
    pub order_type: OrderType,
    /// Limit price; None for market orders
    pub price: Option<Price>,
    pub quantity: Quantity,
    pub sub_account: String,
    pub position_effect: PositionEffect,
}

impl ChildOrder {
    /// Create a limit child order
    pub fn limit(
        symbol: impl Into<Symbol>,
        side: Side,
        quantity: Quantity,
        price: Price,
        sub_account: impl Into<String>,
        position_effect: PositionEffect,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            price: Some(price),
            quantity,
            sub_account: sub_account.into(),
            position_effect,
        }
    }

    /// Create a market child order (no limit price)
    pub fn market(
        symbol: impl Into<Symbol>,
        side: Side,
        quantity: Quantity,
        sub_account: impl Into<String>,
        position_effect: PositionEffect,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            price: None,
            quantity,
            sub_account: sub_account.into(),
            position_effect,
        }
    }

    pub fn is_market(&self) -> bool {
        self.order_type == OrderType::Market
    }

    /// Resting price, ZERO when the order has none (market orders)
    pub fn price_or_zero(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }
}
