use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Exchange;
use crate::values::{Price, Quantity, Symbol};

/// Broad instrument classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityKind {
    Stock,
    Etf,
    Future,
}

/// Static reference data for a tradeable security
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Security {
    pub symbol: Symbol,
    pub exchange: Exchange,
    pub kind: SecurityKind,
    /// Minimum price increment
    pub tick_size: Price,
    /// Minimum quantity increment; ZERO when the security has no lot size
    pub lot_size: Quantity,
}

impl Security {
    pub fn new(
        symbol: impl Into<Symbol>,
        exchange: Exchange,
        kind: SecurityKind,
        tick_size: Price,
        lot_size: Quantity,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            exchange,
            kind,
            tick_size,
            lot_size,
        }
    }

    pub fn has_lot_size(&self) -> bool {
        self.lot_size > Decimal::ZERO
    }

    /// Round a price to the nearest valid tick.
    /// Feed prices are not guaranteed to be tick-aligned.
    pub fn round_price(&self, price: Price) -> Price {
        if self.tick_size == Decimal::ZERO {
            return price;
        }
        (price / self.tick_size).round() * self.tick_size
    }

    /// Round a quantity to the nearest lot multiple
    pub fn round_lot_nearest(&self, quantity: Quantity) -> Quantity {
        if !self.has_lot_size() {
            return quantity;
        }
        (quantity / self.lot_size).round() * self.lot_size
    }

    /// Round a quantity down to a lot multiple
    pub fn round_lot_down(&self, quantity: Quantity) -> Quantity {
        if !self.has_lot_size() {
            return quantity;
        }
        (quantity / self.lot_size).floor() * self.lot_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cn_stock() -> Security {
        Security::new(
            "600000",
            Exchange::new("SSE", "CN").with_markdown_restriction(true),
            SecurityKind::Stock,
            dec!(0.01),
            dec!(100),
        )
    }

    #[test]
    fn test_round_price_nearest_tick() {
        let sec = cn_stock();
        assert_eq!(sec.round_price(dec!(10.014)), dec!(10.01));
        assert_eq!(sec.round_price(dec!(10.015)), dec!(10.02));
        assert_eq!(sec.round_price(dec!(10.02)), dec!(10.02));
    }

    #[test]
    fn test_round_lot() {
        let sec = cn_stock();
        assert_eq!(sec.round_lot_nearest(dec!(149)), dec!(100));
        assert_eq!(sec.round_lot_nearest(dec!(150)), dec!(200));
        assert_eq!(sec.round_lot_down(dec!(199)), dec!(100));
    }

    #[test]
    fn test_no_lot_size_passthrough() {
        let mut sec = cn_stock();
        sec.lot_size = Decimal::ZERO;
        assert!(!sec.has_lot_size());
        assert_eq!(sec.round_lot_nearest(dec!(149)), dec!(149));
        assert_eq!(sec.round_lot_down(dec!(149)), dec!(149));
    }
}
