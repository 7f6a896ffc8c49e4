//! Market data snapshot consumed by execution algorithms
//!
//! Produced by the market-data subscription collaborator and refreshed on
//! every quote/trade update; the algorithm only ever reads it.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Price, Quantity, Symbol, Timestamp};

/// Point-in-time view of the market for one security
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: Symbol,
    /// Best bid, present only when a positive bid exists
    pub bid: Option<Price>,
    pub bid_size: Option<Quantity>,
    /// Best ask, present only when a positive ask exists
    pub ask: Option<Price>,
    pub ask_size: Option<Quantity>,
    /// Last trade price; may not be tick-aligned
    pub last: Option<Price>,
    /// Cumulative traded volume since the subscription started
    pub volume: Quantity,
    /// Whether the security is inside its tradable period
    pub in_trade_period: bool,
    pub timestamp: Timestamp,
}

impl MarketSnapshot {
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            bid: None,
            bid_size: None,
            ask: None,
            ask_size: None,
            last: None,
            volume: Decimal::ZERO,
            in_trade_period: true,
            timestamp: Utc::now(),
        }
    }

    pub fn with_bbo(mut self, bid: Price, ask: Price) -> Self {
        self.bid = (bid > Decimal::ZERO).then_some(bid);
        self.ask = (ask > Decimal::ZERO).then_some(ask);
        self
    }

    pub fn with_sizes(mut self, bid_size: Quantity, ask_size: Quantity) -> Self {
        self.bid_size = Some(bid_size);
        self.ask_size = Some(ask_size);
        self
    }

    pub fn with_last(mut self, last: Price) -> Self {
        self.last = (last > Decimal::ZERO).then_some(last);
        self
    }

    pub fn with_volume(mut self, volume: Quantity) -> Self {
        self.volume = volume;
        self
    }

    pub fn halted(mut self) -> Self {
        self.in_trade_period = false;
        self
    }

    pub fn mid_price(&self) -> Option<Price> {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) => Some((b + a) / Decimal::TWO),
            _ => None,
        }
    }

    pub fn spread(&self) -> Option<Price> {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) => Some(a - b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_quotes_are_absent() {
        let snap = MarketSnapshot::new("600000").with_bbo(Decimal::ZERO, dec!(10.02));
        assert!(snap.bid.is_none());
        assert_eq!(snap.ask, Some(dec!(10.02)));
        assert!(snap.mid_price().is_none());
    }

    #[test]
    fn test_mid_and_spread() {
        let snap = MarketSnapshot::new("600000")
            .with_bbo(dec!(10.00), dec!(10.02))
            .with_sizes(dec!(2000), dec!(1500));
        assert_eq!(snap.mid_price(), Some(dec!(10.01)));
        assert_eq!(snap.spread(), Some(dec!(0.02)));
        assert_eq!(snap.bid_size, Some(dec!(2000)));
        assert_eq!(snap.ask_size, Some(dec!(1500)));
    }
}
