//! Price selector
//!
//! Maps an aggression level plus the current quote view to a limit or
//! market price decision. Each level is an ordered chain of priced
//! candidates evaluated top-down; a level falls through to the next only
//! when its preferred price is unavailable. `None` means abstain this
//! tick and retry on the next one - a transient condition, not an error.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use tempo_core::{MarketSnapshot, PositionEffect, Price, Security, SecurityKind, Side};

use crate::error::AlgoError;

/// How aggressively child orders are priced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggression {
    /// Rest on our own side of the book
    Low,
    /// Midpoint, falling back to High
    Medium,
    /// Cross to the far touch, falling back to Highest
    High,
    /// Market order
    Highest,
}

impl FromStr for Aggression {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Aggression::Low),
            "Medium" => Ok(Aggression::Medium),
            "High" => Ok(Aggression::High),
            "Highest" => Ok(Aggression::Highest),
            other => Err(AlgoError::InvalidAggression(other.to_string())),
        }
    }
}

impl fmt::Display for Aggression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Aggression::Low => "Low",
            Aggression::Medium => "Medium",
            Aggression::High => "High",
            Aggression::Highest => "Highest",
        };
        f.write_str(s)
    }
}

/// Outcome of price selection for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderPrice {
    Limit(Price),
    Market,
}

/// The slice of the snapshot the selector prices against.
/// `last` is already rounded to the instrument's tick.
#[derive(Debug, Clone, Copy)]
pub struct QuoteView {
    pub bid: Option<Price>,
    pub ask: Option<Price>,
    pub last: Option<Price>,
}

impl QuoteView {
    pub fn from_snapshot(md: &MarketSnapshot, security: &Security) -> Self {
        Self {
            bid: md.bid,
            ask: md.ask,
            // feed last prices may not be tick-aligned
            last: md.last.map(|px| security.round_price(px)),
        }
    }

    /// Rounded midpoint, defined only when ask > bid > 0
    fn mid(&self, security: &Security) -> Option<Price> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) if ask > bid => {
                Some(security.round_price((ask + bid) / Decimal::TWO))
            }
            _ => None,
        }
    }

    fn is_empty(&self) -> bool {
        self.bid.is_none() && self.ask.is_none() && self.last.is_none()
    }
}

/// Policy hook for venue rules that forbid pricing below the last trade.
/// Kept pluggable: the predicate is narrow and market-specific.
pub trait MarkdownPolicy: Send + Sync {
    fn forbids_markdown(&self, security: &Security, side: Side, effect: PositionEffect) -> bool;
}

/// No restriction on any venue
pub struct MarkdownAllowed;

impl MarkdownPolicy for MarkdownAllowed {
    fn forbids_markdown(&self, _: &Security, _: Side, _: PositionEffect) -> bool {
        false
    }
}

/// Opening sells of stocks may not be priced below the last trade on
/// venues that flag the restriction
pub struct OpenSellNoMarkdown;

impl MarkdownPolicy for OpenSellNoMarkdown {
    fn forbids_markdown(&self, security: &Security, side: Side, effect: PositionEffect) -> bool {
        effect == PositionEffect::Open
            && side == Side::Sell
            && security.kind == SecurityKind::Stock
            && security.exchange.restricts_markdown
    }
}

/// Select the price for this tick's child order.
///
/// Fallback precedence:
/// - Low: own touch, else last, else abstain
/// - Medium: rounded midpoint, else High
/// - High: far touch, else Highest
/// - Highest: market order
///
/// A completely empty market (no bid, ask, or last) abstains at every
/// level except an explicit Highest; fallthrough never degrades into a
/// blind market order with nothing to price against.
///
/// After selection a configured limit clamps the price (buys never above
/// it, sells never below it), then the no-markdown rule raises a price
/// resting below the last trade up to it.
pub fn select_price(
    aggression: Aggression,
    side: Side,
    quotes: &QuoteView,
    security: &Security,
    limit: Option<Price>,
    no_markdown: bool,
) -> Option<OrderPrice> {
    if aggression != Aggression::Highest && quotes.is_empty() {
        return None;
    }

    let raw = match aggression {
        Aggression::Low => {
            let px = match side {
                Side::Buy => quotes.bid.or(quotes.last),
                Side::Sell => quotes.ask.or(quotes.last),
            };
            px.map(OrderPrice::Limit)?
        }
        Aggression::Medium => match quotes.mid(security) {
            Some(mid) => OrderPrice::Limit(mid),
            None => far_touch(side, quotes),
        },
        Aggression::High => far_touch(side, quotes),
        Aggression::Highest => OrderPrice::Market,
    };

    let decided = match raw {
        OrderPrice::Market => OrderPrice::Market,
        OrderPrice::Limit(mut px) => {
            if let Some(limit) = limit {
                match side {
                    Side::Buy if px > limit => px = limit,
                    Side::Sell if px < limit => px = limit,
                    _ => {}
                }
            }
            if no_markdown {
                if let Some(last) = quotes.last {
                    if px < last {
                        px = last;
                    }
                }
            }
            OrderPrice::Limit(px)
        }
    };
    Some(decided)
}

/// Far-touch candidate; degrades to a market order when the far side is
/// unavailable (the High -> Highest fallthrough)
fn far_touch(side: Side, quotes: &QuoteView) -> OrderPrice {
    let px = match side {
        Side::Buy => quotes.ask,
        Side::Sell => quotes.bid,
    };
    px.map(OrderPrice::Limit).unwrap_or(OrderPrice::Market)
}
