use serde::{Deserialize, Serialize};

/// Venue reference data relevant to order sizing and pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    /// Venue code (e.g., "SSE", "NYSE")
    pub code: String,
    /// ISO country code of the venue
    pub country: String,
    /// Whether child orders may be sized off lot multiples
    pub odd_lot_allowed: bool,
    /// Venue forbids pricing an opening sell below the last trade.
    /// Capability flag so the rule stays data-driven per venue rather
    /// than hard-coded to one market.
    pub restricts_markdown: bool,
}

impl Exchange {
    pub fn new(code: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            country: country.into(),
            odd_lot_allowed: false,
            restricts_markdown: false,
        }
    }

    pub fn with_odd_lots(mut self, allowed: bool) -> Self {
        self.odd_lot_allowed = allowed;
        self
    }

    pub fn with_markdown_restriction(mut self, restricted: bool) -> Self {
        self.restricts_markdown = restricted;
        self
    }
}
