//! TWAP engine
//!
//! Owns the single outstanding child order per instance and decides, on
//! every timer tick, whether to place, hold, or cancel. All mutation is
//! serialized onto one logical thread of control; methods return
//! fire-and-forget intents that the host resolves later via confirmation
//! callbacks.

use log::{debug, error, info};
use rust_decimal::Decimal;

use tempo_core::{
    ChildOrder, Confirmation, ConfirmationKind, MarketSnapshot, OrderId, Price, Quantity,
    Timestamp,
};
use tempo_ports::RandomSource;

use crate::error::{AlgoError, Result};
use crate::params::{ExecutionRequest, ParamMap, ScheduleConfig, TimeWindow, keys};
use crate::pricer::{MarkdownPolicy, OrderPrice, QuoteView, select_price};
use crate::schedule;
use crate::throttle::slice_quantity;

/// Instance lifecycle: NotStarted -> Running -> Stopped (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Running,
    Stopped,
}

/// Order intent emitted by the engine. Effects are resolved later via
/// confirmations; the engine never blocks on them.
#[derive(Debug, Clone)]
pub enum Action {
    /// Place a new child order
    Place(ChildOrder),
    /// Cancel the outstanding child order
    Cancel { order_id: OrderId },
    /// Internal cross fill against own flow, reported for the ledger
    Cross {
        quantity: Quantity,
        price: Option<Price>,
    },
}

/// The one child order currently at the venue
#[derive(Debug, Clone)]
struct WorkingOrder {
    id: OrderId,
    /// Resting limit price; None for market orders
    price: Option<Price>,
    remaining: Quantity,
}

/// Time-sliced execution of one parent order
pub struct TwapAlgo {
    request: ExecutionRequest,
    config: ScheduleConfig,
    window: Option<TimeWindow>,
    status: Status,
    /// Explicit slot: at most one child order outstanding, statically
    working: Option<WorkingOrder>,
    /// Cumulative filled quantity, internal crosses included
    filled: Quantity,
    /// Portion of `filled` done as internal crosses; excluded from the
    /// participation measure
    crossed: Quantity,
    /// Traded-volume baseline captured when the subscription started
    initial_volume: Quantity,
    no_markdown: bool,
    rng: Box<dyn RandomSource>,
}

impl TwapAlgo {
    pub fn new(
        request: ExecutionRequest,
        markdown_policy: &dyn MarkdownPolicy,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let no_markdown = markdown_policy.forbids_markdown(
            &request.security,
            request.side,
            request.position_effect,
        );
        Self {
            request,
            config: ScheduleConfig::default(),
            window: None,
            status: Status::NotStarted,
            working: None,
            filled: Decimal::ZERO,
            crossed: Decimal::ZERO,
            initial_volume: Decimal::ZERO,
            no_markdown,
            rng,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_stopped(&self) -> bool {
        self.status == Status::Stopped
    }

    pub fn request(&self) -> &ExecutionRequest {
        &self.request
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn filled(&self) -> Quantity {
        self.filled
    }

    /// Validate parameters, fix the window, and begin running.
    ///
    /// `initial_volume` is the cumulative traded volume reported by the
    /// market-data subscription at this moment; the participation gate
    /// measures against it.
    pub fn start(
        &mut self,
        params: &ParamMap,
        now: Timestamp,
        initial_volume: Quantity,
    ) -> Result<Vec<Action>> {
        if self.status != Status::NotStarted {
            return Err(AlgoError::AlreadyStarted);
        }
        if self.request.quantity <= Decimal::ZERO {
            return Err(AlgoError::InvalidQuantity);
        }

        let seconds = params.integer(keys::VALID_SECONDS).unwrap_or(0);
        let window = TimeWindow::from_valid_seconds(now, seconds)?;
        let config = self.config.apply(params, &self.request.security)?;
        if config.min_size <= Decimal::ZERO && !self.request.security.has_lot_size() {
            return Err(AlgoError::MissingMinSize);
        }

        self.window = Some(window);
        self.config = config;
        self.initial_volume = initial_volume;
        self.status = Status::Running;

        let mut actions = Vec::new();
        if params.text(keys::INTERNAL_CROSS) == Some("Yes") {
            let quantity = self.request.quantity;
            info!(
                "[TWAP {}] internal cross for full quantity {}",
                self.request.security.symbol, quantity
            );
            actions.push(Action::Cross {
                quantity,
                price: self.config.limit_price,
            });
            self.crossed += quantity;
            self.apply_fill(quantity);
        }

        info!(
            "[TWAP {}] started: {:?} {} over {}s, aggression {}",
            self.request.security.symbol,
            self.request.side,
            self.request.quantity,
            window.duration_secs(),
            self.config.aggression,
        );
        Ok(actions)
    }

    /// Apply a live parameter update. On error the previous configuration
    /// stays in effect.
    pub fn modify(&mut self, params: &ParamMap) -> Result<()> {
        match self.config.apply(params, &self.request.security) {
            Ok(config) => {
                self.config = config;
                Ok(())
            }
            Err(e) => {
                error!("[TWAP {}] modify rejected: {e}", self.request.security.symbol);
                Err(e)
            }
        }
    }

    /// Terminal; idempotent. The host releases the market-data
    /// subscription when it observes the Stopped state.
    pub fn stop(&mut self) {
        if self.status != Status::Stopped {
            self.status = Status::Stopped;
            info!(
                "[TWAP {}] stopped, filled {}/{}",
                self.request.security.symbol, self.filled, self.request.quantity
            );
        }
    }

    /// Quantity the schedule expects done at `now`
    pub fn expected_qty(&mut self, now: Timestamp) -> Quantity {
        let Some(window) = self.window else {
            return Decimal::ZERO;
        };
        schedule::expected_qty(
            self.request.quantity,
            now,
            &window,
            self.config.tilt,
            self.config.randomize,
            self.rng.as_mut(),
        )
    }

    /// Schedule gap: expected minus total exposure. Negative means ahead
    /// of schedule.
    pub fn leaves(&mut self, now: Timestamp) -> Quantity {
        self.expected_qty(now) - self.total_exposure()
    }

    fn total_exposure(&self) -> Quantity {
        let working = self
            .working
            .as_ref()
            .map(|w| w.remaining)
            .unwrap_or(Decimal::ZERO);
        self.filled + working
    }

    /// One tick of the timer loop. The caller re-arms the timer while the
    /// instance is running.
    pub fn on_timer(&mut self, now: Timestamp, md: &MarketSnapshot) -> Vec<Action> {
        if self.status != Status::Running {
            return Vec::new();
        }
        let Some(window) = self.window else {
            return Vec::new();
        };
        if window.expired(now) {
            self.stop();
            return Vec::new();
        }
        if !md.in_trade_period {
            return Vec::new();
        }

        let side = self.request.side;
        let quotes = QuoteView::from_snapshot(md, &self.request.security);
        let Some(decision) = select_price(
            self.config.aggression,
            side,
            &quotes,
            &self.request.security,
            self.config.limit_price,
            self.no_markdown,
        ) else {
            debug!(
                "[TWAP {}] no usable price this tick, abstaining",
                self.request.security.symbol
            );
            return Vec::new();
        };

        // An order is already out: hold it, or cancel it once it has gone
        // worse than the touch. Never place while one is outstanding.
        if let Some(working) = &self.working {
            let mut actions = Vec::new();
            if let (OrderPrice::Limit(new_px), Some(rest_px)) = (decision, working.price) {
                if new_px != rest_px {
                    let worse = if side.is_buy() {
                        quotes.bid.is_some_and(|bid| rest_px < bid)
                    } else {
                        quotes.ask.is_some_and(|ask| rest_px > ask)
                    };
                    if worse {
                        info!(
                            "[TWAP {}] cancel {}: resting {} off the touch",
                            self.request.security.symbol, working.id, rest_px
                        );
                        actions.push(Action::Cancel {
                            order_id: working.id,
                        });
                    }
                }
            }
            return actions;
        }

        // Participation gate, evaluated before the schedule is consulted.
        // Internal crosses do not count toward market participation.
        let traded = md.volume - self.initial_volume;
        if traded > Decimal::ZERO
            && self.config.max_pov > Decimal::ZERO
            && self.filled - self.crossed > self.config.max_pov * traded
        {
            debug!(
                "[TWAP {}] participation cap reached ({} of {} traded)",
                self.request.security.symbol,
                self.filled - self.crossed,
                traded
            );
            return Vec::new();
        }

        let leaves = self.leaves(now);
        if leaves <= Decimal::ZERO {
            return Vec::new();
        }
        let total_leaves = self.request.quantity - self.total_exposure();
        let security = &self.request.security;
        let Some(quantity) = slice_quantity(
            leaves,
            total_leaves,
            security.lot_size,
            self.config.min_size,
            self.config.max_floor,
            security.exchange.odd_lot_allowed,
        ) else {
            return Vec::new();
        };

        let order = match decision {
            OrderPrice::Limit(px) => ChildOrder::limit(
                security.symbol.clone(),
                side,
                quantity,
                px,
                self.request.sub_account.clone(),
                self.request.position_effect,
            ),
            OrderPrice::Market => ChildOrder::market(
                security.symbol.clone(),
                side,
                quantity,
                self.request.sub_account.clone(),
                self.request.position_effect,
            ),
        };
        info!(
            "[TWAP {}] place {:?} {} @ {:?}",
            security.symbol, side, quantity, order.price
        );
        self.working = Some(WorkingOrder {
            id: order.id,
            price: order.price,
            remaining: quantity,
        });
        vec![Action::Place(order)]
    }

    /// Fill/cancel confirmation from the order-routing collaborator
    pub fn on_confirmation(&mut self, cm: &Confirmation) {
        if let ConfirmationKind::Fill { quantity, price } = cm.kind {
            debug!(
                "[TWAP {}] fill {} @ {}",
                self.request.security.symbol, quantity, price
            );
            if let Some(working) = &mut self.working {
                if working.id == cm.order_id {
                    working.remaining -= quantity;
                    if working.remaining <= Decimal::ZERO {
                        self.working = None;
                    }
                }
            }
            self.apply_fill(quantity);
        } else if cm.is_terminal() {
            if self.working.as_ref().is_some_and(|w| w.id == cm.order_id) {
                debug!(
                    "[TWAP {}] order {} terminal: {:?}",
                    self.request.security.symbol, cm.order_id, cm.kind
                );
                self.working = None;
            }
        }
    }

    fn apply_fill(&mut self, quantity: Quantity) {
        self.filled += quantity;
        if self.filled >= self.request.quantity {
            self.stop();
        }
    }
}
