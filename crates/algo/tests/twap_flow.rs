//! End-to-end execution flow: the engine driven tick-by-tick against a
//! scripted venue, with deterministic time and schedule noise.

use chrono::Duration;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tempo_algo::{
    Action, AlgoError, ExecutionRequest, MarkdownAllowed, ParamMap, SeededRandom, TwapAlgo, keys,
};
use tempo_clock::{Clock, FixedClock};
use tempo_core::{
    Confirmation, ConfirmationKind, Exchange, MarketSnapshot, PositionEffect, Security,
    SecurityKind, Side,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_security() -> Security {
    Security::new(
        "600000",
        Exchange::new("SSE", "CN").with_odd_lots(false),
        SecurityKind::Stock,
        dec!(0.01),
        dec!(100),
    )
}

fn make_request(quantity: Decimal) -> ExecutionRequest {
    ExecutionRequest {
        security: make_security(),
        side: Side::Buy,
        quantity,
        sub_account: "acct-1".to_string(),
        position_effect: PositionEffect::Close,
        source: "sim".to_string(),
    }
}

fn make_algo(quantity: Decimal) -> TwapAlgo {
    TwapAlgo::new(
        make_request(quantity),
        &MarkdownAllowed,
        Box::new(SeededRandom::new(0)),
    )
}

/// Scripted venue: quotes are static, every resting order fills in full
/// two ticks after placement, and each fill prints to the tape.
struct SimVenue {
    snapshot: MarketSnapshot,
    resting: Option<(tempo_core::OrderId, Decimal, i64)>,
    now_tick: i64,
}

impl SimVenue {
    fn new(initial_volume: Decimal) -> Self {
        Self {
            snapshot: MarketSnapshot::new("600000")
                .with_bbo(dec!(10.00), dec!(10.02))
                .with_last(dec!(10.01))
                .with_volume(initial_volume),
            resting: None,
            now_tick: 0,
        }
    }

    fn accept(&mut self, action: &Action) {
        match action {
            Action::Place(order) => {
                assert!(
                    self.resting.is_none(),
                    "second order placed while one was resting"
                );
                self.resting = Some((order.id, order.quantity, self.now_tick));
            }
            Action::Cancel { order_id } => {
                assert_eq!(self.resting.map(|r| r.0), Some(*order_id));
            }
            Action::Cross { .. } => {}
        }
    }

    /// Advance one second; returns a fill confirmation when due
    fn step(&mut self, at: tempo_core::Timestamp) -> Option<Confirmation> {
        self.now_tick += 1;
        if let Some((id, quantity, placed_at)) = self.resting {
            if self.now_tick - placed_at >= 2 {
                self.resting = None;
                self.snapshot.volume += quantity;
                return Some(Confirmation::new(
                    id,
                    ConfirmationKind::Fill {
                        quantity,
                        price: dec!(10.00),
                    },
                    at,
                ));
            }
        }
        None
    }
}

#[test]
fn test_parent_order_completes_within_window() {
    init_logs();
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap());
    // Tilt 2 front-loads the schedule, so the parent completes well
    // before the window closes
    let params = ParamMap::new()
        .with(keys::VALID_SECONDS, 600i64)
        .with(keys::MIN_SIZE, dec!(100))
        .with(keys::TILT, dec!(2));

    let mut algo = make_algo(dec!(10000));
    let mut venue = SimVenue::new(dec!(500000));
    algo.start(&params, clock.now(), venue.snapshot.volume)
        .unwrap();

    let mut placed_total = Decimal::ZERO;
    for _ in 0..700 {
        clock.advance(Duration::seconds(1));
        if let Some(fill) = venue.step(clock.now()) {
            algo.on_confirmation(&fill);
        }
        if algo.is_stopped() {
            break;
        }
        for action in algo.on_timer(clock.now(), &venue.snapshot) {
            if let Action::Place(order) = &action {
                // Every slice is lot-conformant and at the bid (Low, buy)
                assert_eq!(order.quantity % dec!(100), Decimal::ZERO);
                assert_eq!(order.price, Some(dec!(10.00)));
                placed_total += order.quantity;
            }
            venue.accept(&action);
        }
    }

    assert!(algo.is_stopped());
    assert_eq!(algo.filled(), dec!(10000));
    assert_eq!(placed_total, dec!(10000));
}

#[test]
fn test_limit_price_bounds_every_slice() {
    init_logs();
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap());
    let params = ParamMap::new()
        .with(keys::VALID_SECONDS, 600i64)
        .with(keys::AGGRESSION, "High")
        .with(keys::PRICE, dec!(10.01));

    let mut algo = make_algo(dec!(5000));
    let mut venue = SimVenue::new(dec!(500000));
    algo.start(&params, clock.now(), venue.snapshot.volume)
        .unwrap();

    for _ in 0..700 {
        clock.advance(Duration::seconds(1));
        if let Some(fill) = venue.step(clock.now()) {
            algo.on_confirmation(&fill);
        }
        if algo.is_stopped() {
            break;
        }
        for action in algo.on_timer(clock.now(), &venue.snapshot) {
            if let Action::Place(order) = &action {
                // High would cross to the ask at 10.02; the limit caps it
                assert_eq!(order.price, Some(dec!(10.01)));
            }
            venue.accept(&action);
        }
    }

    assert!(algo.is_stopped());
}

#[test]
fn test_modify_mid_flight_changes_pricing() {
    init_logs();
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap());
    let params = ParamMap::new().with(keys::VALID_SECONDS, 600i64);

    let mut algo = make_algo(dec!(10000));
    let mut venue = SimVenue::new(dec!(500000));
    algo.start(&params, clock.now(), venue.snapshot.volume)
        .unwrap();

    // First slice rests on the bid (default Low aggression)
    clock.advance(Duration::seconds(1));
    let actions = algo.on_timer(clock.now(), &venue.snapshot);
    let Action::Place(order) = &actions[0] else {
        panic!("expected placement");
    };
    assert_eq!(order.price, Some(dec!(10.00)));
    algo.on_confirmation(&Confirmation::new(
        order.id,
        ConfirmationKind::Fill {
            quantity: order.quantity,
            price: dec!(10.00),
        },
        clock.now(),
    ));

    // Raise aggression; an invalid update in between must change nothing
    let bad = ParamMap::new().with(keys::AGGRESSION, "Frantic");
    assert!(matches!(
        algo.modify(&bad),
        Err(AlgoError::InvalidAggression(_))
    ));
    algo.modify(&ParamMap::new().with(keys::AGGRESSION, "High"))
        .unwrap();

    // Next slice crosses to the ask once the schedule is behind again
    let mut crossed_at_ask = false;
    for _ in 0..120 {
        clock.advance(Duration::seconds(1));
        if let Some(fill) = venue.step(clock.now()) {
            algo.on_confirmation(&fill);
        }
        for action in algo.on_timer(clock.now(), &venue.snapshot) {
            if let Action::Place(order) = &action {
                assert_eq!(order.price, Some(dec!(10.02)));
                crossed_at_ask = true;
            }
            venue.accept(&action);
        }
    }
    assert!(crossed_at_ask, "no slice was placed after the modify");
}

#[test]
fn test_participation_cap_throttles_flow() {
    init_logs();
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap());
    let params = ParamMap::new()
        .with(keys::VALID_SECONDS, 600i64)
        .with(keys::MAX_POV, dec!(0.1));

    let mut algo = make_algo(dec!(10000));
    // Quiet tape: almost no outside volume trades
    let mut venue = SimVenue::new(dec!(500000));
    algo.start(&params, clock.now(), venue.snapshot.volume)
        .unwrap();

    for _ in 0..600 {
        clock.advance(Duration::seconds(1));
        if let Some(fill) = venue.step(clock.now()) {
            algo.on_confirmation(&fill);
        }
        if algo.is_stopped() {
            break;
        }
        for action in algo.on_timer(clock.now(), &venue.snapshot) {
            venue.accept(&action);
        }
    }

    // Our own fills are the only tape volume. The first slice goes out
    // before any volume has printed, and from then on filled (100) always
    // exceeds a tenth of volume since start, so the gate holds for good.
    assert_eq!(algo.filled(), dec!(100));
    assert!(!algo.is_stopped(), "gate must throttle, not terminate");
}
