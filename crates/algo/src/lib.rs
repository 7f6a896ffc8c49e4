//! Tempo TWAP Execution Algorithm
//!
//! Works a large parent order into a sequence of smaller child orders over
//! a bounded time window, tracking the time-weighted-average-price
//! objective while respecting participation, price, and lot-size
//! constraints.
//!
//! ## Architecture
//!
//! ```text
//!  ParamMap ──► ┌──────────────────────────────────────────┐
//!               │                TwapAlgo                  │
//!               │  ┌────────────────────────────────────┐  │
//!               │  │  Parameter Manager (params)        │  │
//!               │  │  - window / sizes / aggression     │  │
//!               │  └────────────────┬───────────────────┘  │
//!  tick ──────► │  ┌────────────────▼───────────────────┐  │
//!  (1s, via     │  │  Price Selector (pricer)           │  │
//!   runner)     │  │  - aggression fallback chain       │  │
//!               │  │  - limit clamp, no-markdown rule   │  │
//!               │  └────────────────┬───────────────────┘  │
//!               │  ┌────────────────▼───────────────────┐  │
//!  MarketSnapshot  │  Order Lifecycle (engine)          │  │
//!  ───────────► │  │  - single outstanding-order slot   │  │
//!               │  │  - cancel-and-replace vs hold      │  │
//!               │  └────────────────┬───────────────────┘  │
//!               │  ┌────────────────▼───────────────────┐  │
//!               │  │  Schedule (schedule) + Throttle    │  │
//!               │  │  - pacing ratio, tilt, noise       │  │
//!               │  │  - lot-conformant slice size       │  │
//!               │  └────────────────┬───────────────────┘  │
//!               └───────────────────┼──────────────────────┘
//!                                   │ Actions
//!  Order routing ◄── place/cancel ◄─┘
//!
//!  Confirmations ──► fills/cancels ──► TwapAlgo (stops when done)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tempo_algo::{AlgoRunner, ParamMap, TwapAlgo, keys};
//!
//! let algo = TwapAlgo::new(request, &OpenSellNoMarkdown, Box::new(ThreadRandom::new()));
//! let params = ParamMap::new()
//!     .with(keys::VALID_SECONDS, 3600i64)
//!     .with(keys::AGGRESSION, "Medium")
//!     .with(keys::MAX_POV, dec!(0.1));
//! let runner = AlgoRunner::new(algo, clock, market_rx, confirm_rx, action_tx);
//! let finished = runner.run(&params).await?;
//! ```

pub mod engine;
pub mod error;
pub mod params;
pub mod pricer;
pub mod random;
pub mod runner;
pub mod schedule;
pub mod throttle;

// Re-export main types
pub use engine::{Action, Status, TwapAlgo};
pub use error::{AlgoError, Result};
pub use params::{
    ExecutionRequest, MIN_WINDOW_SECS, ParamDef, ParamMap, ParamValue, ScheduleConfig, TimeWindow,
    keys, param_defs,
};
pub use pricer::{
    Aggression, MarkdownAllowed, MarkdownPolicy, OpenSellNoMarkdown, OrderPrice, QuoteView,
};
pub use random::{SeededRandom, ThreadRandom};
pub use runner::AlgoRunner;
