//! Timer-loop driver
//!
//! Single cooperative task that ties the engine to its collaborators: a
//! 1-second interval tick, market snapshot updates from the subscription,
//! and confirmations from order routing. Everything the engine touches is
//! mutated on this one task, so ticks, updates, and confirmations are
//! never reentrant with respect to each other.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use tempo_core::{Confirmation, MarketSnapshot};
use tempo_ports::Clock;

use crate::engine::{Action, TwapAlgo};
use crate::error::Result;
use crate::params::ParamMap;

/// Seconds between timer ticks
const TICK_SECS: u64 = 1;

/// Drives one `TwapAlgo` instance to completion.
///
/// The market-data channel must deliver an initial snapshot when the
/// subscription opens; its cumulative volume becomes the participation
/// baseline. Dropping the runner (or the runner finishing) releases the
/// subscription by closing the receivers.
pub struct AlgoRunner {
    algo: TwapAlgo,
    clock: Arc<dyn Clock>,
    market_rx: mpsc::Receiver<MarketSnapshot>,
    confirm_rx: mpsc::Receiver<Confirmation>,
    action_tx: mpsc::Sender<Action>,
}

impl AlgoRunner {
    pub fn new(
        algo: TwapAlgo,
        clock: Arc<dyn Clock>,
        market_rx: mpsc::Receiver<MarketSnapshot>,
        confirm_rx: mpsc::Receiver<Confirmation>,
        action_tx: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            algo,
            clock,
            market_rx,
            confirm_rx,
            action_tx,
        }
    }

    /// Start the algorithm and loop until it stops. Returns the finished
    /// engine so the host can inspect final state.
    pub async fn run(mut self, params: &ParamMap) -> Result<TwapAlgo> {
        let symbol = self.algo.request().security.symbol.clone();

        // Subscription ack: the first snapshot carries the volume baseline
        let Some(mut snapshot) = self.market_rx.recv().await else {
            error!("[TWAP {symbol}] market data channel closed before start");
            self.algo.stop();
            return Ok(self.algo);
        };

        let actions = self
            .algo
            .start(params, self.clock.now(), snapshot.volume)?;
        self.dispatch(actions).await;

        let mut ticks = tokio::time::interval(Duration::from_secs(TICK_SECS));
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.algo.is_stopped() {
            tokio::select! {
                _ = ticks.tick() => {
                    let actions = self.algo.on_timer(self.clock.now(), &snapshot);
                    self.dispatch(actions).await;
                }
                Some(md) = self.market_rx.recv() => {
                    debug!(
                        "[TWAP {symbol}] quote: bid {:?}/{:?} ask {:?}/{:?} last {:?} vol {}",
                        md.bid, md.bid_size, md.ask, md.ask_size, md.last, md.volume
                    );
                    snapshot = md;
                }
                Some(cm) = self.confirm_rx.recv() => {
                    self.algo.on_confirmation(&cm);
                }
            }
        }

        // Receivers drop here, releasing the subscription exactly once
        info!("[TWAP {symbol}] subscription released");
        Ok(self.algo)
    }

    async fn dispatch(&mut self, actions: Vec<Action>) {
        for action in actions {
            if self.action_tx.send(action).await.is_err() {
                error!("order channel closed, stopping algorithm");
                self.algo.stop();
                return;
            }
        }
    }
}
