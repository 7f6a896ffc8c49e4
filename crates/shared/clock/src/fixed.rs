use std::sync::Mutex;

use chrono::Duration;
use tempo_core::Timestamp;
use tempo_ports::Clock;

/// Manually-controlled clock for deterministic tests and backtests
///
/// Time never moves on its own; callers advance it explicitly.
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Set the clock to an absolute time
    pub fn set(&self, time: Timestamp) {
        *self.now.lock().unwrap() = time;
    }

    /// Move the clock forward
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
