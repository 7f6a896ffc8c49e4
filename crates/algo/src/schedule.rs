//! Pacing schedule
//!
//! Pure calculation of how much of the parent order should be done at a
//! point in time. The ratio math runs in f64 (fractional exponents) and
//! converts to Decimal only at the quantity boundary.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use tempo_core::Quantity;
use tempo_core::Timestamp;
use tempo_ports::RandomSource;

use crate::params::TimeWindow;

/// Convert the user-facing tilt input (-10..10) to a pacing exponent.
///
/// 10 is most aggressive: the exponent collapses toward zero and roughly
/// half of the order is expected inside 1% of the window. -10 is most
/// passive: the exponent grows so large that under 1% is expected in the
/// first half of the window. Note the inversion: larger inputs produce
/// smaller exponents.
pub fn tilt_from_input(input: f64) -> f64 {
    (-input).exp() / 5.0
}

/// Normalized time elapsed in the window, tilted and jittered.
///
/// `(elapsed + 1) / (duration + 1)` keeps the ratio strictly positive at
/// the first tick. When `randomize` is nonzero a fresh draw is taken per
/// invocation; the schedule is intentionally noisy, not smooth.
pub fn pacing_ratio(
    now: Timestamp,
    window: &TimeWindow,
    tilt: f64,
    randomize: f64,
    rng: &mut dyn RandomSource,
) -> f64 {
    let elapsed = (now - window.start).num_seconds() as f64;
    let duration = window.duration_secs() as f64;
    let mut ratio = (elapsed + 1.0) / (duration + 1.0);
    if tilt != 1.0 {
        ratio = ratio.powf(tilt);
    }
    if randomize != 0.0 {
        ratio += randomize * rng.pacing_jitter();
    }
    ratio
}

/// Expected cumulative quantity at `now` for a parent order of `total`
pub fn expected_qty(
    total: Quantity,
    now: Timestamp,
    window: &TimeWindow,
    tilt: f64,
    randomize: f64,
    rng: &mut dyn RandomSource,
) -> Quantity {
    let ratio = pacing_ratio(now, window, tilt, randomize, rng);
    total * Decimal::from_f64(ratio).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    struct NoJitter;
    impl RandomSource for NoJitter {
        fn pacing_jitter(&mut self) -> f64 {
            0.0
        }
    }

    struct MaxJitter;
    impl RandomSource for MaxJitter {
        fn pacing_jitter(&mut self) -> f64 {
            0.01
        }
    }

    fn make_window(seconds: i64) -> TimeWindow {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();
        TimeWindow {
            start,
            end: start + Duration::seconds(seconds),
        }
    }

    #[test]
    fn test_linear_pacing_law() {
        let window = make_window(3600);
        let mut rng = NoJitter;
        let total = dec!(10000);

        // At the first tick only ~1/(duration+1) is expected
        let at_start = expected_qty(total, window.start, &window, 1.0, 0.0, &mut rng);
        assert!(at_start > Decimal::ZERO);
        assert!(at_start < dec!(5)); // 10000 / 3601 < 3

        // At the end the full quantity is expected
        let at_end = expected_qty(total, window.end, &window, 1.0, 0.0, &mut rng);
        assert!((at_end - total).abs() < dec!(1));

        // Monotonic in between
        let mid = expected_qty(
            total,
            window.start + Duration::seconds(1800),
            &window,
            1.0,
            0.0,
            &mut rng,
        );
        assert!(at_start < mid && mid < at_end);
    }

    #[test]
    fn test_tilt_skews_pacing() {
        let window = make_window(3600);
        let mut rng = NoJitter;
        let total = dec!(10000);
        let quarter = window.start + Duration::seconds(900);

        // Positive raw input -> exponent < 1 -> front-loaded
        let front = expected_qty(total, quarter, &window, tilt_from_input(5.0), 0.0, &mut rng);
        // Negative raw input -> exponent > 1 -> back-loaded
        let back = expected_qty(total, quarter, &window, tilt_from_input(-5.0), 0.0, &mut rng);
        let linear = expected_qty(total, quarter, &window, 1.0, 0.0, &mut rng);

        assert!(front > linear);
        assert!(back < linear);
    }

    #[test]
    fn test_tilt_transform_values() {
        assert!((tilt_from_input(0.0) - 0.2).abs() < 1e-12);
        // Most aggressive input yields a near-zero exponent
        assert!(tilt_from_input(10.0) < 1e-4);
        // Most passive input yields a huge exponent
        assert!(tilt_from_input(-10.0) > 4000.0);
    }

    #[test]
    fn test_randomize_scales_noise() {
        let window = make_window(3600);
        let now = window.start + Duration::seconds(1800);
        let total = dec!(10000);

        let clean = expected_qty(total, now, &window, 1.0, 0.0, &mut NoJitter);
        let noisy = expected_qty(total, now, &window, 1.0, 10.0, &mut MaxJitter);
        // randomize=10 at +1% jitter shifts the ratio by 0.1
        let shift = noisy - clean;
        assert!((shift - total * dec!(0.1)).abs() < dec!(0.001), "shift={shift}");
    }
}
