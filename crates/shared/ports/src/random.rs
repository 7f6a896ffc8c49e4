/// Port for schedule randomization
///
/// Pacing noise is injected through this trait so the deterministic
/// backtest path and the live entropy-seeded path share one code path.
/// One source per algorithm instance; draws are made on the instance's
/// own thread of control only.
pub trait RandomSource: Send {
    /// Independent uniform draw in [-0.01, 0.01]
    fn pacing_jitter(&mut self) -> f64;

    /// Get the source's name/identifier for debugging
    fn name(&self) -> &str {
        "RandomSource"
    }
}
