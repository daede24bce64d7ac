//! Elapsed/delta time bookkeeping for the frame loop.

use tracing::warn;

/// The single source of "now" that body transforms are evaluated against.
///
/// `elapsed` only ever grows. It is mutated once per frame via
/// [`tick`](Self::tick).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneClock {
    elapsed: f64,
    delta: f64,
    ticks: u64,
}

impl SceneClock {
    /// A clock at `t = 0` with no delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta_seconds`.
    ///
    /// A negative (or NaN) delta means the time source went backwards; it is
    /// clamped to zero with a warning so motion never runs in reverse.
    pub fn tick(&mut self, delta_seconds: f64) {
        let delta = if delta_seconds >= 0.0 {
            delta_seconds
        } else {
            warn!(
                "Clock regression of {:.3}ms, clamping frame delta to zero",
                delta_seconds * 1000.0
            );
            0.0
        };

        self.elapsed += delta;
        self.delta = delta;
        self.ticks += 1;
    }

    /// Seconds since the clock started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Seconds covered by the most recent tick. Never negative.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Number of ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
