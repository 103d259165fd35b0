//! Cooperative tick source and timer cursors.
//!
//! Every behaviour in the crate is advanced by a [`Tick`]: an absolute
//! monotonic timestamp plus the time elapsed since the previous tick. Long
//! running procedures hold their own progress cursor instead of blocking, and
//! periodic ones hold a [`RepeatingTimer`].

/// One discrete simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Seconds since the simulation started.
    pub now: f64,
    /// Seconds elapsed since the previous tick.
    pub delta: f64,
}

impl Tick {
    /// A tick stamped `now` covering `delta` seconds.
    #[must_use]
    pub const fn new(now: f64, delta: f64) -> Self {
        Self { now, delta }
    }
}

/// Fixed-step clock producing consecutive ticks.
///
/// The first tick is stamped `now = 0` and carries a full `step` delta so
/// that procedures launched on it make progress immediately.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    step: f64,
    elapsed_ticks: u64,
}

impl SimulationClock {
    /// A clock that has not ticked yet.
    #[must_use]
    pub const fn new(step: f64) -> Self {
        Self {
            step,
            elapsed_ticks: 0,
        }
    }

    /// Number of ticks produced so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Produces the next tick.
    ///
    /// Timestamps are computed as `index * step` rather than accumulated, so
    /// they do not drift.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Tick counts stay far below 2^52."
    )]
    pub fn advance(&mut self) -> Tick {
        let now = self.elapsed_ticks as f64 * self.step;
        self.elapsed_ticks += 1;
        Tick::new(now, self.step)
    }
}

/// Cursor for an action that fires every `interval` seconds.
///
/// A freshly started timer is due on its first advance. When a single
/// advance spans several intervals the missed firings are coalesced into one.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatingTimer {
    interval: f64,
    until_next: f64,
}

/// Slack absorbing rounding error when `delta` divides `interval` exactly.
const TIMER_EPSILON: f64 = 1e-9;

impl RepeatingTimer {
    /// Creates a timer that fires on its first advance.
    #[must_use]
    pub const fn primed(interval: f64) -> Self {
        Self {
            interval,
            until_next: 0.0,
        }
    }

    /// Consumes one tick; returns `true` when the timer fires on it.
    ///
    /// The due check happens before `delta` is consumed: the firing belongs
    /// to the tick that starts at or after the due time.
    pub fn advance(&mut self, delta: f64) -> bool {
        let fired = self.until_next <= TIMER_EPSILON;
        if fired {
            self.until_next += self.interval;
            if self.until_next <= TIMER_EPSILON {
                self.until_next = self.interval;
            }
        }
        self.until_next -= delta;
        fired
    }
}
