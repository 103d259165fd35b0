//! Periodic destination refresh while chasing.
use glam::Vec3;

use crate::schedule::RepeatingTimer;
use crate::vector_math::ground_projection;

/// Cursor deciding when the agent re-issues its navigation destination.
///
/// The loop keeps its cadence whether or not a firing is used, so an agent
/// returning from a lunge picks up on the very next due tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RetargetLoop {
    timer: RepeatingTimer,
}

impl RetargetLoop {
    /// Starts a loop that fires on its first tick.
    #[must_use]
    pub const fn start(interval: f64) -> Self {
        Self {
            timer: RepeatingTimer::primed(interval),
        }
    }

    /// Consumes `delta` seconds. Returns the destination to issue when the
    /// loop is due and `chasing` holds, `None` otherwise.
    pub fn advance(&mut self, delta: f64, chasing: bool, target: Vec3) -> Option<Vec3> {
        let due = self.timer.advance(delta);
        (due && chasing).then(|| ground_projection(target))
    }
}
