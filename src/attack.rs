//! Melee lunge cursor.
//!
//! An [`AttackSequence`] is a resumable procedure: the agent advances it once
//! per tick and applies the side effects each [`LungeStep`] asks for. The
//! sequence itself is pure geometry and bookkeeping.
use glam::Vec3;

use crate::vector_math::lunge_position;
use crate::STRIKE_PROGRESS;

/// Result of advancing a lunge by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LungeStep {
    /// Where the attacker's body belongs after this tick.
    pub position: Vec3,
    /// `true` on the single tick where the blow lands.
    pub strike: bool,
    /// `true` once the lunge has returned to its origin.
    pub finished: bool,
}

/// One melee strike in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackSequence {
    origin: Vec3,
    target: Vec3,
    speed: f32,
    percent: f32,
    struck: bool,
}

impl AttackSequence {
    /// Starts a lunge from `origin` toward `target`, progressing `speed` per
    /// second.
    #[must_use]
    pub const fn begin(origin: Vec3, target: Vec3, speed: f32) -> Self {
        Self {
            origin,
            target,
            speed,
            percent: 0.0,
            struck: false,
        }
    }

    /// Lunge progress, `0` at launch and past `1` when done.
    #[must_use]
    pub const fn percent(&self) -> f32 {
        self.percent
    }

    /// Where the lunge started and where it ends.
    #[must_use]
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Advances the lunge by `delta` seconds.
    pub fn advance(&mut self, delta: f32) -> LungeStep {
        self.percent += delta * self.speed;

        let strike = !self.struck && self.percent >= STRIKE_PROGRESS;
        self.struck |= strike;

        let finished = self.percent > 1.0;
        let position = if finished {
            self.origin
        } else {
            lunge_position(self.origin, self.target, self.percent)
        };

        LungeStep {
            position,
            strike,
            finished,
        }
    }
}
