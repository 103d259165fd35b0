//! Straight-line navigator.
//!
//! No pathfinding: the body walks directly toward its destination. Good
//! enough for open arenas, the demo binary and tests; real games plug in
//! their own [`NavigationAgent`].
use glam::Vec3;
use log::trace;

use crate::capabilities::NavigationAgent;
use crate::numeric::expect_f32;
use crate::DEFAULT_MOVE_SPEED;

/// Straight-line steering towards the latest destination, used by the demo.
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringNavigation {
    position: Vec3,
    destination: Option<Vec3>,
    speed: f32,
    enabled: bool,
}

impl SteeringNavigation {
    /// Enabled, at rest, moving at the default speed once given a goal.
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            destination: None,
            speed: DEFAULT_MOVE_SPEED,
            enabled: true,
        }
    }

    /// Last destination requested, if any.
    #[must_use]
    pub const fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    /// Units per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Moves the body up to `speed * delta` toward the destination.
    ///
    /// Does nothing while disabled or without a destination. The body's
    /// height is kept; only the horizontal offset is walked.
    pub fn advance(&mut self, delta: f64) {
        if !self.enabled {
            return;
        }
        let Some(destination) = self.destination else {
            return;
        };
        let mut offset = destination - self.position;
        offset.y = 0.0;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        let stride = distance.min(self.speed * expect_f32(delta));
        let movement = offset / distance * stride;
        self.position += movement;
        trace!("walked {stride:.3} to {:?}", self.position);
    }
}

impl NavigationAgent for SteeringNavigation {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}
