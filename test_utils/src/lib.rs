//! Utility helpers for tests.
//!
//! Recording doubles for the collaborators an agent talks to. Each one keeps
//! a log of what it was asked to do so tests can assert on exact call
//! sequences without setting up mock expectations.
pub mod doubles;

pub use doubles::{
    CountingDisplay, DummyTarget, NavCall, RecordingEffects, RecordingNavigation,
};

use stalker::{Agent, NavigationAgent, Tick};

/// Ticks `agent` `count` times with a fixed `delta`, starting at `start`.
///
/// Returns the timestamp the next tick would carry.
#[expect(clippy::cast_precision_loss, reason = "Tick counts are small.")]
pub fn run_ticks<N: NavigationAgent>(
    agent: &mut Agent<N>,
    start: f64,
    delta: f64,
    count: usize,
) -> f64 {
    for index in 0..count {
        agent.tick(Tick::new(start + index as f64 * delta, delta));
    }
    start + count as f64 * delta
}
