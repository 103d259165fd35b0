//! Timed death effects.
use std::cell::{Cell, RefCell};

use log::trace;

use crate::capabilities::{DeathEffect, EffectSpawner};

/// Effect spawner that keeps effects alive for their lifetime and then
/// removes them.
///
/// Stands in for a particle system in headless runs and tests.
#[derive(Debug, Default)]
pub struct ExpiringEffects {
    active: RefCell<Vec<ActiveEffect>>,
    spawned: Cell<u64>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveEffect {
    effect: DeathEffect,
    remaining: f64,
}

impl ExpiringEffects {
    /// Ages every effect by `delta` seconds and drops the expired ones.
    /// Returns how many were removed.
    pub fn tick(&self, delta: f64) -> usize {
        let mut active = self.active.borrow_mut();
        let before = active.len();
        for entry in active.iter_mut() {
            entry.remaining -= delta;
        }
        active.retain(|entry| entry.remaining > 0.0);
        let removed = before - active.len();
        if removed > 0 {
            trace!("{removed} death effect(s) expired");
        }
        removed
    }

    /// Effects currently alive.
    #[must_use]
    pub fn active(&self) -> Vec<DeathEffect> {
        self.active.borrow().iter().map(|entry| entry.effect).collect()
    }

    /// Effects spawned over the spawner's whole life.
    #[must_use]
    pub fn spawned(&self) -> u64 {
        self.spawned.get()
    }
}

impl EffectSpawner for ExpiringEffects {
    fn spawn(&self, effect: DeathEffect) {
        self.spawned.set(self.spawned.get() + 1);
        if effect.lifetime > 0.0 {
            self.active.borrow_mut().push(ActiveEffect {
                effect,
                remaining: effect.lifetime,
            });
        }
    }
}
