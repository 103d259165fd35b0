//! Recording collaborator doubles.
use std::cell::{Cell, RefCell};

use glam::Vec3;
use stalker::{
    Damageable, DeathEffect, DeathListener, DeathNotifier, EffectSpawner, HealthDisplay,
    ListenerId, NavigationAgent, Targetable, Vitals,
};

/// Every request made to a [`RecordingNavigation`], in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavCall {
    Enabled(bool),
    Destination(Vec3),
    Speed(f32),
}

/// Navigator that never moves on its own and logs every request.
#[derive(Debug, Clone)]
pub struct RecordingNavigation {
    position: Vec3,
    enabled: bool,
    calls: Vec<NavCall>,
}

impl RecordingNavigation {
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            enabled: true,
            calls: Vec::new(),
        }
    }

    #[must_use]
    pub fn calls(&self) -> &[NavCall] {
        &self.calls
    }

    /// Destinations requested so far.
    #[must_use]
    pub fn destinations(&self) -> Vec<Vec3> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                NavCall::Destination(point) => Some(*point),
                _ => None,
            })
            .collect()
    }

    /// Enable/disable toggles requested so far.
    #[must_use]
    pub fn toggles(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                NavCall::Enabled(flag) => Some(*flag),
                _ => None,
            })
            .collect()
    }

}

impl NavigationAgent for RecordingNavigation {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.calls.push(NavCall::Enabled(enabled));
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_destination(&mut self, point: Vec3) {
        self.calls.push(NavCall::Destination(point));
    }

    fn set_speed(&mut self, speed: f32) {
        self.calls.push(NavCall::Speed(speed));
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

/// Target with real health bookkeeping and a log of received damage.
#[derive(Debug)]
pub struct DummyTarget {
    position: Cell<Vec3>,
    vitals: Vitals,
    hits: RefCell<Vec<f32>>,
}

impl DummyTarget {
    #[must_use]
    pub fn new(position: Vec3, health: f32) -> Self {
        Self {
            position: Cell::new(position),
            vitals: Vitals::new(health),
            hits: RefCell::new(Vec::new()),
        }
    }

    pub fn move_to(&self, position: Vec3) {
        self.position.set(position);
    }

    /// Every `apply_damage` amount received, including ones after death.
    #[must_use]
    pub fn hits(&self) -> Vec<f32> {
        self.hits.borrow().clone()
    }

    /// Kills the target outright, firing its death listeners.
    pub fn kill(&self) {
        self.vitals.kill();
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.vitals.listener_count()
    }
}

impl Damageable for DummyTarget {
    fn apply_damage(&self, amount: f32) {
        self.hits.borrow_mut().push(amount);
        self.vitals.apply_damage(amount);
    }

    fn current_health(&self) -> f32 {
        self.vitals.current_health()
    }

    fn is_dead(&self) -> bool {
        self.vitals.is_dead()
    }
}

impl DeathNotifier for DummyTarget {
    fn subscribe_death(&self, listener: DeathListener) -> ListenerId {
        self.vitals.subscribe_death(listener)
    }

    fn unsubscribe_death(&self, id: ListenerId) {
        self.vitals.unsubscribe_death(id);
    }
}

impl Targetable for DummyTarget {
    fn position(&self) -> Vec3 {
        self.position.get()
    }
}

/// Health display counting refreshes.
#[derive(Debug, Default)]
pub struct CountingDisplay {
    refreshes: Cell<usize>,
}

impl CountingDisplay {
    #[must_use]
    pub fn refreshes(&self) -> usize {
        self.refreshes.get()
    }
}

impl HealthDisplay for CountingDisplay {
    fn refresh(&self) {
        self.refreshes.set(self.refreshes.get() + 1);
    }
}

/// Effect spawner keeping every spawned effect.
#[derive(Debug, Default)]
pub struct RecordingEffects {
    spawned: RefCell<Vec<DeathEffect>>,
}

impl RecordingEffects {
    #[must_use]
    pub fn spawned(&self) -> Vec<DeathEffect> {
        self.spawned.borrow().clone()
    }
}

impl EffectSpawner for RecordingEffects {
    fn spawn(&self, effect: DeathEffect) {
        self.spawned.borrow_mut().push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_logs_calls_in_order() {
        let mut nav = RecordingNavigation::at(Vec3::ZERO);
        nav.set_enabled(false);
        nav.set_destination(Vec3::X);
        nav.set_enabled(true);
        assert_eq!(
            nav.calls(),
            &[
                NavCall::Enabled(false),
                NavCall::Destination(Vec3::X),
                NavCall::Enabled(true)
            ]
        );
        assert_eq!(nav.toggles(), vec![false, true]);
    }

    #[test]
    fn dummy_target_records_hits() {
        let target = DummyTarget::new(Vec3::ZERO, 5.0);
        target.apply_damage(2.0);
        target.apply_damage(3.0);
        assert_eq!(target.hits(), vec![2.0, 3.0]);
        assert!(target.is_dead());
    }
}
