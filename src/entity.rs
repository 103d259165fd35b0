//! Positioned living entities that agents can pursue.
use std::cell::Cell;

use glam::Vec3;

use crate::capabilities::{
    Damageable, DeathListener, DeathNotifier, ListenerId, Targetable,
};
use crate::vitals::Vitals;

/// A body with health, e.g. the player an agent hunts.
///
/// Shared as `Rc<Combatant>`; agents only keep a weak handle to it.
#[derive(Debug)]
pub struct Combatant {
    position: Cell<Vec3>,
    vitals: Vitals,
}

impl Combatant {
    /// A combatant at full health.
    #[must_use]
    pub fn new(position: Vec3, max_health: f32) -> Self {
        Self {
            position: Cell::new(position),
            vitals: Vitals::new(max_health),
        }
    }

    /// Teleports the combatant.
    pub fn move_to(&self, position: Vec3) {
        self.position.set(position);
    }

    /// Health pool and death listeners.
    #[must_use]
    pub const fn vitals(&self) -> &Vitals {
        &self.vitals
    }
}

impl Damageable for Combatant {
    fn apply_damage(&self, amount: f32) {
        self.vitals.apply_damage(amount);
    }

    fn current_health(&self) -> f32 {
        self.vitals.current_health()
    }

    fn is_dead(&self) -> bool {
        self.vitals.is_dead()
    }
}

impl DeathNotifier for Combatant {
    fn subscribe_death(&self, listener: DeathListener) -> ListenerId {
        self.vitals.subscribe_death(listener)
    }

    fn unsubscribe_death(&self, id: ListenerId) {
        self.vitals.unsubscribe_death(id);
    }
}

impl Targetable for Combatant {
    fn position(&self) -> Vec3 {
        self.position.get()
    }
}
