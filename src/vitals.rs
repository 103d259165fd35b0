//! Health bookkeeping with a one-shot death notification.
use std::cell::{Cell, RefCell};

use hashbrown::HashMap;
use log::debug;

use crate::capabilities::{Damageable, DeathListener, DeathNotifier, ListenerId};

/// Current and maximum health of a living entity.
///
/// Death happens once: the first time health drops to zero every registered
/// listener runs, then the listener set is discarded. Listeners may call back
/// into the same `Vitals` (for instance to unsubscribe) while they run.
#[derive(Default)]
pub struct Vitals {
    max_health: Cell<f32>,
    health: Cell<f32>,
    dead: Cell<bool>,
    next_listener: Cell<u64>,
    listeners: RefCell<HashMap<ListenerId, DeathListener>>,
}

impl Vitals {
    /// Alive, with health filled to `max_health`.
    #[must_use]
    pub fn new(max_health: f32) -> Self {
        let vitals = Self::default();
        vitals.reset(max_health);
        vitals
    }

    /// Sets a new maximum and refills health to it.
    ///
    /// Has no effect on a dead entity.
    pub fn reset(&self, max_health: f32) {
        if self.dead.get() {
            return;
        }
        self.max_health.set(max_health);
        self.health.set(max_health);
    }

    /// Current maximum health.
    #[must_use]
    pub fn max_health(&self) -> f32 {
        self.max_health.get()
    }

    /// Number of listeners still waiting for the death event.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Marks the entity dead and runs the death listeners once.
    pub fn kill(&self) {
        if self.dead.replace(true) {
            return;
        }
        self.health.set(0.0);
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        debug!("entity died, notifying {} listener(s)", listeners.len());
        for (_, mut listener) in listeners {
            listener();
        }
    }
}

impl Damageable for Vitals {
    fn apply_damage(&self, amount: f32) {
        if self.dead.get() || !amount.is_finite() || amount <= 0.0 {
            return;
        }
        let remaining = self.health.get() - amount;
        if remaining <= 0.0 {
            self.kill();
        } else {
            self.health.set(remaining);
        }
    }

    fn current_health(&self) -> f32 {
        self.health.get()
    }

    fn is_dead(&self) -> bool {
        self.dead.get()
    }
}

impl DeathNotifier for Vitals {
    fn subscribe_death(&self, listener: DeathListener) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        // Dead entities never fire again, so the listener is simply dropped.
        if !self.dead.get() {
            self.listeners.borrow_mut().insert(id, listener);
        }
        id
    }

    fn unsubscribe_death(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(&id);
    }
}

impl std::fmt::Debug for Vitals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vitals")
            .field("max_health", &self.max_health.get())
            .field("health", &self.health.get())
            .field("dead", &self.dead.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::rc::Rc;

    fn counter(vitals: &Vitals) -> Rc<Cell<u32>> {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        vitals.subscribe_death(Box::new(move || seen.set(seen.get() + 1)));
        calls
    }

    #[rstest]
    #[case::partial(3.0, 7.0, false)]
    #[case::exact(10.0, 0.0, true)]
    #[case::overkill(25.0, 0.0, true)]
    fn damage_reduces_health(#[case] damage: f32, #[case] left: f32, #[case] dead: bool) {
        let vitals = Vitals::new(10.0);
        vitals.apply_damage(damage);
        assert_eq!(vitals.current_health(), left);
        assert_eq!(vitals.is_dead(), dead);
    }

    #[test]
    fn death_fires_listeners_once() {
        let vitals = Vitals::new(5.0);
        let calls = counter(&vitals);
        vitals.apply_damage(5.0);
        vitals.apply_damage(5.0);
        vitals.kill();
        assert_eq!(calls.get(), 1);
        assert_eq!(vitals.listener_count(), 0);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let vitals = Vitals::new(5.0);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let id = vitals.subscribe_death(Box::new(move || seen.set(seen.get() + 1)));
        vitals.unsubscribe_death(id);
        vitals.kill();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn listener_may_reenter_during_death() {
        let vitals = Rc::new(Vitals::new(1.0));
        let inner = Rc::clone(&vitals);
        let id = Rc::new(Cell::new(None));
        let own_id = Rc::clone(&id);
        let registered = vitals.subscribe_death(Box::new(move || {
            if let Some(listener) = own_id.get() {
                inner.unsubscribe_death(listener);
            }
            inner.apply_damage(1.0);
        }));
        id.set(Some(registered));
        vitals.apply_damage(2.0);
        assert!(vitals.is_dead());
    }

    #[rstest]
    #[case::negative(-4.0)]
    #[case::nan(f32::NAN)]
    #[case::zero(0.0)]
    fn ignores_meaningless_damage(#[case] damage: f32) {
        let vitals = Vitals::new(10.0);
        vitals.apply_damage(damage);
        assert_eq!(vitals.current_health(), 10.0);
    }

    #[test]
    fn reset_refills_health() {
        let vitals = Vitals::new(10.0);
        vitals.apply_damage(4.0);
        vitals.reset(50.0);
        assert_eq!(vitals.current_health(), 50.0);
        assert_eq!(vitals.max_health(), 50.0);
    }
}
