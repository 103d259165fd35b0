//! Process-wide "an agent died" notification.
//!
//! Spawn counters and score keepers attach here instead of to individual
//! agents. Subscription is additive only: listeners live until the process
//! exits. Listeners are invoked outside the registry lock, so a listener may
//! itself subscribe without deadlocking.
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;

type Listener = Arc<dyn Fn() + Send + Sync>;

static LISTENERS: Lazy<Mutex<Vec<Listener>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Attaches `listener` to every future agent death.
pub fn subscribe<F>(listener: F)
where
    F: Fn() + Send + Sync + 'static,
{
    LISTENERS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(Arc::new(listener));
}

/// Runs every attached listener once. Order among listeners is unspecified.
pub fn announce() {
    let snapshot: Vec<Listener> = LISTENERS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    for listener in snapshot {
        listener();
    }
}
