//! Collaborator contracts the agent controller depends on.
//!
//! The controller never owns its collaborators' implementations. Navigation is
//! injected as a generic parameter, everything shared between agents (the
//! target, the health display, the effect spawner) as reference-counted trait
//! objects. All traits are single-threaded: mutation goes through `&self` with
//! interior mutability so a target can be shared by a whole pack of agents.
use glam::{Quat, Vec3};

use crate::color::Rgba;

/// Handle returned by [`DeathNotifier::subscribe_death`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Zero-argument callback run when an entity dies.
pub type DeathListener = Box<dyn FnMut()>;

/// Health capability shared by agents and their targets.
pub trait Damageable {
    /// Removes `amount` health. Dead entities ignore further damage.
    fn apply_damage(&self, amount: f32);
    /// Remaining health, never below zero.
    fn current_health(&self) -> f32;
    /// Whether health has reached zero.
    fn is_dead(&self) -> bool;
}

/// One-shot "died" event.
pub trait DeathNotifier {
    /// Registers `listener`; it runs at most once, when the entity dies.
    fn subscribe_death(&self, listener: DeathListener) -> ListenerId;
    /// Removes a listener. Unknown ids are ignored.
    fn unsubscribe_death(&self, id: ListenerId);
}

/// Something an agent can pursue and strike.
pub trait Targetable: Damageable + DeathNotifier {
    /// Point the agent aims its lunge at.
    fn position(&self) -> Vec3;
}

/// Path-following subsystem moving an agent's body.
///
/// While disabled the navigator must leave the body where the controller
/// puts it with [`NavigationAgent::set_position`].
pub trait NavigationAgent {
    /// Suspends or resumes path following.
    fn set_enabled(&mut self, enabled: bool);
    /// Whether path following is active.
    fn is_enabled(&self) -> bool;
    /// Requests a path toward `point`, which lies on the ground plane.
    fn set_destination(&mut self, point: Vec3);
    /// Sets the travel speed.
    fn set_speed(&mut self, speed: f32);
    /// Current body position.
    fn position(&self) -> Vec3;
    /// Places the body directly, bypassing path following.
    fn set_position(&mut self, position: Vec3);
}

/// UI hook refreshed after a strike lands.
pub trait HealthDisplay {
    /// Redraws the target's health.
    fn refresh(&self);
}

/// Visual effect left behind when an agent dies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathEffect {
    /// Where the agent died.
    pub position: Vec3,
    /// Rotation taking +Z (forward) onto the hit direction.
    pub rotation: Quat,
    /// The agent's death effect colour.
    pub color: Rgba,
    /// Seconds until the effect is removed.
    pub lifetime: f64,
}

/// Spawns timed effects. Implementations own the cleanup.
pub trait EffectSpawner {
    /// Shows `effect` until its lifetime runs out.
    fn spawn(&self, effect: DeathEffect);
}

/// Health display for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDisplay;

impl HealthDisplay for NoDisplay {
    fn refresh(&self) {}
}
