//! Hostile agent behaviour: pursue a target, lunge at it, stand down when it
//! dies.
//!
//! The agent is a three-state machine advanced by [`Agent::tick`]. Each tick
//! runs, in order:
//!
//! 1. the attack eligibility check, which may launch a lunge but never blocks;
//! 2. one increment of the lunge in flight, if any;
//! 3. the retarget timer, which refreshes the navigation destination while
//!    chasing.
//!
//! The target's death notification is delivered synchronously through a
//! listener registered at spawn. It may arrive in the middle of a strike (the
//! blow itself can be fatal), so the fields it touches live in a shared
//! [`TargetLink`] built from `Cell`s instead of behind `&mut self`.
//!
//! The target's death never aborts a lunge already in flight: the lunge
//! returns to its origin and re-enables navigation as usual, but the agent
//! stays idle.
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use glam::{Quat, Vec3};
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::attack::AttackSequence;
use crate::broadcast;
use crate::capabilities::{
    Damageable, DeathEffect, DeathListener, DeathNotifier, EffectSpawner, HealthDisplay,
    ListenerId, NavigationAgent, Targetable,
};
use crate::color::Rgba;
use crate::config::{AgentConfig, ConfigError, Difficulty};
use crate::numeric::expect_f32;
use crate::retarget::RetargetLoop;
use crate::schedule::Tick;
use crate::vector_math::within_range;
use crate::vitals::Vitals;
use crate::{DEFAULT_ATTACK_DAMAGE, DEFAULT_MAX_HEALTH};

/// Behavioural state of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgentState {
    /// No target; nothing runs. Terminal once entered.
    #[default]
    Idle,
    /// Navigating toward a live target.
    Chasing,
    /// A lunge is in flight and navigation is suspended.
    Attacking,
}

/// Collaborators shared by every agent of an encounter.
#[derive(Clone)]
pub struct AgentServices {
    /// Refreshed after each strike that lands on the target.
    pub display: Rc<dyn HealthDisplay>,
    /// Receives the agent's death effect.
    pub effects: Rc<dyn EffectSpawner>,
}

impl AgentServices {
    /// Bundles the display and effect collaborators.
    #[must_use]
    pub fn new(display: Rc<dyn HealthDisplay>, effects: Rc<dyn EffectSpawner>) -> Self {
        Self { display, effects }
    }
}

/// State reachable from the target's death listener.
///
/// `has_target` is derived from `target`, so the two can never disagree.
#[derive(Default)]
struct TargetLink {
    state: Cell<AgentState>,
    target: RefCell<Option<Weak<dyn Targetable>>>,
}

impl TargetLink {
    fn state(&self) -> AgentState {
        self.state.get()
    }

    fn has_target(&self) -> bool {
        self.target.borrow().is_some()
    }

    fn upgrade(&self) -> Option<Rc<dyn Targetable>> {
        self.target.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// Drops the target and goes idle. Returns `false` if already released.
    fn release(&self) -> bool {
        let released = self.target.borrow_mut().take().is_some();
        self.state.set(AgentState::Idle);
        released
    }
}

/// A hostile melee agent.
///
/// `N` is the navigation component moving this agent's body; it is owned by
/// the agent and exposed through [`Agent::navigation`] for inspection.
pub struct Agent<N: NavigationAgent> {
    config: AgentConfig,
    navigation: N,
    vitals: Vitals,
    link: Rc<TargetLink>,
    subscription: Option<ListenerId>,
    next_attack_time: f64,
    attack: Option<AttackSequence>,
    retarget: Option<RetargetLoop>,
    damage: f32,
    configured: bool,
    body_color: Rgba,
    original_color: Rgba,
    death_effect_color: Rgba,
    services: AgentServices,
}

impl<N: NavigationAgent> Agent<N> {
    /// Creates an agent and, when `target` is alive, starts chasing it.
    ///
    /// Without a live target the agent is born idle and stays dormant.
    ///
    /// # Errors
    /// Returns the validation errors of [`AgentConfig::validate`].
    pub fn spawn(
        config: AgentConfig,
        navigation: N,
        services: AgentServices,
        target: Option<Rc<dyn Targetable>>,
    ) -> Result<Self, ConfigError> {
        let mut agent = Self {
            config: config.validate()?,
            navigation,
            vitals: Vitals::new(DEFAULT_MAX_HEALTH),
            link: Rc::new(TargetLink::default()),
            subscription: None,
            next_attack_time: 0.0,
            attack: None,
            retarget: None,
            damage: DEFAULT_ATTACK_DAMAGE,
            configured: false,
            body_color: Rgba::default(),
            original_color: Rgba::default(),
            death_effect_color: Rgba::default(),
            services,
        };
        match target {
            Some(found) if !found.is_dead() => agent.acquire(&found),
            Some(_) => debug!("spawned next to a dead target, staying idle"),
            None => debug!("spawned without a target, staying idle"),
        }
        Ok(agent)
    }

    fn acquire(&mut self, target: &Rc<dyn Targetable>) {
        let link = Rc::downgrade(&self.link);
        let listener: DeathListener = Box::new(move || {
            if let Some(live) = link.upgrade() {
                if live.release() {
                    debug!("target died, agent standing down");
                }
            }
        });
        self.subscription = Some(target.subscribe_death(listener));
        *self.link.target.borrow_mut() = Some(Rc::downgrade(target));
        self.link.state.set(AgentState::Chasing);
        self.retarget = Some(RetargetLoop::start(self.config.retarget_interval));
        info!("agent chasing target at {:?}", target.position());
    }

    /// Assigns combat stats and tint. Allowed once per life.
    ///
    /// # Errors
    /// Returns [`ConfigError::AlreadyConfigured`] on a second call and the
    /// validation errors of [`Difficulty::validate`].
    pub fn configure(&mut self, difficulty: Difficulty) -> Result<(), ConfigError> {
        if self.configured {
            warn!("ignoring second difficulty assignment");
            return Err(ConfigError::AlreadyConfigured);
        }
        let accepted = difficulty.validate()?;
        self.navigation.set_speed(accepted.speed);
        self.damage = accepted.damage;
        self.vitals.reset(accepted.health);
        self.death_effect_color = accepted.color.opaque();
        self.body_color = accepted.color;
        self.original_color = accepted.color;
        self.configured = true;
        debug!("difficulty assigned: {accepted:?}");
        Ok(())
    }

    /// Advances every behaviour by one tick.
    ///
    /// A dead agent only settles a lunge it died in: the body returns to
    /// the lunge origin, the tint is restored and navigation re-enabled.
    pub fn tick(&mut self, tick: Tick) {
        if self.vitals.is_dead() {
            self.abandon_attack();
            return;
        }
        self.check_attack(tick.now);
        self.advance_attack(tick.delta);
        self.advance_retarget(tick.delta);
    }

    /// Forces the agent idle and forgets its target. Idempotent.
    pub fn on_target_death(&mut self) {
        if let Some(id) = self.subscription.take() {
            if let Some(target) = self.link.upgrade() {
                target.unsubscribe_death(id);
            }
        }
        if self.link.release() {
            debug!("target released, agent standing down");
        }
    }

    /// Receives a blow on the agent's own body.
    ///
    /// A fatal blow announces the death globally and leaves a death effect at
    /// `hit_point`, facing along `hit_direction`, before the damage is booked.
    pub fn take_hit(&self, amount: f32, hit_point: Vec3, hit_direction: Vec3) {
        if self.vitals.is_dead() {
            return;
        }
        if amount >= self.vitals.current_health() {
            info!("agent killed at {hit_point:?}");
            broadcast::announce();
            let forward = hit_direction.try_normalize().unwrap_or(Vec3::Z);
            self.services.effects.spawn(DeathEffect {
                position: hit_point,
                rotation: Quat::from_rotation_arc(Vec3::Z, forward),
                color: self.death_effect_color,
                lifetime: self.config.death_effect_lifetime,
            });
        }
        self.vitals.apply_damage(amount);
    }

    fn check_attack(&mut self, now: f64) {
        if self.link.state() != AgentState::Chasing || now < self.next_attack_time {
            return;
        }
        let Some(target) = self.live_target() else {
            return;
        };
        let origin = self.navigation.position();
        let aim = target.position();
        if !within_range(origin, aim, self.config.attack_range) {
            return;
        }
        self.next_attack_time = now + self.config.attack_cooldown;
        self.link.state.set(AgentState::Attacking);
        self.navigation.set_enabled(false);
        self.body_color = Rgba::RED;
        self.attack = Some(AttackSequence::begin(origin, aim, self.config.attack_speed));
        debug!("lunging from {origin:?} at {aim:?}, next attack at {}", self.next_attack_time);
    }

    fn advance_attack(&mut self, delta: f64) {
        let Some(sequence) = self.attack.as_mut() else {
            return;
        };
        let step = sequence.advance(expect_f32(delta));
        self.navigation.set_position(step.position);
        if step.strike {
            self.strike();
        }
        if step.finished {
            self.finish_attack();
        }
    }

    fn strike(&mut self) {
        match self.live_target() {
            Some(target) => {
                target.apply_damage(self.damage);
                self.services.display.refresh();
                debug!("strike landed for {}", self.damage);
            }
            None => debug!("strike hit nothing, target is gone"),
        }
    }

    fn finish_attack(&mut self) {
        self.attack = None;
        self.body_color = self.original_color;
        self.navigation.set_enabled(true);
        if self.link.has_target() {
            self.link.state.set(AgentState::Chasing);
        }
        trace!("lunge finished, state {:?}", self.link.state());
    }

    fn abandon_attack(&mut self) {
        let Some(sequence) = self.attack.take() else {
            return;
        };
        self.navigation.set_position(sequence.origin());
        self.body_color = self.original_color;
        self.navigation.set_enabled(true);
        debug!("lunge abandoned, agent is dead");
    }

    fn advance_retarget(&mut self, delta: f64) {
        if self.retarget.is_none() {
            return;
        }
        let Some(target) = self.live_target() else {
            self.retarget = None;
            debug!("retarget loop stopped");
            return;
        };
        let chasing = self.link.state() == AgentState::Chasing;
        if let Some(retarget) = self.retarget.as_mut() {
            if let Some(destination) = retarget.advance(delta, chasing, target.position()) {
                trace!("new destination {destination:?}");
                self.navigation.set_destination(destination);
            }
        }
    }

    /// The held target if it can still be fought; releases stale handles.
    fn live_target(&mut self) -> Option<Rc<dyn Targetable>> {
        match self.link.upgrade() {
            Some(target) if !target.is_dead() => Some(target),
            _ => {
                if self.link.has_target() {
                    self.on_target_death();
                }
                None
            }
        }
    }

    /// Current behaviour state.
    #[must_use]
    pub fn state(&self) -> AgentState {
        self.link.state()
    }

    /// Whether a live target is still tracked.
    #[must_use]
    pub fn has_target(&self) -> bool {
        self.link.has_target()
    }

    /// Whether the retarget loop is still scheduled.
    #[must_use]
    pub const fn is_retargeting(&self) -> bool {
        self.retarget.is_some()
    }

    /// Whether a lunge is in flight, even after the target died.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.attack.is_some()
    }

    /// Progress of the lunge in flight.
    #[must_use]
    pub fn attack_progress(&self) -> Option<f32> {
        self.attack.as_ref().map(AttackSequence::percent)
    }

    /// Earliest timestamp at which the next lunge may launch.
    #[must_use]
    pub const fn next_attack_time(&self) -> f64 {
        self.next_attack_time
    }

    /// Damage dealt by each strike.
    #[must_use]
    pub const fn attack_damage(&self) -> f32 {
        self.damage
    }

    /// Tint currently shown; red while lunging.
    #[must_use]
    pub const fn body_color(&self) -> Rgba {
        self.body_color
    }

    /// Tint restored when a lunge ends.
    #[must_use]
    pub const fn original_color(&self) -> Rgba {
        self.original_color
    }

    /// Colour of the effect spawned on death.
    #[must_use]
    pub const fn death_effect_color(&self) -> Rgba {
        self.death_effect_color
    }

    /// Validated tuning the agent was spawned with.
    #[must_use]
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Health pool of the agent itself.
    #[must_use]
    pub const fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    /// Navigation capability driving the body.
    #[must_use]
    pub const fn navigation(&self) -> &N {
        &self.navigation
    }

    /// Mutable access to the navigation capability.
    pub fn navigation_mut(&mut self) -> &mut N {
        &mut self.navigation
    }

    /// World position, as reported by navigation.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.navigation.position()
    }
}

impl<N: NavigationAgent> Damageable for Agent<N> {
    fn apply_damage(&self, amount: f32) {
        self.take_hit(amount, self.position(), Vec3::Z);
    }

    fn current_health(&self) -> f32 {
        self.vitals.current_health()
    }

    fn is_dead(&self) -> bool {
        self.vitals.is_dead()
    }
}

impl<N: NavigationAgent> DeathNotifier for Agent<N> {
    fn subscribe_death(&self, listener: DeathListener) -> ListenerId {
        self.vitals.subscribe_death(listener)
    }

    fn unsubscribe_death(&self, id: ListenerId) {
        self.vitals.unsubscribe_death(id);
    }
}

impl<N: NavigationAgent> Targetable for Agent<N> {
    fn position(&self) -> Vec3 {
        self.navigation.position()
    }
}

impl<N: NavigationAgent> Drop for Agent<N> {
    fn drop(&mut self) {
        if let (Some(id), Some(target)) = (self.subscription.take(), self.link.upgrade()) {
            target.unsubscribe_death(id);
        }
    }
}

impl<N: NavigationAgent> std::fmt::Debug for Agent<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("state", &self.state())
            .field("has_target", &self.has_target())
            .field("next_attack_time", &self.next_attack_time)
            .field("attack", &self.attack)
            .field("vitals", &self.vitals)
            .finish_non_exhaustive()
    }
}
