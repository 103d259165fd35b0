//! Behavioural controller for hostile melee agents.
//!
//! An [`Agent`] chases a [`Targetable`], lunges at it when in range and off
//! cooldown, and stands down for good once the target dies. Everything is
//! driven by explicit [`Tick`]s: there are no threads and no hidden
//! coroutines, only progress cursors ([`AttackSequence`], [`RetargetLoop`])
//! advanced once per tick.
//!
//! ```rust
//! use std::rc::Rc;
//! use glam::Vec3;
//! use stalker::prelude::*;
//!
//! let player = Rc::new(Combatant::new(Vec3::ZERO, 100.0));
//! let services = AgentServices::new(Rc::new(NoDisplay), Rc::new(ExpiringEffects::default()));
//! let mut agent = Agent::spawn(
//!     AgentConfig::default(),
//!     SteeringNavigation::new(Vec3::new(2.0, 0.0, 0.0)),
//!     services,
//!     Some(player.clone() as Rc<dyn Targetable>),
//! )
//! .unwrap();
//! agent.configure(Difficulty::new(5.0, 10.0, 50.0, Rgba::RED)).unwrap();
//!
//! let mut clock = SimulationClock::new(0.1);
//! for _ in 0..10 {
//!     agent.tick(clock.advance());
//! }
//! assert_eq!(player.current_health(), 90.0);
//! ```
pub mod agent;
pub mod attack;
pub mod broadcast;
pub mod capabilities;
pub mod color;
pub mod config;
pub mod constants;
pub mod effects;
pub mod encounter;
pub mod entity;
pub mod logging;
pub mod navigation;
pub mod numeric;
pub mod retarget;
pub mod schedule;
pub mod vector_math;
pub mod vitals;
pub use constants::*;

// Re-export commonly used items
pub use agent::{Agent, AgentServices, AgentState};
pub use attack::{AttackSequence, LungeStep};
pub use capabilities::{
    Damageable, DeathEffect, DeathListener, DeathNotifier, EffectSpawner, HealthDisplay,
    ListenerId, NavigationAgent, NoDisplay, Targetable,
};
pub use color::Rgba;
pub use config::{AgentConfig, ConfigError, Difficulty};
pub use effects::ExpiringEffects;
pub use encounter::{Encounter, PackAgent};
pub use entity::Combatant;
pub use logging::init as init_logging;
pub use navigation::SteeringNavigation;
pub use retarget::RetargetLoop;
pub use schedule::{RepeatingTimer, SimulationClock, Tick};
pub use vector_math::{ground_projection, lunge_factor, lunge_position, within_range};
pub use vitals::Vitals;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use stalker::prelude::*;
    //! ```

    pub use crate::{
        Agent, AgentConfig, AgentServices, AgentState, Combatant, Damageable, Difficulty,
        ExpiringEffects, NavigationAgent, NoDisplay, Rgba, SimulationClock, SteeringNavigation,
        Targetable, Tick,
    };
}
