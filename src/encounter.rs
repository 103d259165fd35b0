//! In-memory encounter: one target hunted by a pack of agents.
//!
//! The encounter owns the clock and steps every agent, its navigator and the
//! effect spawner once per tick. Dead agents are dropped at the end of the
//! tick in which they died.
use std::rc::Rc;

use glam::Vec3;
use log::info;

use crate::agent::{Agent, AgentServices};
use crate::capabilities::{Damageable, EffectSpawner, HealthDisplay, Targetable};
use crate::config::{AgentConfig, ConfigError, Difficulty};
use crate::effects::ExpiringEffects;
use crate::entity::Combatant;
use crate::navigation::SteeringNavigation;
use crate::schedule::{SimulationClock, Tick};

/// Agents as driven by an [`Encounter`].
pub type PackAgent = Agent<SteeringNavigation>;

/// A pack of agents hunting one shared target on a fixed-step clock.
///
/// Dead agents are removed after each step and counted as fallen.
pub struct Encounter {
    clock: SimulationClock,
    config: AgentConfig,
    target: Rc<Combatant>,
    agents: Vec<PackAgent>,
    effects: Rc<ExpiringEffects>,
    services: AgentServices,
    fallen: usize,
}

impl Encounter {
    /// Creates an empty encounter stepping `step` seconds per tick.
    #[must_use]
    pub fn new(
        step: f64,
        config: AgentConfig,
        target: Rc<Combatant>,
        display: Rc<dyn HealthDisplay>,
    ) -> Self {
        let effects = Rc::new(ExpiringEffects::default());
        let spawner: Rc<dyn EffectSpawner> = Rc::clone(&effects) as Rc<dyn EffectSpawner>;
        let services = AgentServices::new(display, spawner);
        info!("encounter created, {step}s per tick");
        Self {
            clock: SimulationClock::new(step),
            config,
            target,
            agents: Vec::new(),
            effects,
            services,
            fallen: 0,
        }
    }

    /// Spawns an agent at `position` hunting the encounter's target and
    /// returns its index.
    ///
    /// # Errors
    /// Propagates [`Agent::spawn`] and [`Agent::configure`] failures; the
    /// agent is not added then.
    pub fn spawn_agent(
        &mut self,
        position: Vec3,
        difficulty: Option<Difficulty>,
    ) -> Result<usize, ConfigError> {
        let target: Rc<dyn Targetable> = Rc::clone(&self.target) as Rc<dyn Targetable>;
        let mut agent = Agent::spawn(
            self.config.clone(),
            SteeringNavigation::new(position),
            self.services.clone(),
            Some(target),
        )?;
        if let Some(assigned) = difficulty {
            agent.configure(assigned)?;
        }
        self.agents.push(agent);
        Ok(self.agents.len() - 1)
    }

    /// Advances the whole encounter by one tick.
    pub fn step(&mut self) -> Tick {
        let tick = self.clock.advance();
        for agent in &mut self.agents {
            agent.tick(tick);
            agent.navigation_mut().advance(tick.delta);
        }
        self.effects.tick(tick.delta);
        self.remove_fallen();
        tick
    }

    /// Runs `ticks` steps.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Deals `amount` to the agent at `index`, as if hit along `direction`.
    /// Returns `false` when no such agent exists.
    pub fn hit_agent(&mut self, index: usize, amount: f32, direction: Vec3) -> bool {
        let Some(agent) = self.agents.get(index) else {
            return false;
        };
        agent.take_hit(amount, agent.position(), direction);
        self.remove_fallen();
        true
    }

    fn remove_fallen(&mut self) {
        let before = self.agents.len();
        self.agents.retain(|agent| !agent.is_dead());
        let removed = before - self.agents.len();
        if removed > 0 {
            self.fallen += removed;
            info!("{removed} agent(s) fell, {} remain", self.agents.len());
        }
    }

    /// Agents still alive, in spawn order.
    #[must_use]
    pub fn agents(&self) -> &[PackAgent] {
        &self.agents
    }

    /// The shared target.
    #[must_use]
    pub const fn target(&self) -> &Rc<Combatant> {
        &self.target
    }

    /// Death effects spawned by fallen agents.
    #[must_use]
    pub const fn effects(&self) -> &Rc<ExpiringEffects> {
        &self.effects
    }

    /// Agents removed after dying.
    #[must_use]
    pub const fn fallen(&self) -> usize {
        self.fallen
    }

    /// Ticks stepped so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.clock.ticks()
    }
}
