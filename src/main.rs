//! Headless demo: a pack of agents hunting a stationary player.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use glam::{Quat, Vec3};
use log::info;
use stalker::{
    broadcast, init_logging, AgentConfig, Combatant, Damageable, Difficulty, Encounter,
    HealthDisplay, Rgba,
};

/// Headless encounter: a pack of agents hunting a stationary player
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON agent configuration; defaults apply to missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    step: f64,
    /// Agents spawned in a ring around the player
    #[arg(long, default_value_t = 3)]
    agents: u32,
    /// Ring radius
    #[arg(long, default_value_t = 12.0)]
    distance: f32,
    /// Player health
    #[arg(long, default_value_t = 100.0)]
    health: f32,
}

/// Logs the player's health whenever a strike lands.
struct LoggedHealth(Rc<Combatant>);

impl HealthDisplay for LoggedHealth {
    fn refresh(&self) {
        info!("player health: {:.1}", self.0.current_health());
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AgentConfig> {
    let Some(file) = path else {
        return Ok(AgentConfig::default());
    };
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("reading agent configuration {}", file.display()))?;
    AgentConfig::from_json_str(&json)
        .with_context(|| format!("parsing agent configuration {}", file.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    ensure!(args.step > 0.0, "--step must be positive");

    let config = load_config(args.config.as_ref())?;
    broadcast::subscribe(|| info!("an agent has fallen"));

    let player = Rc::new(Combatant::new(Vec3::ZERO, args.health));
    let display = Rc::new(LoggedHealth(Rc::clone(&player)));
    let mut encounter = Encounter::new(args.step, config, Rc::clone(&player), display);

    let difficulty = Difficulty::new(3.5, 10.0, 30.0, Rgba::rgb(0.8, 0.3, 0.2));
    for index in 0..args.agents {
        #[expect(
            clippy::cast_precision_loss,
            reason = "Agent counts are tiny."
        )]
        let angle = std::f32::consts::TAU * index as f32 / args.agents as f32;
        let position = Quat::from_rotation_y(angle) * Vec3::new(args.distance, 0.0, 0.0);
        encounter
            .spawn_agent(position, Some(difficulty))
            .context("spawning agent")?;
    }

    encounter.run(args.ticks);

    info!(
        "after {} ticks: player health {:.1}, {} agent(s) standing, {} fallen",
        encounter.ticks(),
        player.current_health(),
        encounter.agents().len(),
        encounter.fallen()
    );
    for (index, agent) in encounter.agents().iter().enumerate() {
        info!(
            "agent {index}: {:?} at {:?}, heading for {:?} at {:.1}/s",
            agent.state(),
            agent.position(),
            agent.navigation().destination(),
            agent.navigation().speed()
        );
    }
    Ok(())
}
