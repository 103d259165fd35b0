//! End-to-end encounters stepped by the simulation clock.

use std::rc::Rc;

use glam::{Quat, Vec3};
use rstest::rstest;
use stalker::{
    AgentConfig, AgentState, Combatant, ConfigError, Damageable, Difficulty, Encounter,
    HealthDisplay, NavigationAgent, Rgba,
};
use test_utils::CountingDisplay;

fn arena(health: f32) -> (Encounter, Rc<Combatant>, Rc<CountingDisplay>) {
    let player = Rc::new(Combatant::new(Vec3::ZERO, health));
    let display = Rc::new(CountingDisplay::default());
    let encounter = Encounter::new(
        0.1,
        AgentConfig::default(),
        Rc::clone(&player),
        Rc::clone(&display) as Rc<dyn HealthDisplay>,
    );
    (encounter, player, display)
}

fn brute() -> Difficulty {
    Difficulty::new(5.0, 10.0, 30.0, Rgba::rgb(0.6, 0.1, 0.1))
}

#[test]
fn lone_hunter_runs_down_the_player() {
    let (mut encounter, player, display) = arena(30.0);
    encounter
        .spawn_agent(Vec3::new(10.0, 0.0, 0.0), Some(brute()))
        .expect("valid difficulty");

    encounter.run(100);

    assert!(player.is_dead());
    assert_eq!(display.refreshes(), 3);
    let agent = &encounter.agents()[0];
    assert_eq!(agent.state(), AgentState::Idle);
    assert!(!agent.has_target());
    assert!(agent.navigation().is_enabled());
    assert_eq!(encounter.fallen(), 0);
    assert_eq!(encounter.ticks(), 100);
}

#[rstest]
#[case::pair(2)]
#[case::pack(5)]
fn pack_stands_down_together(#[case] size: u32) {
    let (mut encounter, player, _) = arena(100.0);
    for index in 0..size {
        let angle = std::f32::consts::TAU * index as f32 / size as f32;
        let at = Quat::from_rotation_y(angle) * Vec3::new(6.0, 0.0, 0.0);
        encounter.spawn_agent(at, Some(brute())).expect("valid difficulty");
    }

    encounter.run(300);

    assert!(player.is_dead());
    assert_eq!(encounter.agents().len(), size as usize);
    assert!(encounter
        .agents()
        .iter()
        .all(|agent| agent.state() == AgentState::Idle && !agent.is_attacking()));
    assert_eq!(player.vitals().listener_count(), 0);
}

#[test]
fn fallen_agents_leave_a_fading_effect() {
    let (mut encounter, player, _) = arena(100.0);
    let tint = Rgba::rgb(0.1, 0.8, 0.3);
    encounter
        .spawn_agent(Vec3::new(20.0, 0.0, 0.0), Some(Difficulty::new(1.0, 1.0, 5.0, tint)))
        .expect("valid difficulty");
    encounter
        .spawn_agent(Vec3::new(-20.0, 0.0, 0.0), None)
        .expect("no difficulty");
    assert_eq!(player.vitals().listener_count(), 2);

    assert!(encounter.hit_agent(0, 50.0, Vec3::NEG_X));
    assert!(!encounter.hit_agent(5, 50.0, Vec3::X));

    assert_eq!(encounter.agents().len(), 1);
    assert_eq!(encounter.fallen(), 1);
    assert_eq!(player.vitals().listener_count(), 1);
    let active = encounter.effects().active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].color, tint);
    assert_eq!(active[0].position, Vec3::new(20.0, 0.0, 0.0));

    encounter.run(25);
    assert!(encounter.effects().active().is_empty());
    assert_eq!(encounter.effects().spawned(), 1);
}

#[test]
fn invalid_difficulty_spawns_nothing() {
    let (mut encounter, player, _) = arena(10.0);
    let outcome = encounter.spawn_agent(Vec3::X, Some(Difficulty::new(5.0, 1.0, -1.0, Rgba::RED)));

    assert!(matches!(
        outcome,
        Err(ConfigError::NotPositive { field: "health", .. })
    ));
    assert!(encounter.agents().is_empty());
    assert_eq!(player.vitals().listener_count(), 0);
}

#[test]
fn clock_drives_agents_from_time_zero() {
    let (mut encounter, player, _) = arena(50.0);
    encounter
        .spawn_agent(Vec3::new(1.0, 0.0, 0.0), Some(brute()))
        .expect("valid difficulty");

    let first = encounter.step();
    assert_eq!(first.now, 0.0);
    assert!(encounter.agents()[0].is_attacking());

    encounter.step();
    assert!((player.current_health() - 40.0).abs() < f32::EPSILON);
}
