//! The agent's own death: global announcement and death effect.

use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use glam::Vec3;
use mockall::mock;
use rstest::rstest;
use serial_test::serial;
use stalker::{
    broadcast, Agent, AgentConfig, AgentServices, Damageable, DeathEffect, Difficulty,
    EffectSpawner, NoDisplay, Rgba, Targetable, Tick,
};
use test_utils::{DummyTarget, RecordingEffects, RecordingNavigation};

mock! {
    pub Effects {}
    impl EffectSpawner for Effects {
        fn spawn(&self, effect: DeathEffect);
    }
}

fn announcements() -> Arc<AtomicUsize> {
    let heard = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&heard);
    broadcast::subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    heard
}

fn lone_agent(effects: Rc<dyn EffectSpawner>) -> Agent<RecordingNavigation> {
    Agent::spawn(
        AgentConfig::default(),
        RecordingNavigation::at(Vec3::new(3.0, 0.0, 0.0)),
        AgentServices::new(Rc::new(NoDisplay), effects),
        None,
    )
    .expect("valid agent config")
}

#[test]
#[serial(agent_deaths)]
fn fatal_hit_announces_and_leaves_an_effect() {
    let heard = announcements();
    let tint = Rgba::rgb(0.2, 0.6, 0.9);
    let hit_point = Vec3::new(3.0, 1.0, 0.0);

    let mut effects = MockEffects::new();
    effects
        .expect_spawn()
        .withf(move |effect| {
            effect.position == hit_point
                && effect.color == tint
                && (effect.lifetime - 2.0).abs() < 1e-9
        })
        .times(1)
        .return_const(());
    let mut agent = lone_agent(Rc::new(effects));
    agent
        .configure(Difficulty::new(5.0, 10.0, 25.0, tint))
        .expect("valid difficulty");

    agent.take_hit(25.0, hit_point, Vec3::X);

    assert!(agent.is_dead());
    assert_eq!(heard.load(Ordering::SeqCst), 1);
}

#[test]
#[serial(agent_deaths)]
fn glancing_hit_is_quiet() {
    let heard = announcements();
    let mut effects = MockEffects::new();
    effects.expect_spawn().never();
    let agent = lone_agent(Rc::new(effects));

    agent.take_hit(4.0, agent.position(), Vec3::X);

    assert!(!agent.is_dead());
    assert_abs_diff_eq!(agent.current_health(), 6.0);
    assert_eq!(heard.load(Ordering::SeqCst), 0);
}

#[rstest]
#[case::along_x(Vec3::X)]
#[case::down_and_back(Vec3::new(0.0, -1.0, -1.0))]
#[case::already_facing(Vec3::Z)]
#[serial(agent_deaths)]
fn effect_faces_along_the_hit(#[case] direction: Vec3) {
    let effects = Rc::new(RecordingEffects::default());
    let agent = lone_agent(Rc::clone(&effects) as Rc<dyn EffectSpawner>);

    agent.take_hit(100.0, agent.position(), direction);

    let spawned = effects.spawned();
    assert_eq!(spawned.len(), 1);
    let forward = spawned[0].rotation * Vec3::Z;
    let expected = direction.normalize();
    assert_abs_diff_eq!(forward.x, expected.x, epsilon = 1e-5);
    assert_abs_diff_eq!(forward.y, expected.y, epsilon = 1e-5);
    assert_abs_diff_eq!(forward.z, expected.z, epsilon = 1e-5);
}

#[test]
#[serial(agent_deaths)]
fn zero_direction_still_spawns_an_effect() {
    let effects = Rc::new(RecordingEffects::default());
    let agent = lone_agent(Rc::clone(&effects) as Rc<dyn EffectSpawner>);

    agent.take_hit(100.0, Vec3::ONE, Vec3::ZERO);

    let spawned = effects.spawned();
    assert_eq!(spawned.len(), 1);
    assert!(spawned[0].rotation.is_finite());
    assert_eq!(spawned[0].position, Vec3::ONE);
}

#[test]
#[serial(agent_deaths)]
fn unconfigured_agent_dies_with_default_tint() {
    let effects = Rc::new(RecordingEffects::default());
    let agent = lone_agent(Rc::clone(&effects) as Rc<dyn EffectSpawner>);

    agent.take_hit(10.0, agent.position(), Vec3::X);

    assert_eq!(effects.spawned()[0].color, Rgba::WHITE);
}

#[test]
#[serial(agent_deaths)]
fn dead_agent_ignores_further_hits_and_ticks() {
    let heard = announcements();
    let effects = Rc::new(RecordingEffects::default());
    let player = Rc::new(DummyTarget::new(Vec3::new(2.0, 0.0, 0.0), 50.0));
    let mut agent = Agent::spawn(
        AgentConfig::default(),
        RecordingNavigation::at(Vec3::new(3.0, 0.0, 0.0)),
        AgentServices::new(
            Rc::new(NoDisplay),
            Rc::clone(&effects) as Rc<dyn EffectSpawner>,
        ),
        Some(Rc::clone(&player) as Rc<dyn Targetable>),
    )
    .expect("valid agent config");

    agent.take_hit(50.0, agent.position(), Vec3::X);
    agent.take_hit(50.0, agent.position(), Vec3::X);
    agent.apply_damage(50.0);
    for index in 0..20_u32 {
        agent.tick(Tick::new(f64::from(index) * 0.1, 0.1));
    }

    assert_eq!(heard.load(Ordering::SeqCst), 1);
    assert_eq!(effects.spawned().len(), 1);
    assert!(player.hits().is_empty());
    assert!(agent.navigation().calls().is_empty());
}

#[test]
#[serial(agent_deaths)]
fn dying_mid_lunge_settles_the_body() {
    let player = Rc::new(DummyTarget::new(Vec3::ZERO, 50.0));
    let origin = Vec3::new(1.0, 0.0, 0.0);
    let tint = Rgba::rgb(0.3, 0.3, 0.9);
    let mut agent = Agent::spawn(
        AgentConfig::default(),
        RecordingNavigation::at(origin),
        AgentServices::new(Rc::new(NoDisplay), Rc::new(RecordingEffects::default())),
        Some(Rc::clone(&player) as Rc<dyn Targetable>),
    )
    .expect("valid agent config");
    agent
        .configure(Difficulty::new(5.0, 1.0, 20.0, tint))
        .expect("valid difficulty");

    agent.tick(Tick::new(0.0, 0.125));
    assert!(agent.is_attacking());
    assert_eq!(agent.body_color(), Rgba::RED);

    agent.take_hit(20.0, agent.position(), Vec3::X);
    agent.tick(Tick::new(0.125, 0.125));

    assert!(!agent.is_attacking());
    assert_eq!(agent.position(), origin);
    assert_eq!(agent.body_color(), tint);
    assert_eq!(agent.navigation().toggles(), vec![false, true]);
    assert!(player.hits().is_empty(), "a dead agent does not strike");

    for index in 2..20_u32 {
        agent.tick(Tick::new(f64::from(index) * 0.125, 0.125));
    }
    assert_eq!(agent.navigation().toggles(), vec![false, true]);
}
