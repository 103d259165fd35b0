//! Default tuning values shared by agents and the demo encounter.
//!
//! Agents read these through [`crate::config::AgentConfig::default`] so a
//! JSON configuration only has to mention the values it changes.

/// Squared-distance test radius inside which an agent lunges.
pub const DEFAULT_ATTACK_RANGE: f32 = 2.5;
/// Seconds between two attack launches.
pub const DEFAULT_ATTACK_COOLDOWN: f64 = 1.0;
/// Lunge progress gained per second; a full lunge lasts `1 / speed` seconds.
pub const DEFAULT_ATTACK_SPEED: f32 = 3.0;
/// Seconds between two navigation destination updates.
pub const DEFAULT_RETARGET_INTERVAL: f64 = 0.25;
/// Damage dealt per strike before a difficulty is assigned.
pub const DEFAULT_ATTACK_DAMAGE: f32 = 1.0;
/// Health of an agent before a difficulty is assigned.
pub const DEFAULT_MAX_HEALTH: f32 = 10.0;
/// Movement speed handed to navigation before a difficulty is assigned.
pub const DEFAULT_MOVE_SPEED: f32 = 3.5;
/// Vertical coordinate of the ground plane. The world is Y-up.
pub const GROUND_LEVEL: f32 = 0.0;
/// Lunge progress at which the strike lands.
pub const STRIKE_PROGRESS: f32 = 0.5;
/// Seconds a death effect stays alive before it is cleaned up.
pub const DEATH_EFFECT_LIFETIME: f64 = 2.0;
