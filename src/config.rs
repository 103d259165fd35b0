//! Agent tuning and difficulty assignment.
//!
//! [`AgentConfig`] carries the timings and ranges fixed for an agent's whole
//! life; it can be loaded from JSON where every field is optional. A
//! [`Difficulty`] is handed to the agent once, by whatever director spawns it,
//! and sets its combat stats and appearance.
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgba;
use crate::numeric::is_positive_finite;
use crate::{
    DEATH_EFFECT_LIFETIME, DEFAULT_ATTACK_COOLDOWN, DEFAULT_ATTACK_RANGE, DEFAULT_ATTACK_SPEED,
    DEFAULT_RETARGET_INTERVAL,
};

/// Reasons a configuration is refused.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A rate, range or stat that must be strictly positive.
    #[error("`{field}` must be finite and greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    /// A delay that may be zero but not negative.
    #[error("`{field}` must be finite and not negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    /// The JSON document could not be read.
    #[error("invalid agent configuration: {0}")]
    Parse(String),
    /// [`Agent::configure`](crate::Agent::configure) was called twice.
    #[error("agent difficulty was already assigned")]
    AlreadyConfigured,
}

/// Ranges and timings for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Distance under which the agent lunges.
    pub attack_range: f32,
    /// Seconds between attack launches.
    pub attack_cooldown: f64,
    /// Lunge progress per second.
    pub attack_speed: f32,
    /// Seconds between destination refreshes.
    pub retarget_interval: f64,
    /// Seconds the death effect lingers.
    pub death_effect_lifetime: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            attack_range: DEFAULT_ATTACK_RANGE,
            attack_cooldown: DEFAULT_ATTACK_COOLDOWN,
            attack_speed: DEFAULT_ATTACK_SPEED,
            retarget_interval: DEFAULT_RETARGET_INTERVAL,
            death_effect_lifetime: DEATH_EFFECT_LIFETIME,
        }
    }
}

impl AgentConfig {
    /// Parses and validates a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// the validation errors of [`AgentConfig::validate`].
    ///
    /// # Examples
    /// ```
    /// use stalker::AgentConfig;
    /// let config = AgentConfig::from_json_str(r#"{ "attack_range": 4.0 }"#).unwrap();
    /// assert_eq!(config.attack_range, 4.0);
    /// assert_eq!(config.attack_cooldown, AgentConfig::default().attack_cooldown);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()
    }

    /// Checks every field and hands the configuration back when it is sound.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotPositive`] for ranges, speeds and intervals
    /// that are zero, negative or not finite, and [`ConfigError::Negative`]
    /// for a negative cooldown or effect lifetime.
    pub fn validate(self) -> Result<Self, ConfigError> {
        positive("attack_range", f64::from(self.attack_range))?;
        positive("attack_speed", f64::from(self.attack_speed))?;
        positive("retarget_interval", self.retarget_interval)?;
        not_negative("attack_cooldown", self.attack_cooldown)?;
        not_negative("death_effect_lifetime", self.death_effect_lifetime)?;
        Ok(self)
    }
}

/// Combat stats and tint assigned once at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Navigation speed.
    pub speed: f32,
    /// Damage per strike.
    pub damage: f32,
    /// Maximum (and starting) health.
    pub health: f32,
    /// Body tint and death effect colour.
    pub color: Rgba,
}

impl Difficulty {
    /// Builds an unvalidated difficulty.
    #[must_use]
    pub const fn new(speed: f32, damage: f32, health: f32, color: Rgba) -> Self {
        Self {
            speed,
            damage,
            health,
            color,
        }
    }

    /// Checks that every stat is usable.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotPositive`] for a non-positive speed or
    /// health and [`ConfigError::Negative`] for negative damage.
    pub fn validate(self) -> Result<Self, ConfigError> {
        positive("speed", f64::from(self.speed))?;
        positive("health", f64::from(self.health))?;
        not_negative("damage", f64::from(self.damage))?;
        Ok(self)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if is_positive_finite(value) {
        Ok(())
    } else {
        warn!("rejecting {field} = {value}");
        Err(ConfigError::NotPositive { field, value })
    }
}

fn not_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        warn!("rejecting {field} = {value}");
        Err(ConfigError::Negative { field, value })
    }
}
