//! Runtime configuration for a simulation run.
//!
//! Every field has a default taken from `constants`, so a JSON config only
//! needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::OnlookerKillRule;

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("spawn_distance {spawn_distance} exceeds arena_radius {arena_radius}")]
    SpawnOutsideArena {
        spawn_distance: f64,
        arena_radius: f64,
    },
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub arena_radius: f64,
    pub onlooker_kill_rule: OnlookerKillRule,
    /// Periodic enemy spawns. Wave-driven modes turn this off.
    pub auto_spawn_enemies: bool,
    pub auto_spawn_pickups: bool,
    pub enemy_spawn_interval: f64,
    pub pickup_spawn_interval: f64,
    pub max_enemies: usize,
    pub max_pickups: usize,
    /// Distance from the player at which periodic enemies appear.
    pub spawn_distance: f64,
    pub initial_onlookers: usize,
    pub freeze_enemies_movement: bool,
    pub disable_enemy_attacks: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena_radius: ARENA_RADIUS,
            onlooker_kill_rule: OnlookerKillRule::default(),
            auto_spawn_enemies: true,
            auto_spawn_pickups: true,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL,
            pickup_spawn_interval: PICKUP_SPAWN_INTERVAL,
            max_enemies: MAX_ENEMIES,
            max_pickups: MAX_PICKUPS,
            spawn_distance: SPAWN_DISTANCE,
            initial_onlookers: INITIAL_ONLOOKERS,
            freeze_enemies_movement: false,
            disable_enemy_attacks: false,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_radius", self.arena_radius),
            ("enemy_spawn_interval", self.enemy_spawn_interval),
            ("pickup_spawn_interval", self.pickup_spawn_interval),
            ("spawn_distance", self.spawn_distance),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.spawn_distance > self.arena_radius {
            return Err(ConfigError::SpawnOutsideArena {
                spawn_distance: self.spawn_distance,
                arena_radius: self.arena_radius,
            });
        }
        Ok(())
    }
}
