//! Periodic enemy and pickup spawn timers.

use std::f64::consts::TAU;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::constants::*;
use arena_core::enums::{EnemyKind, PickupKind};
use arena_core::types::{heading_vector, Vector2};

use crate::pickups::{pickup_for_roll, WEAPON_DROPS};

/// Countdown state for the periodic spawners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTimers {
    pub enemy_elapsed: f64,
    pub pickup_elapsed: f64,
}

/// Enemy spawn period shortened by heat, floored at the minimum interval.
pub fn enemy_spawn_interval(base: f64, heat: u32) -> f64 {
    (base / (1.0 + HEAT_SPAWN_FACTOR * f64::from(heat))).max(MIN_ENEMY_SPAWN_INTERVAL)
}

/// Damage multiplier for enemies spawned at the given heat.
pub fn enemy_damage_scale(heat: u32) -> f64 {
    1.0 + HEAT_DAMAGE_FACTOR * f64::from(heat)
}

impl SpawnTimers {
    /// Accumulate `dt`; true once per elapsed interval.
    pub fn enemy_due(&mut self, dt: f64, interval: f64) -> bool {
        self.enemy_elapsed += dt;
        if self.enemy_elapsed >= interval {
            self.enemy_elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn pickup_due(&mut self, dt: f64, interval: f64) -> bool {
        self.pickup_elapsed += dt;
        if self.pickup_elapsed >= interval {
            self.pickup_elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

pub fn roll_enemy_kind(rng: &mut ChaCha8Rng) -> EnemyKind {
    match rng.gen_range(0..3) {
        0 => EnemyKind::Raider,
        1 => EnemyKind::Brute,
        _ => EnemyKind::Bomber,
    }
}

pub fn roll_pickup(rng: &mut ChaCha8Rng) -> PickupKind {
    let roll = rng.gen_range(0..5);
    let weapon_roll = rng.gen_range(0..WEAPON_DROPS.len());
    pickup_for_roll(roll, weapon_roll)
}

/// Random point on a ring around `center`, clamped into the arena.
pub fn ring_point(rng: &mut ChaCha8Rng, center: Vector2, radius: f64, arena_radius: f64) -> Vector2 {
    let angle = rng.gen_range(0.0..TAU);
    (center + heading_vector(angle) * radius).clamp_length_max(arena_radius)
}
