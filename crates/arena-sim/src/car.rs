//! Arcade vehicle kinematics.
//!
//! Heading changes at a fixed rate regardless of speed, thrust and brake act
//! along the forward vector, friction bleeds speed without ever reversing the
//! direction of travel, and speed is clamped after integration.

use serde::{Deserialize, Serialize};

use arena_core::constants::*;
use arena_core::input::DriveInput;
use arena_core::types::{heading_vector, Vector2};

/// Tunable handling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarTuning {
    pub max_speed: f64,
    pub acceleration_rate: f64,
    pub brake_deceleration: f64,
    pub friction: f64,
    /// Radians per second.
    pub turn_rate: f64,
}

impl Default for CarTuning {
    fn default() -> Self {
        Self {
            max_speed: CAR_MAX_SPEED,
            acceleration_rate: CAR_ACCELERATION,
            brake_deceleration: CAR_BRAKE_DECELERATION,
            friction: CAR_FRICTION,
            turn_rate: CAR_TURN_RATE,
        }
    }
}

impl CarTuning {
    pub fn with_max_speed(max_speed: f64) -> Self {
        Self {
            max_speed,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Radians, counter-clockwise from +x. Not wrapped.
    pub heading: f64,
    pub tuning: CarTuning,
    /// Multiplier on `tuning.max_speed`, clamped to `[0, 1]` on read.
    /// Status effects write this; the base tuning is never touched.
    pub speed_scale: f64,
}

impl Car {
    pub fn new(position: Vector2, heading: f64) -> Self {
        Self::with_tuning(position, heading, CarTuning::default())
    }

    pub fn with_tuning(position: Vector2, heading: f64, tuning: CarTuning) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            heading,
            tuning,
            speed_scale: 1.0,
        }
    }

    pub fn forward(&self) -> Vector2 {
        heading_vector(self.heading)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn effective_max_speed(&self) -> f64 {
        self.tuning.max_speed * self.speed_scale.clamp(0.0, 1.0)
    }

    /// Advance by `dt` seconds. `dt` must be non-negative and finite.
    pub fn update(&mut self, dt: f64, input: DriveInput) {
        if input.left {
            self.heading += self.tuning.turn_rate * dt;
        }
        if input.right {
            self.heading -= self.tuning.turn_rate * dt;
        }

        let forward = self.forward();
        if input.accelerate {
            self.velocity += forward * (self.tuning.acceleration_rate * dt);
        }
        if input.brake {
            self.velocity -= forward * (self.tuning.brake_deceleration * dt);
        }

        let speed = self.velocity.length();
        if speed > 0.0 {
            let drop = (self.tuning.friction * dt).min(speed);
            self.velocity -= self.velocity * (drop / speed);
        }

        self.velocity = self.velocity.clamp_length_max(self.effective_max_speed());
        self.position += self.velocity * dt;
    }
}
