//! Delayed area strikes.
//!
//! The airstrike weapon never resolves damage itself: it hands an
//! `AirstrikeInstance` to an `AirstrikeSink`, and the simulation advances
//! the pending strikes each tick.

use hecs::Entity;

use arena_core::types::Vector2;

use crate::combat::{entity_id, CombatCtx};

/// Receives airstrikes scheduled by weapons.
pub trait AirstrikeSink {
    fn schedule_airstrike(&mut self, strike: AirstrikeInstance);
}

impl AirstrikeSink for Vec<AirstrikeInstance> {
    fn schedule_airstrike(&mut self, strike: AirstrikeInstance) {
        self.push(strike);
    }
}

/// A strike bound to the position its target had when it was called in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirstrikeInstance {
    pub owner: Entity,
    pub position: Vector2,
    pub elapsed: f64,
    pub delay: f64,
    pub radius: f64,
    pub damage: f64,
    pub exploded: bool,
}

impl AirstrikeInstance {
    pub fn new(owner: Entity, position: Vector2, delay: f64, radius: f64, damage: f64) -> Self {
        Self {
            owner,
            position,
            elapsed: 0.0,
            delay,
            radius,
            damage,
            exploded: false,
        }
    }

    pub fn remaining(&self) -> f64 {
        (self.delay - self.elapsed).max(0.0)
    }

    /// Advance the fuse. On the tick the delay elapses, damages every living
    /// non-owner entity in radius exactly once and returns the hit count.
    pub fn advance(&mut self, dt: f64, ctx: &mut CombatCtx<'_>) -> Option<u32> {
        if self.exploded {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed < self.delay {
            return None;
        }
        self.exploded = true;

        let radius_sq = self.radius * self.radius;
        let victims: Vec<Entity> = ctx
            .contacts()
            .into_iter()
            .filter(|c| c.entity != self.owner)
            .filter(|c| c.position.distance_squared(self.position) <= radius_sq)
            .map(|c| c.entity)
            .collect();
        let mut hits = 0;
        for victim in victims {
            if ctx.damage(victim, self.damage) {
                hits += 1;
            }
        }
        tracing::debug!(
            owner = entity_id(self.owner),
            hits,
            "airstrike detonated"
        );
        Some(hits)
    }
}
