//! Target cycling and lock-on.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use arena_core::enums::{Faction, LockState};
use arena_core::types::{angle_off_heading, Vector2};
use arena_sim::combat::{entity_id, living_contacts, living_position};

/// Lock-on envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LockParams {
    pub range: f64,
    /// Full cone width in radians; the target must be within half of it.
    pub cone: f64,
    /// Seconds of continuous in-envelope time to reach a full lock.
    pub lock_time: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TargetingSystem {
    target: Option<Entity>,
    accumulated: f64,
    progress: f64,
}

impl TargetingSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Living entities hostile to `shooter` within `range`, nearest first
    /// (ties by entity id).
    pub fn candidates(world: &World, shooter: Entity, range: f64) -> Vec<Entity> {
        let Ok(faction) = world.get::<&Faction>(shooter).map(|f| *f) else {
            return Vec::new();
        };
        let Some(origin) = living_position(world, shooter) else {
            return Vec::new();
        };
        let range_sq = range * range;
        let mut in_range: Vec<(f64, Entity)> = living_contacts(world)
            .into_iter()
            .filter(|c| c.entity != shooter && c.faction.is_hostile_to(faction))
            .map(|c| (c.position.distance_squared(origin), c.entity))
            .filter(|(d, _)| *d <= range_sq)
            .collect();
        in_range.sort_by(|(da, a), (db, b)| {
            da.total_cmp(db).then(entity_id(*a).cmp(&entity_id(*b)))
        });
        in_range.into_iter().map(|(_, e)| e).collect()
    }

    /// Advance round-robin through `candidates`. A current target missing
    /// from the list is dropped first, so selection restarts at the front.
    /// Lock progress always resets.
    pub fn cycle_targets(&mut self, candidates: &[Entity]) -> Option<Entity> {
        self.accumulated = 0.0;
        self.progress = 0.0;
        let current = self
            .target
            .and_then(|t| candidates.iter().position(|&c| c == t));
        let next = match current {
            Some(i) => (i + 1) % candidates.len(),
            None => 0,
        };
        self.target = candidates.get(next).copied();
        self.target
    }

    /// Accumulate lock time while the target is alive and inside the
    /// envelope. Leaving the envelope resets progress but keeps the target;
    /// a dead target clears the selection. Returns progress in `[0, 1]`.
    pub fn update_lock(
        &mut self,
        dt: f64,
        world: &World,
        shooter_pos: Vector2,
        shooter_heading: f64,
        params: &LockParams,
    ) -> f64 {
        let Some(target) = self.target else {
            return 0.0;
        };
        let Some(target_pos) = living_position(world, target) else {
            self.clear();
            return 0.0;
        };

        let in_range = shooter_pos.distance_squared(target_pos) <= params.range * params.range;
        let off_axis = angle_off_heading(shooter_heading, shooter_pos, target_pos);
        let in_cone = off_axis <= params.cone / 2.0;
        if in_range && in_cone {
            self.accumulated += dt;
            self.progress = if params.lock_time > 0.0 {
                (self.accumulated / params.lock_time).min(1.0)
            } else {
                1.0
            };
        } else {
            self.accumulated = 0.0;
            self.progress = 0.0;
        }
        self.progress
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.accumulated = 0.0;
        self.progress = 0.0;
    }

    pub fn get_target(&self) -> Option<Entity> {
        self.target
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_locked(&self) -> bool {
        self.state() == LockState::Locked
    }

    pub fn state(&self) -> LockState {
        match self.target {
            None => LockState::NoTarget,
            Some(_) if self.progress >= 1.0 => LockState::Locked,
            Some(_) => LockState::Acquired,
        }
    }
}
