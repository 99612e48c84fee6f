//! Friendly units, credits and research points for one defense.

use arena_core::constants::*;
use arena_core::enums::FriendlyKind;
use arena_core::types::Vector2;
use arena_sim::GameSimulation;

use crate::error::BuildError;
use crate::friendly::{stats, Friendly, FriendlyId};
use crate::tech_tree::{TechTree, REINFORCED_ROUNDS};

#[derive(Debug, Clone)]
pub struct Garrison {
    friendlies: Vec<Friendly>,
    next_id: FriendlyId,
    pub credits: u32,
    pub research_points: u32,
    /// Half-width of the square placement area.
    pub bound: f64,
    /// Research multiplier on friendly damage.
    pub damage_scale: f64,
}

impl Default for Garrison {
    fn default() -> Self {
        Self::new(STARTING_CREDITS)
    }
}

impl Garrison {
    pub fn new(credits: u32) -> Self {
        Self {
            friendlies: Vec::new(),
            next_id: 0,
            credits,
            research_points: 0,
            bound: PLACEMENT_BOUND,
            damage_scale: 1.0,
        }
    }

    pub fn friendlies(&self) -> &[Friendly] {
        &self.friendlies
    }

    pub fn friendlies_mut(&mut self) -> &mut [Friendly] {
        &mut self.friendlies
    }

    pub fn get(&self, id: FriendlyId) -> Option<&Friendly> {
        self.friendlies.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FriendlyId) -> Option<&mut Friendly> {
        self.friendlies.iter_mut().find(|f| f.id == id)
    }

    /// Validate a build request against research, credits and placement,
    /// then place the unit and deduct its cost.
    pub fn try_build(
        &mut self,
        kind: FriendlyKind,
        position: Vector2,
        tech: &TechTree,
    ) -> Result<FriendlyId, BuildError> {
        let s = stats(kind);
        if let Some(required) = s.required_tech {
            if !tech.is_unlocked(required) {
                return Err(BuildError::Locked {
                    kind,
                    tech: required,
                });
            }
        }
        if self.credits < s.cost {
            return Err(BuildError::InsufficientCredits {
                have: self.credits,
                need: s.cost,
            });
        }
        if !Friendly::is_placement_valid_for(position, s.radius, &self.friendlies, self.bound)
        {
            return Err(BuildError::InvalidPlacement {
                x: position.x,
                y: position.y,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.credits -= s.cost;
        self.friendlies.push(Friendly::new(id, kind, position));
        tracing::debug!(id, ?kind, credits = self.credits, "friendly built");
        Ok(id)
    }

    /// Remove a unit and refund half its cost.
    pub fn sell(&mut self, id: FriendlyId) -> Option<u32> {
        let index = self.friendlies.iter().position(|f| f.id == id)?;
        let friendly = self.friendlies.remove(index);
        let refund = friendly.cost / 2;
        self.credits += refund;
        Some(refund)
    }

    /// Pick up research effects that change garrison stats.
    pub fn apply_research(&mut self, tech: &TechTree) {
        self.damage_scale = if tech.is_unlocked(REINFORCED_ROUNDS) {
            REINFORCED_ROUNDS_SCALE
        } else {
            1.0
        };
    }

    /// Move and fire every unit against the simulation's enemies.
    /// Returns how many attacks landed.
    pub fn update(&mut self, dt: f64, sim: &mut GameSimulation) -> u32 {
        let damage_scale = self.damage_scale;
        let mut ctx = sim.combat_ctx();
        let mut landed = 0;
        for friendly in self.friendlies.iter_mut() {
            if friendly.update(dt, &mut ctx, damage_scale) {
                landed += 1;
            }
        }
        landed
    }
}
