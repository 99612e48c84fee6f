//! Buildable friendly units and towers.

use serde::{Deserialize, Serialize};

use arena_core::constants::*;
use arena_core::enums::{Faction, FriendlyKind};
use arena_core::types::Vector2;
use arena_sim::combat::{nearest_within, CombatCtx};

pub type FriendlyId = u32;

/// Per-kind stats table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FriendlyStats {
    pub cost: u32,
    pub radius: f64,
    pub range: f64,
    pub cooldown: f64,
    pub damage: f64,
    /// Zero for static towers.
    pub speed: f64,
    pub required_tech: Option<&'static str>,
}

pub fn stats(kind: FriendlyKind) -> FriendlyStats {
    match kind {
        FriendlyKind::Turret => FriendlyStats {
            cost: 100,
            radius: 2.0,
            range: 30.0,
            cooldown: 0.5,
            damage: 8.0,
            speed: 0.0,
            required_tech: None,
        },
        FriendlyKind::Cannon => FriendlyStats {
            cost: 200,
            radius: 3.0,
            range: 45.0,
            cooldown: 2.0,
            damage: 40.0,
            speed: 0.0,
            required_tech: Some("heavy_ordnance"),
        },
        FriendlyKind::EmpTower => FriendlyStats {
            cost: 150,
            radius: 2.0,
            range: 25.0,
            cooldown: 3.0,
            damage: 0.0,
            speed: 0.0,
            required_tech: Some("emp_research"),
        },
        FriendlyKind::Tank => FriendlyStats {
            cost: 250,
            radius: 2.5,
            range: 25.0,
            cooldown: 1.0,
            damage: 15.0,
            speed: 10.0,
            required_tech: Some("armor"),
        },
        FriendlyKind::Harvester => FriendlyStats {
            cost: 80,
            radius: 2.0,
            range: 0.0,
            cooldown: 0.0,
            damage: 0.0,
            speed: 8.0,
            required_tech: None,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friendly {
    pub id: FriendlyId,
    pub kind: FriendlyKind,
    pub position: Vector2,
    pub cost: u32,
    pub radius: f64,
    pub range: f64,
    pub cooldown: f64,
    pub damage: f64,
    pub speed: f64,
    /// Move order for mobile kinds. Cleared on arrival.
    pub target_position: Option<Vector2>,
    pub last_attack: Option<f64>,
}

impl Friendly {
    pub fn new(id: FriendlyId, kind: FriendlyKind, position: Vector2) -> Self {
        let s = stats(kind);
        Self {
            id,
            kind,
            position,
            cost: s.cost,
            radius: s.radius,
            range: s.range,
            cooldown: s.cooldown,
            damage: s.damage,
            speed: s.speed,
            target_position: None,
            last_attack: None,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.speed > 0.0
    }

    pub fn can_attack(&self) -> bool {
        self.kind != FriendlyKind::Harvester
    }

    /// A placement is valid inside the square `bound` and clear of every
    /// existing unit by the sum of radii (compared squared). The new unit is
    /// assumed to be `PLACEMENT_RADIUS` wide.
    pub fn is_placement_valid(position: Vector2, existing: &[Friendly], bound: f64) -> bool {
        Self::is_placement_valid_for(position, PLACEMENT_RADIUS, existing, bound)
    }

    /// Placement check for a unit of known `radius`.
    pub(crate) fn is_placement_valid_for(
        position: Vector2,
        radius: f64,
        existing: &[Friendly],
        bound: f64,
    ) -> bool {
        if position.x.abs() > bound || position.y.abs() > bound {
            return false;
        }
        existing.iter().all(|other| {
            let min_gap = radius + other.radius;
            position.distance_squared(other.position) >= min_gap * min_gap
        })
    }

    /// Move toward the assigned target, then attack the nearest living enemy
    /// in range if the cooldown allows. Returns true if an attack landed.
    pub fn update(&mut self, dt: f64, ctx: &mut CombatCtx<'_>, damage_scale: f64) -> bool {
        self.advance_move(dt);
        if !self.can_attack() {
            return false;
        }
        if let Some(last) = self.last_attack {
            if ctx.now - last < self.cooldown {
                return false;
            }
        }

        let enemies: Vec<_> = ctx
            .contacts()
            .into_iter()
            .filter(|c| c.faction == Faction::Enemy)
            .collect();
        let Some(target) = nearest_within(&enemies, self.position, self.range).map(|c| c.entity)
        else {
            return false;
        };
        self.last_attack = Some(ctx.now);
        match self.kind {
            FriendlyKind::EmpTower => {
                ctx.slow(target, EMP_TOWER_SLOW_FACTOR, EMP_TOWER_SLOW_DURATION)
            }
            _ => ctx.damage(target, self.damage * damage_scale),
        }
    }

    fn advance_move(&mut self, dt: f64) {
        if !self.is_mobile() {
            return;
        }
        let Some(target) = self.target_position else {
            return;
        };
        let offset = target - self.position;
        let distance = offset.length();
        let step = self.speed * dt;
        if distance <= FRIENDLY_ARRIVE_DISTANCE || step >= distance {
            self.position = target;
            self.target_position = None;
        } else {
            self.position += offset * (step / distance);
        }
    }
}
