//! World-space pickups consumed by the player.

use serde::{Deserialize, Serialize};

use arena_core::constants::*;
use arena_core::enums::{PickupKind, WeaponKind};
use arena_core::state::PickupView;
use arena_core::types::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub position: Vector2,
}

impl Pickup {
    pub fn new(kind: PickupKind, position: Vector2) -> Self {
        Self { kind, position }
    }

    /// Whether a car at `position` is close enough to collect this pickup.
    pub fn touches(&self, position: Vector2) -> bool {
        let reach = PICKUP_RADIUS + CAR_COLLISION_RADIUS;
        self.position.distance_squared(position) <= reach * reach
    }

    pub fn view(&self) -> PickupView {
        PickupView {
            kind: self.kind,
            position: self.position,
        }
    }
}

/// Weapons that can drop as loot.
pub const WEAPON_DROPS: [WeaponKind; 5] = [
    WeaponKind::Shotgun,
    WeaponKind::Rocket,
    WeaponKind::HomingMissile,
    WeaponKind::Emp,
    WeaponKind::Airstrike,
];

/// Pickup for a loot roll in `0..5`, used by the spawner.
pub fn pickup_for_roll(roll: u32, weapon_roll: usize) -> PickupKind {
    match roll {
        0 => PickupKind::Health {
            amount: HEALTH_PICKUP_AMOUNT,
        },
        1 => PickupKind::Ammo {
            amount: AMMO_PICKUP_AMOUNT,
        },
        2 => PickupKind::Shield {
            duration: SHIELD_PICKUP_DURATION,
        },
        3 => PickupKind::Score {
            points: SCORE_PICKUP_POINTS,
        },
        _ => PickupKind::Weapon {
            kind: WEAPON_DROPS[weapon_roll % WEAPON_DROPS.len()],
        },
    }
}
