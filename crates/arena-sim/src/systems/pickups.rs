//! Pickup collisions against the player.

use hecs::{Entity, World};

use arena_core::enums::PickupKind;
use arena_core::events::SimEvent;

use crate::car::Car;
use crate::components::{Loadout, StatusEffects, Vitals};
use crate::pickups::Pickup;
use crate::scoring::ScoreState;
use crate::weapons::Weapon;

/// Consume every pickup the living player touches, in list order.
pub fn run(
    world: &World,
    player: Entity,
    pickups: &mut Vec<Pickup>,
    score: &mut ScoreState,
    now: f64,
    events: &mut Vec<SimEvent>,
) {
    let alive = world
        .get::<&Vitals>(player)
        .map(|v| v.alive)
        .unwrap_or(false);
    let Ok(position) = world.get::<&Car>(player).map(|car| car.position) else {
        return;
    };
    if !alive {
        return;
    }

    pickups.retain(|pickup| {
        if !pickup.touches(position) {
            return true;
        }
        apply(world, player, pickup.kind, score, now);
        events.push(SimEvent::PickupCollected { kind: pickup.kind });
        tracing::debug!(kind = ?pickup.kind, "pickup collected");
        false
    });
}

/// Apply one pickup effect to `player`.
pub fn apply(world: &World, player: Entity, kind: PickupKind, score: &mut ScoreState, now: f64) {
    match kind {
        PickupKind::Health { amount } => {
            if let Ok(mut vitals) = world.get::<&mut Vitals>(player) {
                vitals.heal(amount);
            }
        }
        PickupKind::Ammo { amount } => {
            if let Ok(mut loadout) = world.get::<&mut Loadout>(player) {
                for weapon in loadout.weapons.iter_mut() {
                    weapon.base.add_ammo(amount);
                }
            }
        }
        PickupKind::Shield { duration } => {
            let (Ok(mut vitals), Ok(mut status)) = (
                world.get::<&mut Vitals>(player),
                world.get::<&mut StatusEffects>(player),
            ) else {
                return;
            };
            status.grant_invulnerability(&mut vitals, now + duration);
        }
        PickupKind::Score { points } => {
            score.add_points(points);
        }
        PickupKind::Weapon { kind } => {
            let Ok(mut loadout) = world.get::<&mut Loadout>(player) else {
                return;
            };
            let fresh = Weapon::from_kind(kind, player);
            match loadout.weapons.iter_mut().find(|w| w.kind() == kind) {
                Some(existing) => {
                    existing.base.ammo = match (existing.base.ammo, fresh.base.ammo) {
                        (Some(have), Some(full)) => Some(have.max(full)),
                        _ => None,
                    };
                }
                None => loadout.weapons.push(fresh),
            }
        }
    }
}
