//! Snapshot system: builds a `SimSnapshot` from the world.
//!
//! Read-only. Entities are visited through the simulation's ordered handle
//! lists so the output is stable for a given seed and input sequence.

use hecs::{Entity, World};

use arena_core::enums::Faction;
use arena_core::state::*;
use arena_core::types::SimTime;

use crate::car::Car;
use crate::combat::entity_id;
use crate::components::{Loadout, Vitals};
use crate::pickups::Pickup;
use crate::weapons::{AirstrikeInstance, WeaponSpec};

/// Borrowed view of everything a snapshot needs.
pub struct SnapshotInput<'a> {
    pub world: &'a World,
    pub time: SimTime,
    pub score: ScoreView,
    pub player: Entity,
    pub enemies: &'a [Entity],
    pub onlookers: &'a [Entity],
    pub pickups: &'a [Pickup],
    pub airstrikes: &'a [AirstrikeInstance],
}

pub fn build_snapshot(input: &SnapshotInput<'_>) -> SimSnapshot {
    let world = input.world;
    let now = input.time.elapsed_secs;
    let owners: Vec<Entity> = std::iter::once(input.player)
        .chain(input.enemies.iter().copied())
        .chain(input.onlookers.iter().copied())
        .collect();

    let (mines, missiles) = build_projectiles(world, &owners, now);

    SimSnapshot {
        time: input.time,
        score: input.score.clone(),
        player: build_entity(world, input.player, now),
        enemies: input
            .enemies
            .iter()
            .filter_map(|&e| build_entity(world, e, now))
            .collect(),
        onlookers: input
            .onlookers
            .iter()
            .filter_map(|&e| build_entity(world, e, now))
            .collect(),
        mines,
        missiles,
        pickups: input.pickups.iter().map(Pickup::view).collect(),
        airstrikes: input
            .airstrikes
            .iter()
            .map(|strike| AirstrikeView {
                position: strike.position,
                radius: strike.radius,
                remaining: strike.remaining(),
            })
            .collect(),
    }
}

/// Build the view of one car-backed entity.
pub fn build_entity(world: &World, entity: Entity, now: f64) -> Option<EntityView> {
    let car = world.get::<&Car>(entity).ok()?;
    let vitals = world.get::<&Vitals>(entity).ok()?;
    let faction = world.get::<&Faction>(entity).ok()?;
    let weapons: Vec<WeaponView> = world
        .get::<&Loadout>(entity)
        .map(|loadout| {
            loadout
                .weapons
                .iter()
                .map(|w| WeaponView {
                    kind: w.kind(),
                    ammo: w.base.ammo,
                    ready: w.can_fire(now),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(EntityView {
        id: entity_id(entity),
        faction: *faction,
        position: car.position,
        heading: car.heading,
        speed: car.speed(),
        hp: vitals.hp,
        max_hp: vitals.max_hp,
        alive: vitals.alive,
        hovering: vitals.hovering,
        invulnerable: vitals.invulnerable,
        weapons,
    })
}

fn build_projectiles(world: &World, owners: &[Entity], now: f64) -> (Vec<MineView>, Vec<MissileView>) {
    let mut mines = Vec::new();
    let mut missiles = Vec::new();
    for &owner in owners {
        let Ok(loadout) = world.get::<&Loadout>(owner) else {
            continue;
        };
        for weapon in &loadout.weapons {
            match &weapon.spec {
                WeaponSpec::Mine {
                    arm_delay,
                    mines: active,
                    ..
                } => mines.extend(active.iter().map(|m| MineView {
                    owner: entity_id(m.owner),
                    position: m.position,
                    armed: m.is_armed(now, *arm_delay),
                })),
                WeaponSpec::Homing {
                    missiles: active, ..
                } => missiles.extend(active.iter().map(|m| MissileView {
                    owner: entity_id(m.owner),
                    kind: weapon.kind(),
                    position: m.position,
                    heading: m.heading,
                })),
                _ => {}
            }
        }
    }
    (mines, missiles)
}
