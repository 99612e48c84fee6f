//! Entity spawn factories.
//!
//! Entities are spawned with an empty `Loadout` first so each weapon can be
//! built knowing its owner handle.

use hecs::{Entity, World};

use arena_core::constants::*;
use arena_core::enums::{EnemyKind, Faction, WeaponKind};
use arena_core::types::Vector2;

use crate::car::{Car, CarTuning};
use crate::components::*;
use crate::weapons::Weapon;

/// Hull stats for an enemy archetype: (max hp, max speed, preferred range).
pub fn enemy_hull(kind: EnemyKind) -> (f64, f64, f64) {
    match kind {
        EnemyKind::Raider => (RAIDER_MAX_HP, RAIDER_MAX_SPEED, RAIDER_PREFERRED_RANGE),
        EnemyKind::Brute => (BRUTE_MAX_HP, BRUTE_MAX_SPEED, BRUTE_PREFERRED_RANGE),
        EnemyKind::Bomber => (BOMBER_MAX_HP, BOMBER_MAX_SPEED, BOMBER_PREFERRED_RANGE),
    }
}

pub fn enemy_weapon(kind: EnemyKind) -> WeaponKind {
    match kind {
        EnemyKind::Raider => WeaponKind::MachineGun,
        EnemyKind::Brute => WeaponKind::Shotgun,
        EnemyKind::Bomber => WeaponKind::Rocket,
    }
}

/// Spawn the player car. The machine gun auto-fires; the mine layer and
/// homing launcher are triggered explicitly.
pub fn spawn_player(world: &mut World, position: Vector2, heading: f64) -> Entity {
    let entity = world.spawn((
        Car::new(position, heading),
        Vitals::new(PLAYER_MAX_HP),
        StatusEffects::default(),
        Loadout::default(),
        Faction::Player,
    ));
    equip(
        world,
        entity,
        vec![
            Weapon::from_kind(WeaponKind::MachineGun, entity).with_auto_fire(true),
            Weapon::from_kind(WeaponKind::Mine, entity),
            Weapon::from_kind(WeaponKind::HomingMissile, entity),
        ],
    );
    entity
}

/// Spawn an enemy whose weapons deal `damage_scale` times their base damage.
pub fn spawn_enemy(
    world: &mut World,
    kind: EnemyKind,
    position: Vector2,
    heading: f64,
    damage_scale: f64,
) -> Entity {
    let (max_hp, max_speed, preferred_range) = enemy_hull(kind);
    let entity = world.spawn((
        Car::with_tuning(position, heading, CarTuning::with_max_speed(max_speed)),
        Vitals::new(max_hp),
        StatusEffects::default(),
        Loadout::default(),
        Faction::Enemy,
        EnemyBrain {
            kind,
            preferred_range,
        },
    ));
    let mut weapon = Weapon::from_kind(enemy_weapon(kind), entity)
        .with_auto_fire(true)
        .with_ammo(None);
    weapon.base.damage_scale = damage_scale;
    equip(world, entity, vec![weapon]);
    entity
}

/// Spawn an unarmed bystander that wanders around `position`.
pub fn spawn_onlooker(world: &mut World, position: Vector2, heading: f64) -> Entity {
    world.spawn((
        Car::with_tuning(
            position,
            heading,
            CarTuning::with_max_speed(ONLOOKER_MAX_SPEED),
        ),
        Vitals::new(ONLOOKER_MAX_HP),
        StatusEffects::default(),
        Loadout::default(),
        Faction::Onlooker,
        Wander {
            home: position,
            destination: position,
            retarget_in: 0.0,
        },
    ))
}

fn equip(world: &mut World, entity: Entity, weapons: Vec<Weapon>) {
    if let Ok(mut loadout) = world.get::<&mut Loadout>(entity) {
        loadout.weapons = weapons;
    }
}
