//! Trigger logic shared by AI-controlled and auto-firing weapons.

use hecs::{Entity, World};

use arena_core::events::SimEvent;
use arena_core::types::Vector2;

use crate::combat::CombatCtx;
use crate::components::{Loadout, StatusEffects, Vitals};
use crate::weapons::{AirstrikeInstance, Weapon};

/// True when `shooter` is alive and its weapons are not EMP-disabled.
pub fn can_attack(world: &World, shooter: Entity, now: f64) -> bool {
    let alive = world
        .get::<&Vitals>(shooter)
        .map(|v| v.alive)
        .unwrap_or(false);
    let disabled = world
        .get::<&StatusEffects>(shooter)
        .map(|s| s.weapons_disabled(now))
        .unwrap_or(false);
    alive && !disabled
}

/// Fire every ready `auto_fire` weapon of `shooter` at whatever `pick`
/// selects for it. Returns how many weapons fired.
pub fn fire_auto_weapons(
    world: &World,
    shooter: Entity,
    now: f64,
    events: &mut Vec<SimEvent>,
    airstrikes: &mut Vec<AirstrikeInstance>,
    pick: impl Fn(&Weapon, Vector2) -> Option<Entity>,
) -> u32 {
    if !can_attack(world, shooter, now) {
        return 0;
    }
    let Ok(mut loadout) = world.get::<&mut Loadout>(shooter) else {
        return 0;
    };
    let mut ctx = CombatCtx::new(world, now, events);
    let Some(origin) = ctx.position(shooter) else {
        return 0;
    };

    let mut fired = 0;
    for weapon in loadout.weapons.iter_mut() {
        if !weapon.base.auto_fire || !weapon.can_fire(now) {
            continue;
        }
        let Some(target) = pick(weapon, origin) else {
            continue;
        };
        if weapon.fire(&mut ctx, Some(target), airstrikes) {
            fired += 1;
        }
    }
    fired
}

/// Fire one weapon slot of `shooter` manually.
pub fn fire_slot(
    world: &World,
    shooter: Entity,
    slot: usize,
    target: Option<Entity>,
    now: f64,
    events: &mut Vec<SimEvent>,
    airstrikes: &mut Vec<AirstrikeInstance>,
) -> bool {
    if !can_attack(world, shooter, now) {
        return false;
    }
    let Ok(mut loadout) = world.get::<&mut Loadout>(shooter) else {
        return false;
    };
    let Some(weapon) = loadout.weapons.get_mut(slot) else {
        return false;
    };
    let mut ctx = CombatCtx::new(world, now, events);
    weapon.fire(&mut ctx, target, airstrikes)
}
