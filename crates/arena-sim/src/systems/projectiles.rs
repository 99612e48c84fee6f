//! Advance weapon-owned mines and missiles.

use hecs::{Entity, World};

use arena_core::events::SimEvent;

use crate::combat::CombatCtx;
use crate::components::Loadout;

/// Advance projectiles for each owner in the given order.
pub fn run(
    world: &World,
    owners: impl IntoIterator<Item = Entity>,
    dt: f64,
    now: f64,
    events: &mut Vec<SimEvent>,
) {
    for owner in owners {
        let Ok(mut loadout) = world.get::<&mut Loadout>(owner) else {
            continue;
        };
        let mut ctx = CombatCtx::new(world, now, events);
        for weapon in loadout.weapons.iter_mut() {
            weapon.update_projectiles(&mut ctx, dt);
        }
    }
}
