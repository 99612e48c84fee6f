//! Shared world access for weapon resolution.
//!
//! Weapons live inside a `Loadout` component while they resolve, so every
//! lookup here goes through hecs' per-component dynamic borrows on a shared
//! `&World`. Queries are collected before any component is mutated.

use hecs::{Entity, World};

use arena_core::enums::Faction;
use arena_core::events::SimEvent;
use arena_core::types::Vector2;

use crate::car::Car;
use crate::components::{StatusEffects, Vitals};

/// Stable `u64` id used in events and snapshots.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// A living, car-backed entity as seen by targeting code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub entity: Entity,
    pub faction: Faction,
    pub position: Vector2,
    pub hovering: bool,
}

/// All living contacts in spawn order.
pub fn living_contacts(world: &World) -> Vec<Contact> {
    world
        .query::<(&Car, &Vitals, &Faction)>()
        .iter()
        .filter(|(_, (_, vitals, _))| vitals.alive)
        .map(|(entity, (car, vitals, faction))| Contact {
            entity,
            faction: *faction,
            position: car.position,
            hovering: vitals.hovering,
        })
        .collect()
}

/// Position of `entity` while it is alive.
pub fn living_position(world: &World, entity: Entity) -> Option<Vector2> {
    let alive = world
        .get::<&Vitals>(entity)
        .map(|v| v.alive)
        .unwrap_or(false);
    if !alive {
        return None;
    }
    world.get::<&Car>(entity).ok().map(|car| car.position)
}

/// Nearest contact within `radius` of `center`, ties broken by entity id.
pub fn nearest_within<'a>(
    contacts: impl IntoIterator<Item = &'a Contact>,
    center: Vector2,
    radius: f64,
) -> Option<&'a Contact> {
    let radius_sq = radius * radius;
    contacts
        .into_iter()
        .map(|c| (c.position.distance_squared(center), c))
        .filter(|(d, _)| *d <= radius_sq)
        .min_by(|(da, a), (db, b)| {
            da.total_cmp(db)
                .then(entity_id(a.entity).cmp(&entity_id(b.entity)))
        })
        .map(|(_, c)| c)
}

/// Per-call combat context: the world, the current time and the event sink.
pub struct CombatCtx<'a> {
    pub world: &'a World,
    pub now: f64,
    pub events: &'a mut Vec<SimEvent>,
}

impl<'a> CombatCtx<'a> {
    pub fn new(world: &'a World, now: f64, events: &'a mut Vec<SimEvent>) -> Self {
        Self { world, now, events }
    }

    /// Position and heading of any car-backed entity.
    pub fn pose(&self, entity: Entity) -> Option<(Vector2, f64)> {
        self.world
            .get::<&Car>(entity)
            .ok()
            .map(|car| (car.position, car.heading))
    }

    pub fn position(&self, entity: Entity) -> Option<Vector2> {
        self.pose(entity).map(|(position, _)| position)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world
            .get::<&Vitals>(entity)
            .map(|v| v.alive)
            .unwrap_or(false)
    }

    /// Position of a target only while it is alive.
    pub fn living_position(&self, entity: Entity) -> Option<Vector2> {
        living_position(self.world, entity)
    }

    pub fn contacts(&self) -> Vec<Contact> {
        living_contacts(self.world)
    }

    /// Apply damage through `Vitals::take_damage`. Dead, invulnerable or
    /// missing targets are a silent no-op.
    pub fn damage(&mut self, target: Entity, amount: f64) -> bool {
        let Ok(mut vitals) = self.world.get::<&mut Vitals>(target) else {
            return false;
        };
        if !vitals.take_damage(amount) {
            return false;
        }
        self.events.push(SimEvent::Damaged {
            target: entity_id(target),
            amount,
            remaining_hp: vitals.hp,
        });
        true
    }

    /// Stack an EMP-style slow and weapon disable on `target`.
    pub fn disrupt(&mut self, target: Entity, slow_factor: f64, duration: f64) -> bool {
        let Ok(mut status) = self.world.get::<&mut StatusEffects>(target) else {
            return false;
        };
        let until = self.now + duration;
        status.apply_slow(slow_factor, until);
        status.disable_weapons(until);
        true
    }

    /// Slow only, used by EMP towers that leave weapons online.
    pub fn slow(&mut self, target: Entity, slow_factor: f64, duration: f64) -> bool {
        let Ok(mut status) = self.world.get::<&mut StatusEffects>(target) else {
            return false;
        };
        status.apply_slow(slow_factor, self.now + duration);
        true
    }
}
