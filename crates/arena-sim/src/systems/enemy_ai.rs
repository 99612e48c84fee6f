//! Enemy AI: seek the player and fire auto weapons in engage range.

use hecs::{Entity, World};

use arena_core::constants::AI_STEER_DEADZONE;
use arena_core::events::SimEvent;
use arena_core::input::DriveInput;
use arena_core::types::{heading_of, wrap_angle, Vector2};

use crate::car::Car;
use crate::combat::living_position;
use crate::components::{EnemyBrain, Vitals};
use crate::systems::autofire;
use crate::weapons::{in_engage_range, AirstrikeInstance};

/// Steering input that turns `car` toward `target` and accelerates until it
/// is within `stop_within`.
pub fn steer_toward(car: &Car, target: Vector2, stop_within: f64) -> DriveInput {
    let offset = target - car.position;
    let distance = offset.length();
    if distance <= f64::EPSILON {
        return DriveInput::IDLE;
    }
    let diff = wrap_angle(heading_of(offset) - car.heading);
    DriveInput {
        accelerate: distance > stop_within,
        brake: false,
        left: diff > AI_STEER_DEADZONE,
        right: diff < -AI_STEER_DEADZONE,
    }
}

/// Per-tick enemy toggles, read from the simulation every tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct AiToggles {
    pub freeze_movement: bool,
    pub disable_attacks: bool,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    enemies: &[Entity],
    player: Entity,
    dt: f64,
    now: f64,
    toggles: AiToggles,
    events: &mut Vec<SimEvent>,
    airstrikes: &mut Vec<AirstrikeInstance>,
) {
    let player_pos = living_position(world, player);

    if !toggles.freeze_movement {
        for &enemy in enemies {
            let Ok((car, brain, vitals)) =
                world.query_one_mut::<(&mut Car, &EnemyBrain, &Vitals)>(enemy)
            else {
                continue;
            };
            if !vitals.alive {
                continue;
            }
            let input = match player_pos {
                Some(target) => steer_toward(car, target, brain.preferred_range),
                None => DriveInput::IDLE,
            };
            car.update(dt, input);
        }
    }

    if toggles.disable_attacks {
        return;
    }
    let Some(player_pos) = player_pos else {
        return;
    };
    for &enemy in enemies {
        autofire::fire_auto_weapons(world, enemy, now, events, airstrikes, |weapon, origin| {
            in_engage_range(weapon, origin, player_pos).then_some(player)
        });
    }
}
