//! Onlooker wander behavior.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::constants::*;
use arena_core::input::DriveInput;
use arena_core::types::{heading_vector, Vector2};

use crate::car::Car;
use crate::components::{Vitals, Wander};
use crate::systems::enemy_ai::steer_toward;

/// Uniform random point inside a disk.
pub fn random_point_in_disk(rng: &mut ChaCha8Rng, center: Vector2, radius: f64) -> Vector2 {
    let angle = rng.gen_range(0.0..TAU);
    let r = radius * rng.gen::<f64>().sqrt();
    center + heading_vector(angle) * r
}

pub fn run(
    world: &mut World,
    onlookers: &[Entity],
    rng: &mut ChaCha8Rng,
    arena_radius: f64,
    dt: f64,
) {
    for &onlooker in onlookers {
        let Ok((car, wander, vitals)) =
            world.query_one_mut::<(&mut Car, &mut Wander, &Vitals)>(onlooker)
        else {
            continue;
        };
        if !vitals.alive {
            continue;
        }

        wander.retarget_in -= dt;
        let arrived = car.position.distance(wander.destination) <= ONLOOKER_ARRIVE_DISTANCE;
        if arrived || wander.retarget_in <= 0.0 {
            wander.destination =
                random_point_in_disk(rng, wander.home, ONLOOKER_WANDER_RADIUS)
                    .clamp_length_max(arena_radius);
            wander.retarget_in = ONLOOKER_RETARGET_SECS;
        }

        let input = if car.position.distance(wander.destination) <= ONLOOKER_ARRIVE_DISTANCE {
            DriveInput::IDLE
        } else {
            steer_toward(car, wander.destination, ONLOOKER_ARRIVE_DISTANCE)
        };
        car.update(dt, input);
        car.position = car.position.clamp_length_max(arena_radius);
    }
}
