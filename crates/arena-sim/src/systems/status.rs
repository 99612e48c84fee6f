//! Status effect expiry.

use hecs::World;

use crate::car::Car;
use crate::components::{StatusEffects, Vitals};

/// Expire elapsed effects and push the current move scale into each car.
pub fn run(world: &mut World, now: f64) {
    for (_entity, (car, vitals, status)) in
        world.query_mut::<(&mut Car, &mut Vitals, &mut StatusEffects)>()
    {
        status.expire(vitals, now);
        car.speed_scale = status.move_scale;
    }
}
