//! In-flight projectile state owned by the firing weapon.

use hecs::Entity;

use arena_core::types::{heading_of, heading_vector, turn_toward, wrap_angle, Vector2};

/// A dropped proximity mine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MineInstance {
    pub owner: Entity,
    pub position: Vector2,
    pub placed_at: f64,
    pub exploded: bool,
}

impl MineInstance {
    pub fn is_armed(&self, now: f64, arm_delay: f64) -> bool {
        now - self.placed_at >= arm_delay
    }
}

/// Flight parameters shared by every missile a weapon launches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightProfile {
    pub speed: f64,
    /// Radians per second. Zero flies straight (rocket).
    pub turn_rate: f64,
    pub radius: f64,
    pub max_lifetime: f64,
}

/// Outcome of one missile step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    InFlight,
    /// Within blast radius of the aim point.
    Detonated,
    /// Lifetime ran out without reaching the aim point.
    Expired,
}

/// A homing missile or rocket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissileInstance {
    pub owner: Entity,
    pub target: Option<Entity>,
    pub position: Vector2,
    /// Radians, wrapped to `[-PI, PI)`.
    pub heading: f64,
    /// Last known target position; kept after the target dies.
    pub aim_point: Vector2,
    pub age: f64,
    pub done: bool,
}

impl MissileInstance {
    pub fn launch(
        owner: Entity,
        origin: Vector2,
        owner_heading: f64,
        target: Option<(Entity, Vector2)>,
        profile: &FlightProfile,
    ) -> Self {
        let (target, aim_point, heading) = match target {
            Some((entity, position)) if position != origin => {
                (Some(entity), position, heading_of(position - origin))
            }
            Some((entity, position)) => (Some(entity), position, owner_heading),
            None => {
                let reach = profile.speed * profile.max_lifetime * 2.0;
                (None, origin + heading_vector(owner_heading) * reach, owner_heading)
            }
        };
        Self {
            owner,
            target,
            position: origin,
            heading: wrap_angle(heading),
            aim_point,
            age: 0.0,
            done: false,
        }
    }

    /// Steer toward `aim_point` (if given a fresh target position), move,
    /// and report whether the missile detonated or expired.
    pub fn step(
        &mut self,
        dt: f64,
        live_target: Option<Vector2>,
        profile: &FlightProfile,
    ) -> FlightOutcome {
        if let Some(p) = live_target {
            self.aim_point = p;
        }
        if profile.turn_rate > 0.0 {
            let desired = heading_of(self.aim_point - self.position);
            self.heading = wrap_angle(turn_toward(
                self.heading,
                desired,
                profile.turn_rate * dt,
            ));
        }
        self.position += heading_vector(self.heading) * (profile.speed * dt);
        self.age += dt;

        if self.position.distance_squared(self.aim_point) <= profile.radius * profile.radius {
            self.done = true;
            FlightOutcome::Detonated
        } else if self.age >= profile.max_lifetime {
            self.done = true;
            FlightOutcome::Expired
        } else {
            FlightOutcome::InFlight
        }
    }
}
