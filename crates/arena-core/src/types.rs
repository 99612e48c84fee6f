//! Fundamental geometric and simulation types.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// 2D vector in arena space (world units). x = East, y = North.
///
/// Headings are radians measured counter-clockwise from +x, so a heading
/// of 0 faces East and `heading_vector(h)` is `(cos h, sin h)`.
pub type Vector2 = glam::DVec2;

/// Unit forward vector for a heading in radians.
pub fn heading_vector(heading: f64) -> Vector2 {
    Vector2::from_angle(heading)
}

/// Heading (radians) of a direction vector. Zero vectors map to 0.
pub fn heading_of(direction: Vector2) -> f64 {
    if direction == Vector2::ZERO {
        return 0.0;
    }
    direction.y.atan2(direction.x)
}

/// Wrap an angle into `[-PI, PI)`.
pub fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Unsigned angle between a heading and the direction `from -> to`.
///
/// Computed as `acos(dot)` with the dot product clamped to `[-1, 1]`.
/// Returns 0 when `from == to`.
pub fn angle_off_heading(heading: f64, from: Vector2, to: Vector2) -> f64 {
    let dir = (to - from).normalize_or_zero();
    if dir == Vector2::ZERO {
        return 0.0;
    }
    heading_vector(heading).dot(dir).clamp(-1.0, 1.0).acos()
}

/// Turn `current` toward `desired` by at most `max_step` radians along the
/// shortest arc. The result is not wrapped.
pub fn turn_toward(current: f64, desired: f64, max_step: f64) -> f64 {
    let delta = wrap_angle(desired - current);
    current + delta.clamp(-max_step, max_step)
}

/// True when segment `p1-p2` properly crosses segment `q1-q2`.
///
/// Touching endpoints and collinear overlap do not count.
pub fn segments_intersect(p1: Vector2, p2: Vector2, q1: Vector2, q2: Vector2) -> bool {
    let d1 = (q2 - q1).perp_dot(p1 - q1);
    let d2 = (q2 - q1).perp_dot(p2 - q1);
    let d3 = (p2 - p1).perp_dot(q1 - p1);
    let d4 = (p2 - p1).perp_dot(q2 - p1);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
