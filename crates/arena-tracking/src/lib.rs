//! Consumers of entity positions that run alongside the simulation:
//! target lock-on, lap/checkpoint racing and a short replay history.

pub mod race;
pub mod replay;
pub mod targeting;

pub use race::{RaceEvent, RaceTracker};
pub use replay::{ReplayBuffer, ReplayFrame};
pub use targeting::{LockParams, TargetingSystem};

#[cfg(test)]
mod tests;
