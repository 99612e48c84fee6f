//! Per-tick systems run by `GameSimulation::update`.
//!
//! Systems are free functions over the hecs world. They do not own state:
//! entity state lives in components, collections live in the simulation.

pub mod airstrikes;
pub mod autofire;
pub mod cleanup;
pub mod enemy_ai;
pub mod onlookers;
pub mod pickups;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
pub mod status;
