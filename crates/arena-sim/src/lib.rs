//! Combat simulation engine for the arena.
//!
//! Owns the hecs ECS world, advances it in fixed ticks, and produces
//! `SimSnapshot`s and `SimEvent`s for renderers and UI.

pub mod car;
pub mod combat;
pub mod components;
pub mod engine;
pub mod pickups;
pub mod scoring;
pub mod systems;
pub mod weapons;
pub mod world_setup;

pub use arena_core as core;
pub use engine::GameSimulation;

#[cfg(test)]
mod tests;
