//! Core types and definitions for the arena combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! vector math, enums, tuning constants, configuration, input snapshots,
//! simulation events and read-only state snapshots.
//! It has no dependency on the ECS or any runtime framework.

pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod state;
pub mod types;
