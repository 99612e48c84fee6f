//! Build-and-defend economy layer.
//!
//! Buildable friendly units and towers, the credit/research economy, unit
//! selection and move orders, a research DAG, and two spawn policies that
//! drive a `GameSimulation`: the scripted build/combat `WaveScheduler` and
//! the endless `TowerDefense` loop.

pub mod command;
pub mod error;
pub mod friendly;
pub mod garrison;
pub mod tech_tree;
pub mod tower_defense;
pub mod wave_scheduler;

pub use error::{BuildError, TechError};
pub use friendly::{Friendly, FriendlyId};
pub use garrison::Garrison;
pub use tech_tree::TechTree;
