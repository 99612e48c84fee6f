//! Read-only snapshot of the simulation for renderers, VFX and UI.
//!
//! Building a snapshot never mutates simulation state.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{SimTime, Vector2};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub score: ScoreView,
    pub player: Option<EntityView>,
    pub enemies: Vec<EntityView>,
    pub onlookers: Vec<EntityView>,
    pub mines: Vec<MineView>,
    pub missiles: Vec<MissileView>,
    pub pickups: Vec<PickupView>,
    pub airstrikes: Vec<AirstrikeView>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub streak: u32,
    pub multiplier: u32,
    pub heat: u32,
    pub game_over: bool,
}

/// A car-backed entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub faction: Faction,
    pub position: Vector2,
    pub heading: f64,
    pub speed: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub alive: bool,
    pub hovering: bool,
    pub invulnerable: bool,
    pub weapons: Vec<WeaponView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    /// `None` = infinite.
    pub ammo: Option<u32>,
    pub ready: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineView {
    pub owner: u64,
    pub position: Vector2,
    pub armed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub owner: u64,
    pub kind: WeaponKind,
    pub position: Vector2,
    pub heading: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub kind: PickupKind,
    pub position: Vector2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirstrikeView {
    pub position: Vector2,
    pub radius: f64,
    /// Seconds until detonation.
    pub remaining: f64,
}
