//! Events emitted by the simulation for audio, VFX and UI feedback.
//!
//! Entities are referred to by their stable `u64` handle bits.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Vector2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    WeaponFired {
        owner: u64,
        kind: WeaponKind,
    },
    Damaged {
        target: u64,
        amount: f64,
        remaining_hp: f64,
    },
    MineDetonated {
        position: Vector2,
        victim: u64,
    },
    MissileDetonated {
        position: Vector2,
        kind: WeaponKind,
    },
    EmpPulse {
        owner: u64,
        affected: u32,
    },
    AirstrikeDetonated {
        position: Vector2,
        hits: u32,
    },
    PickupCollected {
        kind: PickupKind,
    },
    EnemyKilled {
        entity: u64,
        score_awarded: u64,
    },
    OnlookerKilled {
        entity: u64,
        rule: OnlookerKillRule,
    },
    EnemySpawned {
        entity: u64,
        kind: EnemyKind,
    },
    PlayerDied,
}
