//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side an entity fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
    /// Non-hostile bystander. Killing one raises heat.
    Onlooker,
}

impl Faction {
    /// Whether an entity of this faction may be targeted by `attacker`.
    pub fn is_hostile_to(self, attacker: Faction) -> bool {
        match attacker {
            Faction::Player => self != Faction::Player,
            Faction::Enemy => self == Faction::Player,
            Faction::Onlooker => false,
        }
    }
}

/// Weapon family. Each kind resolves damage with a different algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Instant hit within range.
    MachineGun,
    /// Instant hit within range and a forward cone.
    Shotgun,
    /// Dropped proximity mine.
    Mine,
    /// Steering projectile.
    HomingMissile,
    /// Non-steering projectile.
    Rocket,
    /// Radial slow + weapon disable pulse.
    Emp,
    /// Delayed area strike at the target's position.
    Airstrike,
}

/// Enemy archetype, selects hull and loadout at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast, light, machine gun.
    Raider,
    /// Slow, heavy, shotgun.
    Brute,
    /// Keeps distance, fires rockets.
    Bomber,
}

/// Pickup effect variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PickupKind {
    Health { amount: f64 },
    Ammo { amount: u32 },
    Shield { duration: f64 },
    Score { points: u64 },
    Weapon { kind: WeaponKind },
}

/// Scoring rule applied when an onlooker dies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnlookerKillRule {
    /// +10 score, +1 heat. Never floors score.
    #[default]
    ArcadeBonus,
    /// -20 score floored at 0, +1 heat.
    Penalty,
}

/// Phase of the scripted wave loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    #[default]
    Build,
    Combat,
}

/// Buildable friendly unit kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FriendlyKind {
    /// Static rapid-fire gun.
    Turret,
    /// Static slow heavy gun.
    Cannon,
    /// Static tower that slows enemies instead of damaging them.
    EmpTower,
    /// Mobile armed unit.
    Tank,
    /// Mobile unit with no weapon.
    Harvester,
}

/// Target lock state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
    #[default]
    NoTarget,
    /// Target selected, lock progress below 1.
    Acquired,
    Locked,
}
