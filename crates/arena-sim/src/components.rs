//! ECS components for hecs entities.
//!
//! Every combatant is a bundle of `Car`, `Vitals`, `StatusEffects`,
//! `Loadout` and `Faction`. Enemies add `EnemyBrain`, onlookers add `Wander`.

use serde::{Deserialize, Serialize};

use arena_core::enums::EnemyKind;
use arena_core::types::Vector2;

use crate::weapons::Weapon;

/// Hit points and damage-relevant flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub hp: f64,
    pub max_hp: f64,
    /// Cleared once hp reaches zero and never set again.
    pub alive: bool,
    pub invulnerable: bool,
    /// Hovering entities do not trigger mines.
    pub hovering: bool,
}

impl Vitals {
    pub fn new(max_hp: f64) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            alive: true,
            invulnerable: false,
            hovering: false,
        }
    }

    /// Apply damage, clamping hp at zero. Returns false (and changes
    /// nothing) when the entity is invulnerable or already dead.
    pub fn take_damage(&mut self, amount: f64) -> bool {
        if self.invulnerable || !self.alive || amount <= 0.0 {
            return false;
        }
        self.hp = (self.hp - amount).max(0.0);
        if self.hp <= 0.0 {
            self.alive = false;
        }
        true
    }

    /// Heal up to `max_hp`. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if !self.alive || amount <= 0.0 {
            return 0.0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }
}

/// Expiring status effects. Times are absolute simulation seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    /// Multiplier on max speed; 1.0 = unaffected.
    pub move_scale: f64,
    pub move_scale_until: f64,
    pub weapons_disabled_until: f64,
    /// `None` means the invulnerable flag (if set) is not timed.
    pub invulnerable_until: Option<f64>,
    pub hover_until: Option<f64>,
}

impl Default for StatusEffects {
    fn default() -> Self {
        Self {
            move_scale: 1.0,
            move_scale_until: 0.0,
            weapons_disabled_until: 0.0,
            invulnerable_until: None,
            hover_until: None,
        }
    }
}

impl StatusEffects {
    /// Stack a slow by keeping the most restrictive factor and the latest expiry.
    pub fn apply_slow(&mut self, factor: f64, until: f64) {
        self.move_scale = self.move_scale.min(factor);
        self.move_scale_until = self.move_scale_until.max(until);
    }

    pub fn disable_weapons(&mut self, until: f64) {
        self.weapons_disabled_until = self.weapons_disabled_until.max(until);
    }

    pub fn weapons_disabled(&self, now: f64) -> bool {
        now < self.weapons_disabled_until
    }

    pub fn grant_invulnerability(&mut self, vitals: &mut Vitals, until: f64) {
        vitals.invulnerable = true;
        self.invulnerable_until = Some(self.invulnerable_until.map_or(until, |u| u.max(until)));
    }

    pub fn grant_hover(&mut self, vitals: &mut Vitals, until: f64) {
        vitals.hovering = true;
        self.hover_until = Some(self.hover_until.map_or(until, |u| u.max(until)));
    }

    /// Drop every effect whose expiry has passed.
    pub fn expire(&mut self, vitals: &mut Vitals, now: f64) {
        if self.move_scale < 1.0 && now >= self.move_scale_until {
            self.move_scale = 1.0;
        }
        if let Some(until) = self.invulnerable_until {
            if now >= until {
                vitals.invulnerable = false;
                self.invulnerable_until = None;
            }
        }
        if let Some(until) = self.hover_until {
            if now >= until {
                vitals.hovering = false;
                self.hover_until = None;
            }
        }
    }
}

/// Ordered weapon inventory.
#[derive(Debug, Clone, Default)]
pub struct Loadout {
    pub weapons: Vec<Weapon>,
}

/// Enemy behavior parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub kind: EnemyKind,
    /// Stop accelerating once the player is this close.
    pub preferred_range: f64,
}

/// Onlooker wander state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wander {
    pub home: Vector2,
    pub destination: Vector2,
    /// Seconds until a new destination is picked regardless of arrival.
    pub retarget_in: f64,
}
