//! Weapons and their resolution algorithms.
//!
//! A `Weapon` is shared gating state (`WeaponBase`) plus a closed
//! `WeaponSpec` enum; `fire` matches on the spec so every weapon family is
//! handled exhaustively. Projectile-launching families own their in-flight
//! instances and advance them in `update_projectiles`.

pub mod airstrike;
pub mod projectiles;

use hecs::Entity;

use arena_core::constants::*;
use arena_core::enums::WeaponKind;
use arena_core::events::SimEvent;
use arena_core::types::{angle_off_heading, Vector2};

use crate::combat::{entity_id, nearest_within, CombatCtx};

pub use airstrike::{AirstrikeInstance, AirstrikeSink};
pub use projectiles::{FlightOutcome, FlightProfile, MineInstance, MissileInstance};

/// Gating state common to every weapon.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponBase {
    pub owner: Entity,
    pub kind: WeaponKind,
    pub cooldown: f64,
    /// `None` until the first successful fire.
    pub last_fire_time: Option<f64>,
    /// `None` = infinite.
    pub ammo: Option<u32>,
    pub auto_fire: bool,
    /// Multiplier applied to the base damage whenever damage is dealt.
    pub damage_scale: f64,
}

impl WeaponBase {
    fn new(owner: Entity, kind: WeaponKind, cooldown: f64, ammo: Option<u32>) -> Self {
        Self {
            owner,
            kind,
            cooldown,
            last_fire_time: None,
            ammo,
            auto_fire: false,
            damage_scale: 1.0,
        }
    }

    /// True when ammo remains and the cooldown has elapsed since the last shot.
    pub fn can_fire(&self, now: f64) -> bool {
        self.ammo != Some(0)
            && self
                .last_fire_time
                .map_or(true, |last| now - last >= self.cooldown)
    }

    fn consume(&mut self, now: f64) {
        self.last_fire_time = Some(now);
        if let Some(ammo) = self.ammo.as_mut() {
            *ammo = ammo.saturating_sub(1);
        }
    }

    /// Add rounds to a finite magazine. Infinite weapons are unaffected.
    pub fn add_ammo(&mut self, amount: u32) {
        if let Some(ammo) = self.ammo.as_mut() {
            *ammo = ammo.saturating_add(amount);
        }
    }

    pub fn scaled(&self, damage: f64) -> f64 {
        damage * self.damage_scale
    }
}

/// Kind-specific parameters and owned projectiles.
#[derive(Debug, Clone, PartialEq)]
pub enum WeaponSpec {
    Hitscan {
        range: f64,
        damage: f64,
    },
    Cone {
        range: f64,
        /// Full cone width in radians.
        cone: f64,
        pellets: u32,
        damage: f64,
    },
    Mine {
        arm_delay: f64,
        radius: f64,
        damage: f64,
        mines: Vec<MineInstance>,
    },
    Homing {
        profile: FlightProfile,
        damage: f64,
        missiles: Vec<MissileInstance>,
    },
    Emp {
        radius: f64,
        slow_factor: f64,
        duration: f64,
    },
    Airstrike {
        delay: f64,
        radius: f64,
        damage: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    pub base: WeaponBase,
    pub spec: WeaponSpec,
}

impl Weapon {
    pub fn machine_gun(owner: Entity, cooldown: f64, range: f64, damage: f64) -> Self {
        Self {
            base: WeaponBase::new(owner, WeaponKind::MachineGun, cooldown, None),
            spec: WeaponSpec::Hitscan { range, damage },
        }
    }

    pub fn shotgun(owner: Entity, cooldown: f64, range: f64, cone: f64, damage: f64) -> Self {
        Self {
            base: WeaponBase::new(owner, WeaponKind::Shotgun, cooldown, None),
            spec: WeaponSpec::Cone {
                range,
                cone,
                pellets: SHOTGUN_PELLETS,
                damage,
            },
        }
    }

    pub fn mine_layer(
        owner: Entity,
        cooldown: f64,
        arm_delay: f64,
        radius: f64,
        damage: f64,
    ) -> Self {
        Self {
            base: WeaponBase::new(owner, WeaponKind::Mine, cooldown, Some(MINE_AMMO)),
            spec: WeaponSpec::Mine {
                arm_delay,
                radius,
                damage,
                mines: Vec::new(),
            },
        }
    }

    pub fn homing_missile(owner: Entity, cooldown: f64, profile: FlightProfile, damage: f64) -> Self {
        Self {
            base: WeaponBase::new(owner, WeaponKind::HomingMissile, cooldown, Some(HOMING_AMMO)),
            spec: WeaponSpec::Homing {
                profile,
                damage,
                missiles: Vec::new(),
            },
        }
    }

    /// A missile that never steers.
    pub fn rocket(owner: Entity, cooldown: f64, speed: f64, radius: f64, damage: f64) -> Self {
        let profile = FlightProfile {
            speed,
            turn_rate: 0.0,
            radius,
            max_lifetime: PROJECTILE_MAX_LIFETIME,
        };
        Self {
            base: WeaponBase::new(owner, WeaponKind::Rocket, cooldown, Some(ROCKET_AMMO)),
            spec: WeaponSpec::Homing {
                profile,
                damage,
                missiles: Vec::new(),
            },
        }
    }

    pub fn emp(owner: Entity, cooldown: f64, radius: f64, slow_factor: f64, duration: f64) -> Self {
        Self {
            base: WeaponBase::new(owner, WeaponKind::Emp, cooldown, Some(EMP_AMMO)),
            spec: WeaponSpec::Emp {
                radius,
                slow_factor,
                duration,
            },
        }
    }

    pub fn airstrike(owner: Entity, cooldown: f64, delay: f64, radius: f64, damage: f64) -> Self {
        Self {
            base: WeaponBase::new(owner, WeaponKind::Airstrike, cooldown, Some(AIRSTRIKE_AMMO)),
            spec: WeaponSpec::Airstrike {
                delay,
                radius,
                damage,
            },
        }
    }

    /// Default-tuned weapon of the given kind.
    pub fn from_kind(kind: WeaponKind, owner: Entity) -> Self {
        match kind {
            WeaponKind::MachineGun => Self::machine_gun(
                owner,
                MACHINE_GUN_COOLDOWN,
                MACHINE_GUN_RANGE,
                MACHINE_GUN_DAMAGE,
            ),
            WeaponKind::Shotgun => Self::shotgun(
                owner,
                SHOTGUN_COOLDOWN,
                SHOTGUN_RANGE,
                SHOTGUN_CONE,
                SHOTGUN_DAMAGE,
            ),
            WeaponKind::Mine => {
                Self::mine_layer(owner, MINE_COOLDOWN, MINE_ARM_DELAY, MINE_RADIUS, MINE_DAMAGE)
            }
            WeaponKind::HomingMissile => Self::homing_missile(
                owner,
                HOMING_COOLDOWN,
                FlightProfile {
                    speed: HOMING_SPEED,
                    turn_rate: HOMING_TURN_RATE,
                    radius: HOMING_RADIUS,
                    max_lifetime: PROJECTILE_MAX_LIFETIME,
                },
                HOMING_DAMAGE,
            ),
            WeaponKind::Rocket => Self::rocket(
                owner,
                ROCKET_COOLDOWN,
                ROCKET_SPEED,
                ROCKET_RADIUS,
                ROCKET_DAMAGE,
            ),
            WeaponKind::Emp => {
                Self::emp(owner, EMP_COOLDOWN, EMP_RADIUS, EMP_SLOW_FACTOR, EMP_DURATION)
            }
            WeaponKind::Airstrike => Self::airstrike(
                owner,
                AIRSTRIKE_COOLDOWN,
                AIRSTRIKE_DELAY,
                AIRSTRIKE_RADIUS,
                AIRSTRIKE_DAMAGE,
            ),
        }
    }

    pub fn with_auto_fire(mut self, auto_fire: bool) -> Self {
        self.base.auto_fire = auto_fire;
        self
    }

    pub fn with_ammo(mut self, ammo: Option<u32>) -> Self {
        self.base.ammo = ammo;
        self
    }

    pub fn kind(&self) -> WeaponKind {
        self.base.kind
    }

    pub fn can_fire(&self, now: f64) -> bool {
        self.base.can_fire(now)
    }

    /// Distance at which an AI owner should bother pulling the trigger.
    pub fn engage_range(&self) -> f64 {
        match &self.spec {
            WeaponSpec::Hitscan { range, .. } | WeaponSpec::Cone { range, .. } => *range,
            WeaponSpec::Mine { .. } => MINE_ENGAGE_RANGE,
            WeaponSpec::Homing { .. } => MISSILE_ENGAGE_RANGE,
            WeaponSpec::Emp { radius, .. } => *radius,
            WeaponSpec::Airstrike { .. } => AIRSTRIKE_ENGAGE_RANGE,
        }
    }

    pub fn mines(&self) -> &[MineInstance] {
        match &self.spec {
            WeaponSpec::Mine { mines, .. } => mines,
            _ => &[],
        }
    }

    pub fn missiles(&self) -> &[MissileInstance] {
        match &self.spec {
            WeaponSpec::Homing { missiles, .. } => missiles,
            _ => &[],
        }
    }

    /// Fire at `target`. A no-op returning false while `can_fire` is false
    /// or the owner no longer exists. Once fired, cooldown and ammo are spent
    /// even if the shot resolves as a miss.
    pub fn fire(
        &mut self,
        ctx: &mut CombatCtx<'_>,
        target: Option<Entity>,
        sink: &mut dyn AirstrikeSink,
    ) -> bool {
        if !self.base.can_fire(ctx.now) {
            return false;
        }
        let Some((origin, heading)) = ctx.pose(self.base.owner) else {
            return false;
        };
        self.base.consume(ctx.now);
        ctx.events.push(SimEvent::WeaponFired {
            owner: entity_id(self.base.owner),
            kind: self.base.kind,
        });

        let owner = self.base.owner;
        let target_pos = target.and_then(|t| ctx.position(t).map(|p| (t, p)));

        match &mut self.spec {
            WeaponSpec::Hitscan { range, damage } => {
                if let Some((t, p)) = target_pos {
                    if origin.distance_squared(p) <= *range * *range {
                        let amount = self.base.scaled(*damage);
                        ctx.damage(t, amount);
                    }
                }
            }
            WeaponSpec::Cone {
                range,
                cone,
                damage,
                ..
            } => {
                if let Some((t, p)) = target_pos {
                    let in_range = origin.distance_squared(p) <= *range * *range;
                    if in_range && angle_off_heading(heading, origin, p) <= *cone / 2.0 {
                        let amount = self.base.scaled(*damage);
                        ctx.damage(t, amount);
                    }
                }
            }
            WeaponSpec::Mine { mines, .. } => {
                mines.push(MineInstance {
                    owner,
                    position: origin,
                    placed_at: ctx.now,
                    exploded: false,
                });
            }
            WeaponSpec::Homing {
                profile, missiles, ..
            } => {
                missiles.push(MissileInstance::launch(
                    owner, origin, heading, target_pos, profile,
                ));
            }
            WeaponSpec::Emp {
                radius,
                slow_factor,
                duration,
            } => {
                let radius_sq = *radius * *radius;
                let affected: Vec<Entity> = ctx
                    .contacts()
                    .into_iter()
                    .filter(|c| c.entity != owner)
                    .filter(|c| c.position.distance_squared(origin) <= radius_sq)
                    .map(|c| c.entity)
                    .collect();
                let mut count = 0;
                for entity in affected {
                    if ctx.disrupt(entity, *slow_factor, *duration) {
                        count += 1;
                    }
                }
                ctx.events.push(SimEvent::EmpPulse {
                    owner: entity_id(owner),
                    affected: count,
                });
            }
            WeaponSpec::Airstrike {
                delay,
                radius,
                damage,
            } => {
                if let Some((_, p)) = target_pos {
                    let amount = self.base.scaled(*damage);
                    sink.schedule_airstrike(AirstrikeInstance::new(
                        owner, p, *delay, *radius, amount,
                    ));
                }
            }
        }
        true
    }

    /// Trigger a radial EMP. Returns false for non-EMP weapons or while
    /// `can_fire` is false.
    pub fn pulse(&mut self, ctx: &mut CombatCtx<'_>) -> bool {
        if !matches!(self.spec, WeaponSpec::Emp { .. }) {
            return false;
        }
        let mut unused: Vec<AirstrikeInstance> = Vec::new();
        self.fire(ctx, None, &mut unused)
    }

    /// Advance owned mines and missiles, applying detonations.
    pub fn update_projectiles(&mut self, ctx: &mut CombatCtx<'_>, dt: f64) {
        let damage_scale = self.base.damage_scale;
        let kind = self.base.kind;
        match &mut self.spec {
            WeaponSpec::Mine {
                arm_delay,
                radius,
                damage,
                mines,
            } => {
                let contacts = ctx.contacts();
                for mine in mines.iter_mut() {
                    if mine.exploded || !mine.is_armed(ctx.now, *arm_delay) {
                        continue;
                    }
                    let candidates = contacts
                        .iter()
                        .filter(|c| c.entity != mine.owner && !c.hovering);
                    let Some(victim) = nearest_within(candidates, mine.position, *radius) else {
                        continue;
                    };
                    let victim = victim.entity;
                    mine.exploded = true;
                    ctx.damage(victim, *damage * damage_scale);
                    ctx.events.push(SimEvent::MineDetonated {
                        position: mine.position,
                        victim: entity_id(victim),
                    });
                    tracing::debug!(victim = entity_id(victim), "mine detonated");
                }
                mines.retain(|m| !m.exploded);
            }
            WeaponSpec::Homing {
                profile,
                damage,
                missiles,
            } => {
                for missile in missiles.iter_mut() {
                    if missile.done {
                        continue;
                    }
                    let live_target = missile.target.and_then(|t| ctx.living_position(t));
                    match missile.step(dt, live_target, profile) {
                        FlightOutcome::Detonated => {
                            if let Some(t) = missile.target {
                                ctx.damage(t, *damage * damage_scale);
                            }
                            ctx.events.push(SimEvent::MissileDetonated {
                                position: missile.position,
                                kind,
                            });
                            tracing::debug!(?kind, "missile detonated");
                        }
                        FlightOutcome::Expired | FlightOutcome::InFlight => {}
                    }
                }
                missiles.retain(|m| !m.done);
            }
            WeaponSpec::Hitscan { .. }
            | WeaponSpec::Cone { .. }
            | WeaponSpec::Emp { .. }
            | WeaponSpec::Airstrike { .. } => {}
        }
    }
}

/// Whether `target` is close enough for an AI owner to pull the trigger.
pub fn in_engage_range(weapon: &Weapon, shooter: Vector2, target: Vector2) -> bool {
    let range = weapon.engage_range();
    shooter.distance_squared(target) <= range * range
}
