//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Undrained events kept between ticks; the oldest are dropped past this.
pub const MAX_PENDING_EVENTS: usize = 1024;

// --- World ---

/// Radius of the playable arena around the origin (world units).
pub const ARENA_RADIUS: f64 = 150.0;

/// Collision radius of every car hull.
pub const CAR_COLLISION_RADIUS: f64 = 2.0;

// --- Car kinematics ---

pub const CAR_MAX_SPEED: f64 = 40.0;
pub const CAR_ACCELERATION: f64 = 25.0;
pub const CAR_BRAKE_DECELERATION: f64 = 40.0;
pub const CAR_FRICTION: f64 = 6.0;
/// Radians per second, independent of speed.
pub const CAR_TURN_RATE: f64 = 2.8;

// --- Hit points ---

pub const PLAYER_MAX_HP: f64 = 100.0;
pub const RAIDER_MAX_HP: f64 = 40.0;
pub const BRUTE_MAX_HP: f64 = 90.0;
pub const BOMBER_MAX_HP: f64 = 60.0;
pub const ONLOOKER_MAX_HP: f64 = 20.0;

// --- Enemy hulls ---

pub const RAIDER_MAX_SPEED: f64 = 32.0;
pub const BRUTE_MAX_SPEED: f64 = 20.0;
pub const BOMBER_MAX_SPEED: f64 = 26.0;
/// Enemies stop accelerating once this close to the player.
pub const RAIDER_PREFERRED_RANGE: f64 = 12.0;
pub const BRUTE_PREFERRED_RANGE: f64 = 6.0;
pub const BOMBER_PREFERRED_RANGE: f64 = 35.0;
/// Heading error (radians) under which the AI stops steering.
pub const AI_STEER_DEADZONE: f64 = 0.05;

// --- Onlookers ---

pub const ONLOOKER_MAX_SPEED: f64 = 6.0;
pub const ONLOOKER_WANDER_RADIUS: f64 = 20.0;
/// Seconds before an onlooker picks a new wander point regardless of arrival.
pub const ONLOOKER_RETARGET_SECS: f64 = 5.0;
pub const ONLOOKER_ARRIVE_DISTANCE: f64 = 1.5;

// --- Weapons: machine gun ---

pub const MACHINE_GUN_COOLDOWN: f64 = 0.15;
pub const MACHINE_GUN_RANGE: f64 = 40.0;
pub const MACHINE_GUN_DAMAGE: f64 = 4.0;

// --- Weapons: shotgun ---

pub const SHOTGUN_COOLDOWN: f64 = 0.9;
pub const SHOTGUN_RANGE: f64 = 18.0;
/// Full cone width in radians; the hit test uses half of it.
pub const SHOTGUN_CONE: f64 = 0.8;
/// Cosmetic only, never a damage multiplier.
pub const SHOTGUN_PELLETS: u32 = 8;
pub const SHOTGUN_DAMAGE: f64 = 22.0;

// --- Weapons: mines ---

pub const MINE_COOLDOWN: f64 = 2.0;
pub const MINE_ARM_DELAY: f64 = 0.75;
pub const MINE_RADIUS: f64 = 4.0;
pub const MINE_DAMAGE: f64 = 45.0;
pub const MINE_AMMO: u32 = 6;
/// AI drops a mine when its target is this close.
pub const MINE_ENGAGE_RANGE: f64 = 10.0;

// --- Weapons: homing missile / rocket ---

pub const HOMING_COOLDOWN: f64 = 2.5;
pub const HOMING_SPEED: f64 = 45.0;
pub const HOMING_TURN_RATE: f64 = 3.0;
pub const HOMING_RADIUS: f64 = 2.5;
pub const HOMING_DAMAGE: f64 = 35.0;
pub const HOMING_AMMO: u32 = 8;
pub const ROCKET_COOLDOWN: f64 = 1.6;
pub const ROCKET_SPEED: f64 = 55.0;
pub const ROCKET_RADIUS: f64 = 3.0;
pub const ROCKET_DAMAGE: f64 = 30.0;
pub const ROCKET_AMMO: u32 = 12;
/// Projectiles that have not detonated after this many seconds are removed.
pub const PROJECTILE_MAX_LIFETIME: f64 = 8.0;
pub const MISSILE_ENGAGE_RANGE: f64 = 60.0;

// --- Weapons: EMP ---

pub const EMP_COOLDOWN: f64 = 8.0;
pub const EMP_RADIUS: f64 = 20.0;
pub const EMP_SLOW_FACTOR: f64 = 0.4;
pub const EMP_DURATION: f64 = 3.0;
pub const EMP_AMMO: u32 = 3;

// --- Weapons: airstrike ---

pub const AIRSTRIKE_COOLDOWN: f64 = 12.0;
pub const AIRSTRIKE_DELAY: f64 = 2.0;
pub const AIRSTRIKE_RADIUS: f64 = 10.0;
pub const AIRSTRIKE_DAMAGE: f64 = 60.0;
pub const AIRSTRIKE_AMMO: u32 = 2;
pub const AIRSTRIKE_ENGAGE_RANGE: f64 = 80.0;

// --- Scoring ---

pub const ENEMY_KILL_SCORE: u64 = 100;
pub const ONLOOKER_BONUS_SCORE: u64 = 10;
pub const ONLOOKER_PENALTY_SCORE: u64 = 20;
/// Kills per multiplier step.
pub const STREAK_PER_MULTIPLIER: u32 = 3;
/// Multiplier never exceeds `1 + MAX_MULTIPLIER_BONUS`.
pub const MAX_MULTIPLIER_BONUS: u32 = 4;

// --- Pickups ---

pub const PICKUP_RADIUS: f64 = 1.5;
pub const HEALTH_PICKUP_AMOUNT: f64 = 25.0;
pub const AMMO_PICKUP_AMOUNT: u32 = 4;
pub const SHIELD_PICKUP_DURATION: f64 = 5.0;
pub const SCORE_PICKUP_POINTS: u64 = 50;

// --- Spawning ---

pub const ENEMY_SPAWN_INTERVAL: f64 = 6.0;
pub const MIN_ENEMY_SPAWN_INTERVAL: f64 = 1.5;
pub const PICKUP_SPAWN_INTERVAL: f64 = 10.0;
pub const MAX_ENEMIES: usize = 12;
pub const MAX_PICKUPS: usize = 6;
pub const SPAWN_DISTANCE: f64 = 60.0;
pub const INITIAL_ONLOOKERS: usize = 6;
/// Spawn interval divisor gained per point of heat.
pub const HEAT_SPAWN_FACTOR: f64 = 0.25;
/// Enemy weapon damage scale gained per point of heat.
pub const HEAT_DAMAGE_FACTOR: f64 = 0.1;

// --- Build / defend ---

/// Half-width of the square build area around the origin.
pub const PLACEMENT_BOUND: f64 = 100.0;
/// Collision radius assumed for a placement query.
pub const PLACEMENT_RADIUS: f64 = 5.0;
pub const FORMATION_SPACING: f64 = 6.0;
pub const FRIENDLY_ARRIVE_DISTANCE: f64 = 0.5;
pub const STARTING_CREDITS: u32 = 300;
pub const WAVE_REPEAT_SCALE: f64 = 1.3;
pub const WAVE_CLEAR_CREDITS: u32 = 50;
pub const TD_KILL_BOUNTY: u32 = 15;
pub const TD_SPAWN_RADIUS: f64 = 90.0;
pub const EMP_TOWER_SLOW_FACTOR: f64 = 0.5;
pub const EMP_TOWER_SLOW_DURATION: f64 = 2.0;
/// Damage scale granted by the `reinforced_rounds` research.
pub const REINFORCED_ROUNDS_SCALE: f64 = 1.25;

// --- Replay ---

/// Default history window kept for the kill-cam (seconds).
pub const REPLAY_MAX_AGE: f64 = 5.0;
