//! Simulation engine: the fixed-step tick orchestrator.
//!
//! `GameSimulation` owns the hecs world, the ordered entity handle lists,
//! pickups, pending airstrikes, scoring and spawn timers. All randomness
//! comes from one seeded `ChaCha8Rng`, so two simulations built from the
//! same config and fed the same inputs stay identical.

use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use arena_core::config::SimConfig;
use arena_core::constants::MAX_PENDING_EVENTS;
use arena_core::enums::EnemyKind;
use arena_core::events::SimEvent;
use arena_core::input::DriveInput;
use arena_core::state::SimSnapshot;
use arena_core::types::{heading_of, SimTime, Vector2};

use crate::car::Car;
use crate::combat::{entity_id, living_contacts, nearest_within, CombatCtx};
use crate::components::{StatusEffects, Vitals};
use crate::pickups::Pickup;
use crate::scoring::ScoreState;
use crate::systems;
use crate::systems::enemy_ai::AiToggles;
use crate::systems::snapshot::SnapshotInput;
use crate::systems::spawner::{self, SpawnTimers};
use crate::weapons::AirstrikeInstance;
use crate::world_setup;

/// The simulation. Owns the ECS world and all sim state.
pub struct GameSimulation {
    world: World,
    config: SimConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    player: Entity,
    enemies: Vec<Entity>,
    onlookers: Vec<Entity>,
    pickups: Vec<Pickup>,
    airstrikes: Vec<AirstrikeInstance>,
    score: ScoreState,
    game_over: bool,
    timers: SpawnTimers,
    player_input: DriveInput,
    freeze_enemies_movement: bool,
    disable_enemy_attacks: bool,
    events: Vec<SimEvent>,
    despawn_buffer: Vec<Entity>,
}

impl GameSimulation {
    /// Create a simulation seeded from `config.seed`.
    pub fn new(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// Create a simulation that draws all randomness from `rng`.
    pub fn with_rng(config: SimConfig, mut rng: ChaCha8Rng) -> Self {
        let mut world = World::new();
        let player = world_setup::spawn_player(&mut world, Vector2::ZERO, 0.0);

        let mut onlookers = Vec::with_capacity(config.initial_onlookers);
        for _ in 0..config.initial_onlookers {
            let position = systems::onlookers::random_point_in_disk(
                &mut rng,
                Vector2::ZERO,
                config.arena_radius,
            );
            let heading = rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI);
            onlookers.push(world_setup::spawn_onlooker(&mut world, position, heading));
        }

        tracing::debug!(
            seed = config.seed,
            onlookers = onlookers.len(),
            "simulation created"
        );

        Self {
            world,
            freeze_enemies_movement: config.freeze_enemies_movement,
            disable_enemy_attacks: config.disable_enemy_attacks,
            config,
            time: SimTime::default(),
            rng,
            player,
            enemies: Vec::new(),
            onlookers,
            pickups: Vec::new(),
            airstrikes: Vec::new(),
            score: ScoreState::default(),
            game_over: false,
            timers: SpawnTimers::default(),
            player_input: DriveInput::IDLE,
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Advance the simulation by one fixed step.
    pub fn update(&mut self, dt: f64) {
        // 1. Time
        self.time.advance(dt);
        let now = self.time.elapsed_secs;

        // 2. Status expiry, then the player drives with the latched input
        systems::status::run(&mut self.world, now);
        self.drive_player(dt);

        // 3. Enemy AI + player autofire
        systems::enemy_ai::run(
            &mut self.world,
            &self.enemies,
            self.player,
            dt,
            now,
            AiToggles {
                freeze_movement: self.freeze_enemies_movement,
                disable_attacks: self.disable_enemy_attacks,
            },
            &mut self.events,
            &mut self.airstrikes,
        );
        self.player_autofire(now);

        // 4. Onlookers
        systems::onlookers::run(
            &mut self.world,
            &self.onlookers,
            &mut self.rng,
            self.config.arena_radius,
            dt,
        );

        // 5. Projectiles: player, then enemies, then onlookers
        let owners = std::iter::once(self.player)
            .chain(self.enemies.iter().copied())
            .chain(self.onlookers.iter().copied());
        systems::projectiles::run(&self.world, owners, dt, now, &mut self.events);

        // 6. Airstrikes
        systems::airstrikes::run(&self.world, &mut self.airstrikes, dt, now, &mut self.events);

        // 7. Pickups, before the death sweep
        systems::pickups::run(
            &self.world,
            self.player,
            &mut self.pickups,
            &mut self.score,
            now,
            &mut self.events,
        );

        // 8. Death sweep
        systems::cleanup::run(
            &mut self.world,
            self.player,
            &mut self.enemies,
            &mut self.onlookers,
            &mut self.score,
            self.config.onlooker_kill_rule,
            &mut self.game_over,
            &mut self.events,
            &mut self.despawn_buffer,
        );

        // 9. Multiplier
        self.score.recompute_multiplier();

        // 10. Spawn timers
        self.run_spawners(dt);

        // 11. Bound the undrained event buffer
        if self.events.len() > MAX_PENDING_EVENTS {
            let overflow = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..overflow);
            tracing::warn!(dropped = overflow, "event buffer overflow, drain every tick");
        }
    }

    /// Latch the driving input used on subsequent ticks.
    pub fn set_player_input(&mut self, input: DriveInput) {
        self.player_input = input;
    }

    /// Fire the player's weapon in `slot` at `target`. A silent no-op
    /// (returns false) on cooldown, empty ammo, EMP disable or death.
    pub fn fire_player_weapon(&mut self, slot: usize, target: Option<Entity>) -> bool {
        systems::autofire::fire_slot(
            &self.world,
            self.player,
            slot,
            target,
            self.time.elapsed_secs,
            &mut self.events,
            &mut self.airstrikes,
        )
    }

    /// Spawn an enemy at the current heat-scaled damage.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vector2) -> Entity {
        let heading = self
            .player_position()
            .filter(|p| *p != position)
            .map(|p| heading_of(p - position))
            .unwrap_or(0.0);
        let damage_scale = spawner::enemy_damage_scale(self.score.heat);
        let enemy =
            world_setup::spawn_enemy(&mut self.world, kind, position, heading, damage_scale);
        self.enemies.push(enemy);
        self.events.push(SimEvent::EnemySpawned {
            entity: entity_id(enemy),
            kind,
        });
        tracing::debug!(entity = entity_id(enemy), ?kind, "enemy spawned");
        enemy
    }

    pub fn spawn_onlooker(&mut self, position: Vector2) -> Entity {
        let onlooker = world_setup::spawn_onlooker(&mut self.world, position, 0.0);
        self.onlookers.push(onlooker);
        onlooker
    }

    pub fn add_pickup(&mut self, pickup: Pickup) {
        self.pickups.push(pickup);
    }

    /// Make `entity` hover (immune to mines) until `now + duration`.
    pub fn apply_hover(&mut self, entity: Entity, duration: f64) -> bool {
        let until = self.time.elapsed_secs + duration;
        let (Ok(mut vitals), Ok(mut status)) = (
            self.world.get::<&mut Vitals>(entity),
            self.world.get::<&mut StatusEffects>(entity),
        ) else {
            return false;
        };
        status.grant_hover(&mut vitals, until);
        true
    }

    /// Apply damage from outside the weapon system. Same no-op rules as weapons.
    pub fn damage_entity(&mut self, entity: Entity, amount: f64) -> bool {
        self.combat_ctx().damage(entity, amount)
    }

    /// Combat context over the current world and event stream, for layers
    /// (towers, scripted effects) that resolve damage between ticks.
    pub fn combat_ctx(&mut self) -> CombatCtx<'_> {
        CombatCtx::new(&self.world, self.time.elapsed_secs, &mut self.events)
    }

    pub fn set_freeze_enemies_movement(&mut self, freeze: bool) {
        self.freeze_enemies_movement = freeze;
    }

    pub fn set_disable_enemy_attacks(&mut self, disable: bool) {
        self.disable_enemy_attacks = disable;
    }

    /// Take every event emitted since the last drain. Hosts should drain
    /// once per tick; at most `MAX_PENDING_EVENTS` are kept otherwise.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build_snapshot(&SnapshotInput {
            world: &self.world,
            time: self.time,
            score: self.score.view(self.game_over),
            player: self.player,
            enemies: &self.enemies,
            onlookers: &self.onlookers,
            pickups: &self.pickups,
            airstrikes: &self.airstrikes,
        })
    }

    pub fn sim_time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scripted setups and external layers.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_position(&self) -> Option<Vector2> {
        self.world.get::<&Car>(self.player).ok().map(|car| car.position)
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn onlookers(&self) -> &[Entity] {
        &self.onlookers
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn airstrikes(&self) -> &[AirstrikeInstance] {
        &self.airstrikes
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world
            .get::<&Vitals>(entity)
            .map(|v| v.alive)
            .unwrap_or(false)
    }

    pub fn living_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|&&e| self.is_alive(e)).count()
    }

    pub fn score(&self) -> u64 {
        self.score.score
    }

    pub fn streak(&self) -> u32 {
        self.score.streak
    }

    pub fn multiplier(&self) -> u32 {
        self.score.multiplier
    }

    pub fn heat(&self) -> u32 {
        self.score.heat
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    fn drive_player(&mut self, dt: f64) {
        if self.game_over {
            return;
        }
        let input = self.player_input;
        if let Ok((car, vitals)) = self.world.query_one_mut::<(&mut Car, &Vitals)>(self.player) {
            if vitals.alive {
                car.update(dt, input);
            }
        }
    }

    /// Auto-fire player weapons at the nearest living enemy in range.
    fn player_autofire(&mut self, now: f64) {
        let enemies: Vec<_> = living_contacts(&self.world)
            .into_iter()
            .filter(|c| self.enemies.contains(&c.entity))
            .collect();
        if enemies.is_empty() {
            return;
        }
        systems::autofire::fire_auto_weapons(
            &self.world,
            self.player,
            now,
            &mut self.events,
            &mut self.airstrikes,
            |weapon, origin| {
                nearest_within(&enemies, origin, weapon.engage_range()).map(|c| c.entity)
            },
        );
    }

    fn run_spawners(&mut self, dt: f64) {
        if self.game_over {
            return;
        }
        let Some(center) = self.player_position() else {
            return;
        };

        if self.config.auto_spawn_enemies {
            let interval =
                spawner::enemy_spawn_interval(self.config.enemy_spawn_interval, self.score.heat);
            if self.timers.enemy_due(dt, interval) && self.enemies.len() < self.config.max_enemies
            {
                let kind = spawner::roll_enemy_kind(&mut self.rng);
                let position = spawner::ring_point(
                    &mut self.rng,
                    center,
                    self.config.spawn_distance,
                    self.config.arena_radius,
                );
                self.spawn_enemy(kind, position);
            }
        }

        if self.config.auto_spawn_pickups
            && self.timers.pickup_due(dt, self.config.pickup_spawn_interval)
            && self.pickups.len() < self.config.max_pickups
        {
            let kind = spawner::roll_pickup(&mut self.rng);
            let position = systems::onlookers::random_point_in_disk(
                &mut self.rng,
                Vector2::ZERO,
                self.config.arena_radius,
            );
            self.pickups.push(Pickup::new(kind, position));
        }
    }
}
