//! Tests for weapon resolution, the tick pipeline, scoring and determinism.

use hecs::{Entity, World};

use arena_core::config::SimConfig;
use arena_core::constants::*;
use arena_core::enums::*;
use arena_core::events::SimEvent;
use arena_core::types::{wrap_angle, Vector2};

use crate::car::Car;
use crate::combat::CombatCtx;
use crate::components::{Loadout, StatusEffects, Vitals};
use crate::engine::GameSimulation;
use crate::pickups::Pickup;
use crate::weapons::{AirstrikeInstance, FlightProfile, Weapon};

fn spawn_target(world: &mut World, faction: Faction, position: Vector2, hp: f64) -> Entity {
    world.spawn((
        Car::new(position, 0.0),
        Vitals::new(hp),
        StatusEffects::default(),
        Loadout::default(),
        faction,
    ))
}

fn hp(world: &World, entity: Entity) -> f64 {
    world.get::<&Vitals>(entity).unwrap().hp
}

fn no_sink() -> Vec<AirstrikeInstance> {
    Vec::new()
}

fn quiet_config() -> SimConfig {
    SimConfig {
        auto_spawn_enemies: false,
        auto_spawn_pickups: false,
        initial_onlookers: 0,
        ..Default::default()
    }
}

// ---- Weapons ----

#[test]
fn test_machine_gun_respects_cooldown() {
    let mut world = World::new();
    let shooter = spawn_target(&mut world, Faction::Player, Vector2::ZERO, 100.0);
    let target = spawn_target(&mut world, Faction::Enemy, Vector2::new(10.0, 0.0), 50.0);
    let mut gun = Weapon::machine_gun(shooter, 1.0, 100.0, 5.0);
    let mut sink: Vec<AirstrikeInstance> = Vec::new();
    let mut events = Vec::new();

    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);
    assert!(gun.fire(&mut ctx, Some(target), &mut sink));
    assert_eq!(hp(&world, target), 45.0);

    let mut ctx = CombatCtx::new(&world, 0.5, &mut events);
    assert!(!gun.can_fire(0.5));
    assert!(!gun.fire(&mut ctx, Some(target), &mut sink));
    assert_eq!(hp(&world, target), 45.0);

    let mut ctx = CombatCtx::new(&world, 1.01, &mut events);
    assert!(gun.fire(&mut ctx, Some(target), &mut sink));
    assert_eq!(hp(&world, target), 40.0);
}

#[test]
fn test_hitscan_out_of_range_still_spends_cooldown() {
    let mut world = World::new();
    let shooter = spawn_target(&mut world, Faction::Player, Vector2::ZERO, 100.0);
    let target = spawn_target(&mut world, Faction::Enemy, Vector2::new(150.0, 0.0), 50.0);
    let mut gun = Weapon::machine_gun(shooter, 1.0, 100.0, 5.0);
    let mut events = Vec::new();
    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);

    assert!(gun.fire(&mut ctx, Some(target), &mut no_sink()));
    assert_eq!(hp(&world, target), 50.0);
    assert_eq!(gun.base.last_fire_time, Some(0.0));
    assert!(!gun.can_fire(0.5));
}

#[test]
fn test_shotgun_requires_cone() {
    let mut world = World::new();
    let shooter = spawn_target(&mut world, Faction::Player, Vector2::ZERO, 100.0);
    let ahead = spawn_target(&mut world, Faction::Enemy, Vector2::new(10.0, 1.0), 100.0);
    let behind = spawn_target(&mut world, Faction::Enemy, Vector2::new(-10.0, 0.0), 100.0);
    let mut shotgun = Weapon::shotgun(shooter, 0.0, 18.0, 0.8, 22.0);
    let mut events = Vec::new();
    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);

    assert!(shotgun.fire(&mut ctx, Some(behind), &mut no_sink()));
    assert!(shotgun.fire(&mut ctx, Some(ahead), &mut no_sink()));
    assert_eq!(hp(&world, behind), 100.0);
    // Flat damage, pellets are cosmetic.
    assert_eq!(hp(&world, ahead), 78.0);
}

#[test]
fn test_finite_ammo_runs_dry() {
    let mut world = World::new();
    let shooter = spawn_target(&mut world, Faction::Player, Vector2::ZERO, 100.0);
    let target = spawn_target(&mut world, Faction::Enemy, Vector2::new(5.0, 0.0), 1000.0);
    let mut gun = Weapon::machine_gun(shooter, 0.0, 100.0, 1.0).with_ammo(Some(2));
    let mut events = Vec::new();
    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);

    assert!(gun.fire(&mut ctx, Some(target), &mut no_sink()));
    assert!(gun.fire(&mut ctx, Some(target), &mut no_sink()));
    assert!(!gun.fire(&mut ctx, Some(target), &mut no_sink()));
    assert_eq!(gun.base.ammo, Some(0));
    assert_eq!(hp(&world, target), 998.0);
}

#[test]
fn test_damage_scale_applies_on_read() {
    let mut world = World::new();
    let shooter = spawn_target(&mut world, Faction::Enemy, Vector2::ZERO, 100.0);
    let target = spawn_target(&mut world, Faction::Player, Vector2::new(5.0, 0.0), 100.0);
    let mut gun = Weapon::machine_gun(shooter, 0.0, 100.0, 10.0);
    gun.base.damage_scale = 1.5;
    let mut events = Vec::new();
    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);

    gun.fire(&mut ctx, Some(target), &mut no_sink());
    assert_eq!(hp(&world, target), 85.0);
    assert!(matches!(gun.spec, crate::weapons::WeaponSpec::Hitscan { damage, .. } if damage == 10.0));
}

#[test]
fn test_mine_waits_for_arm_delay() {
    let mut world = World::new();
    let owner = spawn_target(&mut world, Faction::Player, Vector2::ZERO, 100.0);
    let victim = spawn_target(&mut world, Faction::Enemy, Vector2::new(1.0, 0.0), 100.0);
    let mut layer = Weapon::mine_layer(owner, 0.0, 0.75, 4.0, 45.0);
    let mut events = Vec::new();

    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);
    assert!(layer.fire(&mut ctx, None, &mut no_sink()));
    assert_eq!(layer.mines().len(), 1);

    let mut ctx = CombatCtx::new(&world, 0.5, &mut events);
    layer.update_projectiles(&mut ctx, 0.5);
    assert_eq!(hp(&world, victim), 100.0);
    assert_eq!(layer.mines().len(), 1);

    let mut ctx = CombatCtx::new(&world, 0.8, &mut events);
    layer.update_projectiles(&mut ctx, 0.3);
    assert_eq!(hp(&world, victim), 55.0);
    assert!(layer.mines().is_empty());
    assert_eq!(hp(&world, owner), 100.0);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::MineDetonated { .. })));
}

#[test]
fn test_mine_picks_nearest_and_ignores_hovering() {
    let mut world = World::new();
    let owner = spawn_target(&mut world, Faction::Player, Vector2::new(50.0, 0.0), 100.0);
    let hovering = spawn_target(&mut world, Faction::Enemy, Vector2::new(0.5, 0.0), 100.0);
    let far = spawn_target(&mut world, Faction::Enemy, Vector2::new(3.0, 0.0), 100.0);
    let near = spawn_target(&mut world, Faction::Enemy, Vector2::new(0.0, 2.0), 100.0);
    world.get::<&mut Vitals>(hovering).unwrap().hovering = true;

    let mut layer = Weapon::mine_layer(owner, 0.0, 0.0, 4.0, 45.0);
    let mut events = Vec::new();
    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);
    layer.fire(&mut ctx, None, &mut no_sink());
    // Drop the mine at the origin instead of under the owner.
    if let crate::weapons::WeaponSpec::Mine { mines, .. } = &mut layer.spec {
        mines[0].position = Vector2::ZERO;
    }

    let mut ctx = CombatCtx::new(&world, 0.1, &mut events);
    layer.update_projectiles(&mut ctx, 0.1);
    assert_eq!(hp(&world, hovering), 100.0);
    assert_eq!(hp(&world, far), 100.0);
    assert_eq!(hp(&world, near), 55.0);
}

#[test]
fn test_homing_turn_is_bounded_and_hits() {
    let mut world = World::new();
    let owner = spawn_target(&mut world, Faction::Player, Vector2::ZERO, 100.0);
    let target = spawn_target(&mut world, Faction::Enemy, Vector2::new(50.0, 0.0), 100.0);
    let profile = FlightProfile {
        speed: 45.0,
        turn_rate: 3.0,
        radius: 2.5,
        max_lifetime: 8.0,
    };
    let mut launcher = Weapon::homing_missile(owner, 0.0, profile, 35.0);
    let mut events = Vec::new();
    let dt = 1.0 / 60.0;

    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);
    assert!(launcher.fire(&mut ctx, Some(target), &mut no_sink()));
    assert_eq!(launcher.missiles()[0].heading, 0.0);

    // Target jumps sideways after launch.
    world.get::<&mut Car>(target).unwrap().position = Vector2::new(0.0, 50.0);

    let mut now = 0.0;
    for _ in 0..480 {
        let Some(before) = launcher.missiles().first().map(|m| m.heading) else {
            break;
        };
        now += dt;
        let mut ctx = CombatCtx::new(&world, now, &mut events);
        launcher.update_projectiles(&mut ctx, dt);
        if let Some(after) = launcher.missiles().first().map(|m| m.heading) {
            assert!(wrap_angle(after - before).abs() <= 3.0 * dt + 1e-9);
        }
    }
    assert!(launcher.missiles().is_empty());
    assert_eq!(hp(&world, target), 65.0);
}

#[test]
fn test_rocket_flies_straight() {
    let mut world = World::new();
    let owner = spawn_target(&mut world, Faction::Enemy, Vector2::ZERO, 100.0);
    let target = spawn_target(&mut world, Faction::Player, Vector2::new(30.0, 0.0), 100.0);
    let mut rocket = Weapon::rocket(owner, 0.0, 55.0, 3.0, 30.0);
    let mut events = Vec::new();

    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);
    rocket.fire(&mut ctx, Some(target), &mut no_sink());
    world.get::<&mut Car>(target).unwrap().position = Vector2::new(30.0, 30.0);

    let dt = 1.0 / 60.0;
    for i in 1..=30 {
        let mut ctx = CombatCtx::new(&world, dt * i as f64, &mut events);
        rocket.update_projectiles(&mut ctx, dt);
        if let Some(m) = rocket.missiles().first() {
            assert_eq!(m.heading, 0.0);
        }
    }
}

#[test]
fn test_emp_stacks_most_restrictive() {
    let mut world = World::new();
    let owner = spawn_target(&mut world, Faction::Player, Vector2::ZERO, 100.0);
    let target = spawn_target(&mut world, Faction::Enemy, Vector2::new(5.0, 0.0), 100.0);
    let far = spawn_target(&mut world, Faction::Enemy, Vector2::new(50.0, 0.0), 100.0);
    let mut strong = Weapon::emp(owner, 0.0, 20.0, 0.4, 3.0);
    let mut long = Weapon::emp(owner, 0.0, 20.0, 0.6, 5.0);
    let mut events = Vec::new();

    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);
    assert!(strong.pulse(&mut ctx));
    let mut ctx = CombatCtx::new(&world, 1.0, &mut events);
    assert!(long.pulse(&mut ctx));

    let status = *world.get::<&StatusEffects>(target).unwrap();
    assert_eq!(status.move_scale, 0.4);
    assert_eq!(status.move_scale_until, 6.0);
    assert_eq!(status.weapons_disabled_until, 6.0);
    assert_eq!(world.get::<&StatusEffects>(far).unwrap().move_scale, 1.0);
    assert_eq!(world.get::<&StatusEffects>(owner).unwrap().move_scale, 1.0);
}

#[test]
fn test_airstrike_binds_position_and_explodes_once() {
    let mut world = World::new();
    let owner = spawn_target(&mut world, Faction::Player, Vector2::ZERO, 100.0);
    let target = spawn_target(&mut world, Faction::Enemy, Vector2::new(20.0, 0.0), 100.0);
    let bystander = spawn_target(&mut world, Faction::Onlooker, Vector2::new(25.0, 0.0), 100.0);
    let mut caller = Weapon::airstrike(owner, 0.0, 2.0, 10.0, 60.0);
    let mut pending: Vec<AirstrikeInstance> = Vec::new();
    let mut events = Vec::new();

    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);
    assert!(caller.fire(&mut ctx, Some(target), &mut pending));
    assert_eq!(pending.len(), 1);
    world.get::<&mut Car>(target).unwrap().position = Vector2::new(100.0, 0.0);

    let mut strike = pending[0];
    let mut ctx = CombatCtx::new(&world, 1.0, &mut events);
    assert_eq!(strike.advance(1.0, &mut ctx), None);
    let mut ctx = CombatCtx::new(&world, 2.0, &mut events);
    assert_eq!(strike.advance(1.0, &mut ctx), Some(1));
    let mut ctx = CombatCtx::new(&world, 3.0, &mut events);
    assert_eq!(strike.advance(1.0, &mut ctx), None);

    assert_eq!(hp(&world, target), 100.0);
    assert_eq!(hp(&world, bystander), 40.0);
}

#[test]
fn test_invulnerable_and_dead_targets_are_noops() {
    let mut world = World::new();
    let shooter = spawn_target(&mut world, Faction::Player, Vector2::ZERO, 100.0);
    let shielded = spawn_target(&mut world, Faction::Enemy, Vector2::new(5.0, 0.0), 50.0);
    let dead = spawn_target(&mut world, Faction::Enemy, Vector2::new(6.0, 0.0), 50.0);
    world.get::<&mut Vitals>(shielded).unwrap().invulnerable = true;
    world.get::<&mut Vitals>(dead).unwrap().take_damage(50.0);

    let mut gun = Weapon::machine_gun(shooter, 0.0, 100.0, 5.0);
    let mut events = Vec::new();
    let mut ctx = CombatCtx::new(&world, 0.0, &mut events);
    assert!(gun.fire(&mut ctx, Some(shielded), &mut no_sink()));
    assert!(gun.fire(&mut ctx, Some(dead), &mut no_sink()));
    assert_eq!(hp(&world, shielded), 50.0);
    assert_eq!(hp(&world, dead), 0.0);
    assert!(!events.iter().any(|e| matches!(e, SimEvent::Damaged { .. })));
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut sim_a = GameSimulation::new(config.clone());
    let mut sim_b = GameSimulation::new(config);

    for _ in 0..900 {
        sim_a.update(DT);
        sim_b.update(DT);
    }
    let json_a = serde_json::to_string(&sim_a.snapshot()).unwrap();
    let json_b = serde_json::to_string(&sim_b.snapshot()).unwrap();
    assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    assert_eq!(sim_a.drain_events(), sim_b.drain_events());
}

#[test]
fn test_determinism_different_seeds() {
    let mut sim_a = GameSimulation::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut sim_b = GameSimulation::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    for _ in 0..60 {
        sim_a.update(DT);
        sim_b.update(DT);
    }
    let json_a = serde_json::to_string(&sim_a.snapshot()).unwrap();
    let json_b = serde_json::to_string(&sim_b.snapshot()).unwrap();
    assert_ne!(json_a, json_b);
}

// ---- Tick pipeline ----

#[test]
fn test_enemy_kill_scores_and_despawns() {
    let mut sim = GameSimulation::new(quiet_config());
    sim.set_freeze_enemies_movement(true);
    sim.set_disable_enemy_attacks(true);
    let enemy = sim.spawn_enemy(EnemyKind::Brute, Vector2::new(100.0, 0.0));

    assert!(sim.damage_entity(enemy, 1000.0));
    sim.update(DT);

    assert_eq!(sim.score(), ENEMY_KILL_SCORE);
    assert_eq!(sim.streak(), 1);
    assert!(sim.enemies().is_empty());
    assert!(sim.world().get::<&Vitals>(enemy).is_err());
    let events = sim.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::EnemyKilled { score_awarded: 100, .. })));
}

#[test]
fn test_multiplier_after_three_kills() {
    let mut sim = GameSimulation::new(quiet_config());
    sim.set_freeze_enemies_movement(true);
    sim.set_disable_enemy_attacks(true);
    for i in 0..3 {
        let enemy = sim.spawn_enemy(EnemyKind::Raider, Vector2::new(100.0, 10.0 * i as f64));
        sim.damage_entity(enemy, 1000.0);
    }
    sim.update(DT);
    assert_eq!(sim.streak(), 3);
    assert_eq!(sim.multiplier(), 2);
    assert_eq!(sim.score(), 300);
}

#[test]
fn test_onlooker_penalty_rule() {
    let mut sim = GameSimulation::new(SimConfig {
        onlooker_kill_rule: OnlookerKillRule::Penalty,
        ..quiet_config()
    });
    let onlooker = sim.spawn_onlooker(Vector2::new(30.0, 0.0));
    sim.damage_entity(onlooker, 1000.0);
    sim.update(DT);
    assert_eq!(sim.score(), 0);
    assert_eq!(sim.heat(), 1);
    assert_eq!(sim.streak(), 0);
    assert!(sim.onlookers().is_empty());
}

#[test]
fn test_onlooker_arcade_rule_keeps_streak() {
    let mut sim = GameSimulation::new(quiet_config());
    sim.set_freeze_enemies_movement(true);
    sim.set_disable_enemy_attacks(true);
    let enemy = sim.spawn_enemy(EnemyKind::Raider, Vector2::new(100.0, 0.0));
    sim.damage_entity(enemy, 1000.0);
    sim.update(DT);

    let onlooker = sim.spawn_onlooker(Vector2::new(-30.0, 0.0));
    sim.damage_entity(onlooker, 1000.0);
    sim.update(DT);
    assert_eq!(sim.score(), ENEMY_KILL_SCORE + ONLOOKER_BONUS_SCORE);
    assert_eq!(sim.heat(), 1);
    assert_eq!(sim.streak(), 1);
}

#[test]
fn test_dead_player_cannot_collect_pickup() {
    let mut sim = GameSimulation::new(quiet_config());
    let player = sim.player();
    sim.add_pickup(Pickup::new(
        PickupKind::Health { amount: 25.0 },
        Vector2::ZERO,
    ));
    sim.damage_entity(player, PLAYER_MAX_HP);
    sim.update(DT);

    assert_eq!(sim.pickups().len(), 1);
    assert!(sim.game_over());
    assert_eq!(sim.streak(), 0);
    assert!(sim.drain_events().contains(&SimEvent::PlayerDied));
}

#[test]
fn test_pickups_apply_effects() {
    let mut sim = GameSimulation::new(quiet_config());
    let player = sim.player();
    sim.damage_entity(player, 40.0);
    sim.add_pickup(Pickup::new(PickupKind::Health { amount: 25.0 }, Vector2::ZERO));
    sim.add_pickup(Pickup::new(PickupKind::Shield { duration: 5.0 }, Vector2::new(1.0, 0.0)));
    sim.add_pickup(Pickup::new(
        PickupKind::Weapon {
            kind: WeaponKind::Emp,
        },
        Vector2::new(0.0, 1.0),
    ));
    sim.add_pickup(Pickup::new(PickupKind::Score { points: 50 }, Vector2::new(0.0, -1.0)));
    sim.add_pickup(Pickup::new(PickupKind::Ammo { amount: 4 }, Vector2::new(80.0, 0.0)));
    sim.update(DT);

    assert_eq!(sim.pickups().len(), 1);
    assert_eq!(sim.score(), 50);
    {
        let vitals = sim.world().get::<&Vitals>(player).unwrap();
        assert_eq!(vitals.hp, 85.0);
        assert!(vitals.invulnerable);
    }
    assert!(!sim.damage_entity(player, 10.0));
    let loadout = sim.world().get::<&Loadout>(player).unwrap();
    assert!(loadout.weapons.iter().any(|w| w.kind() == WeaponKind::Emp));
}

#[test]
fn test_shield_expires() {
    let mut sim = GameSimulation::new(quiet_config());
    let player = sim.player();
    sim.add_pickup(Pickup::new(PickupKind::Shield { duration: 0.5 }, Vector2::ZERO));
    sim.update(DT);
    assert!(sim.world().get::<&Vitals>(player).unwrap().invulnerable);
    for _ in 0..60 {
        sim.update(DT);
    }
    assert!(!sim.world().get::<&Vitals>(player).unwrap().invulnerable);
}

#[test]
fn test_freeze_and_disable_toggles() {
    let mut sim = GameSimulation::new(quiet_config());
    sim.set_freeze_enemies_movement(true);
    sim.set_disable_enemy_attacks(true);
    let enemy = sim.spawn_enemy(EnemyKind::Raider, Vector2::new(100.0, 0.0));
    for _ in 0..120 {
        sim.update(DT);
    }
    let position = sim.world().get::<&Car>(enemy).unwrap().position;
    assert_eq!(position, Vector2::new(100.0, 0.0));

    // Unfreeze: the raider closes in but still holds fire.
    sim.set_freeze_enemies_movement(false);
    for _ in 0..120 {
        sim.update(DT);
    }
    let position = sim.world().get::<&Car>(enemy).unwrap().position;
    assert!(position.x < 100.0);
    let player_hp = sim.world().get::<&Vitals>(sim.player()).unwrap().hp;
    assert_eq!(player_hp, PLAYER_MAX_HP);
}

#[test]
fn test_enemies_attack_player() {
    let mut sim = GameSimulation::new(quiet_config());
    sim.set_freeze_enemies_movement(true);
    sim.spawn_enemy(EnemyKind::Raider, Vector2::new(10.0, 0.0));
    sim.update(DT);
    let player_hp = sim.world().get::<&Vitals>(sim.player()).unwrap().hp;
    assert!(player_hp < PLAYER_MAX_HP);
}

#[test]
fn test_player_autofire_kills_nearby_enemy() {
    let mut sim = GameSimulation::new(quiet_config());
    sim.set_freeze_enemies_movement(true);
    sim.set_disable_enemy_attacks(true);
    sim.spawn_enemy(EnemyKind::Raider, Vector2::new(10.0, 0.0));
    for _ in 0..180 {
        sim.update(DT);
    }
    assert!(sim.enemies().is_empty());
    assert_eq!(sim.score(), ENEMY_KILL_SCORE);
}

#[test]
fn test_manual_fire_blocked_while_disabled() {
    let mut sim = GameSimulation::new(quiet_config());
    let player = sim.player();
    sim.world()
        .get::<&mut StatusEffects>(player)
        .unwrap()
        .disable_weapons(10.0);
    assert!(!sim.fire_player_weapon(1, None));
    sim.world()
        .get::<&mut StatusEffects>(player)
        .unwrap()
        .weapons_disabled_until = 0.0;
    assert!(sim.fire_player_weapon(1, None));
    assert_eq!(sim.snapshot().mines.len(), 1);
}

#[test]
fn test_emp_slow_expires_before_ai() {
    let mut sim = GameSimulation::new(quiet_config());
    let enemy = sim.spawn_enemy(EnemyKind::Brute, Vector2::new(50.0, 0.0));
    sim.world()
        .get::<&mut StatusEffects>(enemy)
        .unwrap()
        .apply_slow(0.3, 0.5);
    sim.update(DT);
    assert_eq!(sim.world().get::<&Car>(enemy).unwrap().speed_scale, 0.3);
    for _ in 0..40 {
        sim.update(DT);
    }
    assert_eq!(sim.world().get::<&Car>(enemy).unwrap().speed_scale, 1.0);
}

#[test]
fn test_periodic_enemy_spawns() {
    let mut sim = GameSimulation::new(SimConfig {
        auto_spawn_pickups: false,
        ..Default::default()
    });
    for _ in 0..400 {
        sim.update(DT);
    }
    assert!(!sim.enemies().is_empty());
    let events = sim.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::EnemySpawned { .. })));
}

#[test]
fn test_heat_shortens_enemy_spawn_interval() {
    use crate::systems::spawner::enemy_spawn_interval;

    assert_eq!(enemy_spawn_interval(6.0, 0), 6.0);
    assert_eq!(enemy_spawn_interval(6.0, 4), 3.0);
    assert_eq!(enemy_spawn_interval(6.0, 40), MIN_ENEMY_SPAWN_INTERVAL);
}

#[test]
fn test_enemy_spawns_stop_at_cap() {
    let mut sim = GameSimulation::new(SimConfig {
        auto_spawn_pickups: false,
        initial_onlookers: 0,
        enemy_spawn_interval: MIN_ENEMY_SPAWN_INTERVAL,
        max_enemies: 3,
        spawn_distance: 100.0,
        freeze_enemies_movement: true,
        disable_enemy_attacks: true,
        ..Default::default()
    });
    for tick in 0..(12 * TICK_RATE) {
        sim.update(DT);
        assert!(sim.enemies().len() <= 3, "over the cap at tick {tick}");
    }
    assert_eq!(sim.enemies().len(), 3);
    let spawned = sim
        .drain_events()
        .iter()
        .filter(|e| matches!(e, SimEvent::EnemySpawned { .. }))
        .count();
    assert_eq!(spawned, 3);
}

#[test]
fn test_pickups_spawn_periodically_up_to_cap() {
    let mut sim = GameSimulation::new(SimConfig {
        auto_spawn_enemies: false,
        initial_onlookers: 0,
        pickup_spawn_interval: 1.0,
        max_pickups: 2,
        ..Default::default()
    });
    let mut counts = Vec::new();
    for _ in 0..(6 * TICK_RATE) {
        sim.update(DT);
        assert!(sim.pickups().len() <= 2);
        counts.push(sim.pickups().len());
    }
    // Nothing before the first interval elapses, then one per interval.
    assert_eq!(counts[TICK_RATE as usize / 2], 0);
    assert!(counts.contains(&1));
    assert_eq!(counts.iter().max(), Some(&2));
}

#[test]
fn test_enemies_spawned_after_heat_hit_harder() {
    let mut sim = GameSimulation::new(SimConfig {
        onlooker_kill_rule: OnlookerKillRule::Penalty,
        ..quiet_config()
    });
    let onlooker = sim.spawn_onlooker(Vector2::new(30.0, 0.0));
    sim.damage_entity(onlooker, 1000.0);
    sim.update(DT);
    assert_eq!(sim.heat(), 1);

    let enemy = sim.spawn_enemy(EnemyKind::Raider, Vector2::new(100.0, 0.0));
    let loadout = sim.world().get::<&Loadout>(enemy).unwrap();
    assert!(!loadout.weapons.is_empty());
    for weapon in &loadout.weapons {
        assert!((weapon.base.damage_scale - 1.1).abs() < 1e-12);
    }
}

#[test]
fn test_onlookers_wander_inside_arena() {
    let arena_radius = 40.0;
    let mut sim = GameSimulation::new(SimConfig {
        arena_radius,
        spawn_distance: 30.0,
        initial_onlookers: 8,
        auto_spawn_enemies: false,
        auto_spawn_pickups: false,
        ..Default::default()
    });
    let position =
        |sim: &GameSimulation, e: Entity| sim.world().get::<&Car>(e).unwrap().position;
    let onlookers = sim.onlookers().to_vec();
    let start: Vec<_> = onlookers.iter().map(|&e| position(&sim, e)).collect();

    for _ in 0..(20 * TICK_RATE) {
        sim.update(DT);
        for &onlooker in &onlookers {
            assert!(position(&sim, onlooker).length() <= arena_radius + 1e-9);
        }
    }
    let moved = onlookers
        .iter()
        .zip(&start)
        .filter(|(e, s)| position(&sim, **e).distance(**s) > 1.0)
        .count();
    assert!(moved > 0);
}

#[test]
fn test_undrained_events_are_bounded() {
    let mut sim = GameSimulation::new(quiet_config());
    sim.set_freeze_enemies_movement(true);
    sim.set_disable_enemy_attacks(true);
    let enemy = sim.spawn_enemy(EnemyKind::Brute, Vector2::new(100.0, 0.0));
    for _ in 0..(MAX_PENDING_EVENTS + 50) {
        sim.damage_entity(enemy, 0.001);
    }
    sim.update(DT);

    let events = sim.drain_events();
    assert_eq!(events.len(), MAX_PENDING_EVENTS);
    assert!(matches!(events[0], SimEvent::Damaged { .. }));
    assert!(sim.drain_events().is_empty());
}

#[test]
fn test_hovering_player_ignores_enemy_mine() {
    let mut sim = GameSimulation::new(quiet_config());
    sim.set_freeze_enemies_movement(true);
    sim.set_disable_enemy_attacks(true);
    let player = sim.player();
    let enemy = sim.spawn_enemy(EnemyKind::Raider, Vector2::new(0.0, 1.0));
    {
        let mut loadout = sim.world().get::<&mut Loadout>(enemy).unwrap();
        let mut layer = Weapon::mine_layer(enemy, 0.0, 0.0, 4.0, 45.0);
        let mut events = Vec::new();
        let mut ctx = CombatCtx::new(sim.world(), 0.0, &mut events);
        layer.fire(&mut ctx, None, &mut no_sink());
        loadout.weapons = vec![layer];
    }
    assert!(sim.apply_hover(player, 1.0));
    sim.update(DT);
    assert_eq!(
        sim.world().get::<&Vitals>(player).unwrap().hp,
        PLAYER_MAX_HP
    );
    assert_eq!(sim.snapshot().mines.len(), 1);
}

#[test]
fn test_snapshot_reports_entities() {
    let mut sim = GameSimulation::new(SimConfig {
        initial_onlookers: 3,
        auto_spawn_enemies: false,
        auto_spawn_pickups: false,
        ..Default::default()
    });
    sim.spawn_enemy(EnemyKind::Bomber, Vector2::new(40.0, 0.0));
    sim.update(DT);
    let snap = sim.snapshot();
    let player = snap.player.expect("player view");
    assert_eq!(player.faction, Faction::Player);
    assert_eq!(player.weapons.len(), 3);
    assert_eq!(snap.enemies.len(), 1);
    assert_eq!(snap.onlookers.len(), 3);
    assert_eq!(snap.time.tick, 1);
    assert_eq!(snap.score.multiplier, 1);
}
