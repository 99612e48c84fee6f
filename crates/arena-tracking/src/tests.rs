//! Tests for target lock-on, race tracking and the replay buffer.

use hecs::{Entity, World};

use arena_core::enums::{Faction, LockState};
use arena_core::types::Vector2;
use arena_sim::car::Car;
use arena_sim::components::Vitals;

use crate::race::{RaceEvent, RaceTracker};
use crate::replay::ReplayBuffer;
use crate::targeting::{LockParams, TargetingSystem};

fn spawn(world: &mut World, faction: Faction, position: Vector2) -> Entity {
    world.spawn((Car::new(position, 0.0), Vitals::new(50.0), faction))
}

const PARAMS: LockParams = LockParams {
    range: 50.0,
    cone: 0.5,
    lock_time: 1.0,
};

// ---- Targeting ----

#[test]
fn test_candidates_nearest_first_and_hostile_only() {
    let mut world = World::new();
    let player = spawn(&mut world, Faction::Player, Vector2::ZERO);
    let e30 = spawn(&mut world, Faction::Enemy, Vector2::new(30.0, 0.0));
    let e10 = spawn(&mut world, Faction::Enemy, Vector2::new(0.0, 10.0));
    let onlooker = spawn(&mut world, Faction::Onlooker, Vector2::new(-20.0, 0.0));
    let _far = spawn(&mut world, Faction::Enemy, Vector2::new(200.0, 0.0));
    let dead = spawn(&mut world, Faction::Enemy, Vector2::new(5.0, 0.0));
    world.get::<&mut Vitals>(dead).unwrap().take_damage(100.0);

    assert_eq!(
        TargetingSystem::candidates(&world, player, 100.0),
        vec![e10, onlooker, e30]
    );
    // Enemies only ever target the player.
    assert_eq!(TargetingSystem::candidates(&world, e10, 100.0), vec![player]);
}

#[test]
fn test_cycle_round_robin_resets_progress() {
    let mut world = World::new();
    let a = spawn(&mut world, Faction::Enemy, Vector2::new(10.0, 0.0));
    let b = spawn(&mut world, Faction::Enemy, Vector2::new(20.0, 0.0));
    let c = spawn(&mut world, Faction::Enemy, Vector2::new(30.0, 0.0));
    let list = [a, b, c];
    let mut targeting = TargetingSystem::new();
    assert_eq!(targeting.state(), LockState::NoTarget);

    assert_eq!(targeting.cycle_targets(&list), Some(a));
    targeting.update_lock(0.5, &world, Vector2::ZERO, 0.0, &PARAMS);
    assert_eq!(targeting.progress(), 0.5);

    assert_eq!(targeting.cycle_targets(&list), Some(b));
    assert_eq!(targeting.progress(), 0.0);
    assert_eq!(targeting.cycle_targets(&list), Some(c));
    assert_eq!(targeting.cycle_targets(&list), Some(a));
}

#[test]
fn test_missing_target_restarts_at_front() {
    let mut world = World::new();
    let a = spawn(&mut world, Faction::Enemy, Vector2::new(10.0, 0.0));
    let b = spawn(&mut world, Faction::Enemy, Vector2::new(20.0, 0.0));
    let c = spawn(&mut world, Faction::Enemy, Vector2::new(30.0, 0.0));
    let mut targeting = TargetingSystem::new();
    targeting.cycle_targets(&[a, b]);
    targeting.cycle_targets(&[a, b]);
    assert_eq!(targeting.get_target(), Some(b));

    assert_eq!(targeting.cycle_targets(&[c, a]), Some(c));
    assert_eq!(targeting.cycle_targets(&[]), None);
    assert_eq!(targeting.state(), LockState::NoTarget);
}

#[test]
fn test_lock_accumulates_resets_and_clears() {
    let mut world = World::new();
    let target = spawn(&mut world, Faction::Enemy, Vector2::new(10.0, 0.0));
    let mut targeting = TargetingSystem::new();
    targeting.cycle_targets(&[target]);

    assert_eq!(targeting.update_lock(0.5, &world, Vector2::ZERO, 0.0, &PARAMS), 0.5);
    assert_eq!(targeting.state(), LockState::Acquired);
    assert!(!targeting.is_locked());
    assert_eq!(targeting.update_lock(0.75, &world, Vector2::ZERO, 0.0, &PARAMS), 1.0);
    assert_eq!(targeting.state(), LockState::Locked);

    // Facing away: progress resets, selection stays.
    let progress = targeting.update_lock(0.1, &world, Vector2::ZERO, std::f64::consts::PI, &PARAMS);
    assert_eq!(progress, 0.0);
    assert_eq!(targeting.get_target(), Some(target));
    assert_eq!(targeting.state(), LockState::Acquired);

    // Out of range: same.
    targeting.update_lock(0.5, &world, Vector2::ZERO, 0.0, &PARAMS);
    assert_eq!(
        targeting.update_lock(0.1, &world, Vector2::new(-100.0, 0.0), 0.0, &PARAMS),
        0.0
    );
    assert_eq!(targeting.get_target(), Some(target));

    world.get::<&mut Vitals>(target).unwrap().take_damage(100.0);
    assert_eq!(targeting.update_lock(0.1, &world, Vector2::ZERO, 0.0, &PARAMS), 0.0);
    assert_eq!(targeting.get_target(), None);
    assert_eq!(targeting.state(), LockState::NoTarget);
}

// ---- Race ----

fn track(laps: u32) -> RaceTracker {
    RaceTracker::new(
        vec![Vector2::new(10.0, 20.0), Vector2::new(-10.0, 20.0)],
        3.0,
        (Vector2::new(0.0, -5.0), Vector2::new(0.0, 5.0)),
        laps,
    )
}

fn drive_lap(race: &mut RaceTracker, start: f64) -> Vec<Option<RaceEvent>> {
    vec![
        race.update(Vector2::new(10.0, 20.0), start + 1.0),
        race.update(Vector2::new(-10.0, 20.0), start + 2.0),
        race.update(Vector2::new(-1.0, 0.0), start + 3.0),
        race.update(Vector2::new(1.0, 0.0), start + 4.0),
    ]
}

#[test]
fn test_finish_before_checkpoints_does_not_count() {
    let mut race = track(3);
    assert_eq!(race.update(Vector2::new(-1.0, 0.0), 0.0), None);
    assert_eq!(race.update(Vector2::new(1.0, 0.0), 1.0), None);
    assert_eq!(race.lap, 0);

    // Only the first checkpoint, then the line.
    race.update(Vector2::new(10.0, 20.0), 2.0);
    race.update(Vector2::new(-1.0, 0.0), 3.0);
    race.update(Vector2::new(1.0, 0.0), 4.0);
    assert_eq!(race.lap, 0);
    assert_eq!(race.next_checkpoint, 1);
}

#[test]
fn test_checkpoints_must_be_in_order() {
    let mut race = track(3);
    race.update(Vector2::ZERO, 0.0);
    assert_eq!(race.update(Vector2::new(-10.0, 20.0), 1.0), None);
    assert_eq!(race.next_checkpoint, 0);
    assert_eq!(
        race.update(Vector2::new(10.0, 20.0), 2.0),
        Some(RaceEvent::CheckpointReached { index: 0 })
    );
}

#[test]
fn test_laps_then_finish_is_terminal() {
    let mut race = track(2);
    race.update(Vector2::new(1.0, 0.0), 0.0);

    let events = drive_lap(&mut race, 0.0);
    assert_eq!(events[0], Some(RaceEvent::CheckpointReached { index: 0 }));
    assert_eq!(events[1], Some(RaceEvent::CheckpointReached { index: 1 }));
    assert_eq!(
        events[3],
        Some(RaceEvent::LapCompleted {
            lap: 1,
            lap_time: 4.0
        })
    );
    assert_eq!(race.lap, 1);
    assert_eq!(race.next_checkpoint, 0);

    let events = drive_lap(&mut race, 10.0);
    assert_eq!(
        events[3],
        Some(RaceEvent::Finished {
            laps: 2,
            lap_time: 10.0
        })
    );
    assert!(race.finished);
    assert_eq!(race.lap_times(), &[4.0, 10.0]);
    assert_eq!(race.best_lap(), Some(4.0));

    assert!(drive_lap(&mut race, 20.0).iter().all(Option::is_none));
    assert_eq!(race.lap, 2);
    assert!(race.finished);
}

// ---- Replay ----

#[test]
fn test_replay_trims_by_age() {
    let mut replay = ReplayBuffer::new(5.0);
    for t in 0..=10 {
        replay.push(t as f64, t);
    }
    assert_eq!(replay.len(), 6);
    assert_eq!(replay.iter().next().map(|f| f.data), Some(5));

    let mut short = ReplayBuffer::new(0.5);
    short.push(0.0, "old");
    short.push(1.0, "new");
    assert_eq!(short.len(), 1);
    assert_eq!(short.latest().map(|f| f.data), Some("new"));
}

#[test]
fn test_replay_get_last_is_closed_interval() {
    let mut replay = ReplayBuffer::new(100.0);
    for t in 0..=10 {
        replay.push(t as f64, t);
    }
    let recent: Vec<i32> = replay.get_last(2.0, 10.0).iter().map(|f| f.data).collect();
    assert_eq!(recent, vec![8, 9, 10]);
}

#[test]
fn test_replay_sample_at() {
    let mut replay: ReplayBuffer<u32> = ReplayBuffer::default();
    assert!(replay.sample_at(1.0).is_none());

    replay.push(1.0, 10);
    replay.push(2.0, 20);
    replay.push(3.0, 30);
    assert_eq!(replay.sample_at(2.5).map(|f| f.data), Some(20));
    assert_eq!(replay.sample_at(2.0).map(|f| f.data), Some(20));
    assert_eq!(replay.sample_at(0.0).map(|f| f.data), Some(10));
    assert_eq!(replay.sample_at(99.0).map(|f| f.data), Some(30));
}
