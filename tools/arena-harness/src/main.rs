//! Headless driver for the arena simulation.
//!
//! Builds a seeded `GameSimulation`, feeds it whole fixed ticks, runs one of
//! the game modes on top, and prints the final snapshot as JSON.

use std::f64::consts::TAU;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use arena_core::config::SimConfig;
use arena_core::constants::*;
use arena_core::enums::{FriendlyKind, WavePhase};
use arena_core::input::DriveInput;
use arena_core::types::{heading_vector, Vector2};
use arena_defense::tower_defense::TowerDefense;
use arena_defense::wave_scheduler::WaveScheduler;
use arena_defense::{Garrison, TechTree};
use arena_sim::car::Car;
use arena_sim::systems::enemy_ai::steer_toward;
use arena_sim::GameSimulation;
use arena_tracking::{LockParams, RaceTracker, ReplayBuffer, TargetingSystem};

/// Player weapon slot used for locked-on shots.
const HOMING_SLOT: usize = 2;

/// Counter-clockwise box around the start; the finish line sits on the
/// origin, crossed heading east.
const RACE_COURSE: [Vector2; 4] = [
    Vector2::new(40.0, 0.0),
    Vector2::new(40.0, 40.0),
    Vector2::new(-40.0, 40.0),
    Vector2::new(-40.0, 0.0),
];
const RACE_FINISH_APPROACH: Vector2 = Vector2::new(10.0, 0.0);
const RACE_CHECKPOINT_RADIUS: f64 = 10.0;
const RACE_LAPS: u32 = 3;

const LOCK: LockParams = LockParams {
    range: MISSILE_ENGAGE_RANGE,
    cone: 0.6,
    lock_time: 0.75,
};

#[derive(Parser, Debug)]
#[command(name = "arena-harness")]
#[command(about = "Run the arena combat simulation headless and print the final snapshot")]
struct Cli {
    /// RNG seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,
    /// Number of fixed ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    #[arg(long, value_enum, default_value_t = Mode::Arena)]
    mode: Mode,
    /// JSON file with `SimConfig` overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pretty-print the snapshot
    #[arg(long)]
    pretty: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Free-for-all with periodic spawns
    Arena,
    /// Scripted build/combat waves
    Waves,
    /// Endless tower defense
    TowerDefense,
    /// Lap the checkpoint course
    Race,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SimConfig::from_json_str(&json).map_err(|err| {
                tracing::warn!(%err, path = %path.display(), "rejected config");
                err
            })?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if matches!(cli.mode, Mode::Waves | Mode::TowerDefense | Mode::Race) {
        config.auto_spawn_enemies = false;
    }
    Ok(config)
}

/// Per-mode state layered on top of the simulation.
enum Driver {
    Arena,
    Waves {
        scheduler: WaveScheduler,
        garrison: Garrison,
        tech: TechTree,
    },
    TowerDefense {
        td: TowerDefense,
        garrison: Garrison,
    },
    Race {
        tracker: RaceTracker,
    },
}

impl Driver {
    fn new(mode: Mode) -> Self {
        match mode {
            Mode::Arena => Driver::Arena,
            Mode::Waves => Driver::Waves {
                scheduler: WaveScheduler::default_campaign(),
                garrison: Garrison::default(),
                tech: TechTree::default(),
            },
            Mode::TowerDefense => {
                let mut garrison = Garrison::default();
                let tech = TechTree::default();
                for position in ring(3, 20.0) {
                    if let Err(err) = garrison.try_build(FriendlyKind::Turret, position, &tech) {
                        tracing::warn!(%err, "initial turret rejected");
                    }
                }
                Driver::TowerDefense {
                    td: TowerDefense::new(),
                    garrison,
                }
            }
            Mode::Race => Driver::Race {
                tracker: RaceTracker::new(
                    RACE_COURSE.to_vec(),
                    RACE_CHECKPOINT_RADIUS,
                    (Vector2::new(0.0, -6.0), Vector2::new(0.0, 6.0)),
                    RACE_LAPS,
                ),
            },
        }
    }

    /// Run the mode's layer after a simulation tick.
    fn step(&mut self, sim: &mut GameSimulation) {
        let now = sim.sim_time().elapsed_secs;
        match self {
            Driver::Arena => {}
            Driver::Waves {
                scheduler,
                garrison,
                tech,
            } => {
                if scheduler.phase() == WavePhase::Build {
                    spend_build_phase(scheduler, garrison, tech);
                    scheduler.start_next_wave(sim);
                }
                garrison.update(DT, sim);
                scheduler.update(sim, garrison);
            }
            Driver::TowerDefense { td, garrison } => {
                td.update(DT, sim, garrison);
            }
            Driver::Race { tracker } => {
                if let Some(position) = sim.player_position() {
                    if let Some(event) = tracker.update(position, now) {
                        tracing::debug!(?event, "race");
                    }
                }
            }
        }
    }

    /// Where a race pilot should head next, outside race mode `None`.
    fn race_waypoint(&self) -> Option<Vector2> {
        let Driver::Race { tracker } = self else {
            return None;
        };
        Some(
            tracker
                .checkpoints()
                .get(tracker.next_checkpoint)
                .copied()
                .unwrap_or(RACE_FINISH_APPROACH),
        )
    }

    fn finished(&self) -> bool {
        matches!(self, Driver::Race { tracker } if tracker.finished)
    }
}

/// Research whatever is affordable, then ring the base with turrets.
fn spend_build_phase(scheduler: &WaveScheduler, garrison: &mut Garrison, tech: &mut TechTree) {
    let ids: Vec<String> = tech.techs().iter().map(|t| t.id.clone()).collect();
    for id in ids {
        if tech.can_unlock(&id, garrison.research_points) {
            if let Err(err) = tech.unlock(&id, &mut garrison.research_points) {
                tracing::warn!(%err, "research failed");
            }
        }
    }
    garrison.apply_research(tech);

    let slot = garrison.friendlies().len();
    let radius = 15.0 + 10.0 * (slot / 4) as f64;
    let position = heading_vector(TAU * slot as f64 / 4.0 + 0.3) * radius;
    let kind = if tech.is_unlocked("heavy_ordnance") && slot % 2 == 1 {
        FriendlyKind::Cannon
    } else {
        FriendlyKind::Turret
    };
    match scheduler.try_build(garrison, kind, position, tech) {
        Ok(id) => tracing::debug!(id, ?kind, "built"),
        Err(err) => tracing::debug!(%err, "build skipped"),
    }
}

fn ring(count: u32, radius: f64) -> Vec<Vector2> {
    (0..count)
        .map(|i| heading_vector(TAU * f64::from(i) / f64::from(count)) * radius)
        .collect()
}

/// Chase the current target and fire a homing missile once locked.
fn pilot(sim: &mut GameSimulation, targeting: &mut TargetingSystem, tick: u64, driver: &Driver) {
    let Some(car) = sim.world().get::<&Car>(sim.player()).ok().map(|c| *c) else {
        return;
    };

    if let Some(waypoint) = driver.race_waypoint() {
        sim.set_player_input(steer_toward(&car, waypoint, 0.0));
        return;
    }

    if tick % 30 == 0 || targeting.get_target().is_none() {
        // Onlookers are fair game for the player but cost heat; skip them.
        let mut candidates = TargetingSystem::candidates(sim.world(), sim.player(), LOCK.range);
        candidates.retain(|e| sim.enemies().contains(e));
        if targeting.get_target().is_none() || tick % 120 == 0 {
            targeting.cycle_targets(&candidates);
        }
    }
    targeting.update_lock(DT, sim.world(), car.position, car.heading, &LOCK);

    let input = targeting
        .get_target()
        .and_then(|t| sim.world().get::<&Car>(t).ok().map(|c| c.position))
        .map(|p| steer_toward(&car, p, 15.0))
        .unwrap_or(DriveInput::IDLE);
    sim.set_player_input(input);

    if targeting.is_locked() && sim.fire_player_weapon(HOMING_SLOT, targeting.get_target()) {
        tracing::debug!(tick, "homing missile away");
        targeting.clear();
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    tracing::info!(seed = config.seed, mode = ?cli.mode, ticks = cli.ticks, "starting");

    let mut sim = GameSimulation::new(config);
    let mut driver = Driver::new(cli.mode);
    let mut targeting = TargetingSystem::new();
    let mut replay: ReplayBuffer<Vector2> = ReplayBuffer::default();
    let mut events = 0usize;

    for tick in 0..cli.ticks {
        pilot(&mut sim, &mut targeting, tick, &driver);
        sim.update(DT);
        driver.step(&mut sim);

        if let Some(position) = sim.player_position() {
            replay.push(sim.sim_time().elapsed_secs, position);
        }
        events += sim.drain_events().len();

        if tick % (u64::from(TICK_RATE) * 10) == 0 {
            tracing::info!(
                tick,
                score = sim.score(),
                multiplier = sim.multiplier(),
                heat = sim.heat(),
                enemies = sim.living_enemy_count(),
                "progress"
            );
        }
        if sim.game_over() {
            tracing::info!(tick, "player destroyed");
            break;
        }
        if driver.finished() {
            break;
        }
    }

    if let Some(frame) = replay.sample_at(sim.sim_time().elapsed_secs - 2.0) {
        tracing::info!(time = frame.time, x = frame.data.x, y = frame.data.y, "kill-cam start");
    }
    tracing::info!(
        score = sim.score(),
        streak = sim.streak(),
        events,
        game_over = sim.game_over(),
        "finished"
    );

    let snapshot = sim.snapshot();
    let json = if cli.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    run(Cli::parse())
}
