//! Endless tower-defense loop with no build phase.

use hecs::Entity;

use arena_core::constants::*;
use arena_core::enums::EnemyKind;
use arena_sim::GameSimulation;

use crate::garrison::Garrison;
use crate::wave_scheduler::ring_positions;

#[derive(Debug, Clone, Default)]
pub struct TowerDefense {
    wave_number: u32,
    live: Vec<Entity>,
}

/// Enemy count for a tower-defense wave.
pub fn wave_size(wave_number: u32) -> u32 {
    2 + wave_number
}

impl TowerDefense {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    /// Fire every tower, pay bounties for enemies that died since the last
    /// update, and spawn a new wave once none remain. Returns the new wave
    /// number when one was spawned.
    pub fn update(
        &mut self,
        dt: f64,
        sim: &mut GameSimulation,
        garrison: &mut Garrison,
    ) -> Option<u32> {
        garrison.update(dt, sim);

        let before = self.live.len();
        self.live.retain(|&e| sim.is_alive(e));
        let killed = (before - self.live.len()) as u32;
        if killed > 0 {
            garrison.credits += killed * TD_KILL_BOUNTY;
        }

        if sim.living_enemy_count() > 0 {
            return None;
        }
        self.wave_number += 1;
        let count = wave_size(self.wave_number);
        for (i, position) in ring_positions(count, TD_SPAWN_RADIUS).into_iter().enumerate() {
            let kind = if i % 3 == 2 {
                EnemyKind::Brute
            } else {
                EnemyKind::Raider
            };
            self.live.push(sim.spawn_enemy(kind, position));
        }
        tracing::info!(wave = self.wave_number, enemies = count, "tower defense wave");
        Some(self.wave_number)
    }
}
