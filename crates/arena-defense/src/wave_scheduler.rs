//! Scripted build/combat wave loop.

use std::f64::consts::TAU;

use arena_core::constants::*;
use arena_core::enums::{EnemyKind, FriendlyKind, WavePhase};
use arena_core::types::{heading_vector, Vector2};
use arena_sim::GameSimulation;

use crate::error::BuildError;
use crate::friendly::FriendlyId;
use crate::garrison::Garrison;
use crate::tech_tree::TechTree;

/// A single wave definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveEntry {
    /// Enemies to spawn: (kind, count).
    pub groups: Vec<(EnemyKind, u32)>,
}

impl WaveEntry {
    pub fn total(&self) -> u32 {
        self.groups.iter().map(|(_, count)| count).sum()
    }

    /// Repeat used beyond the scripted list: `floor(count * 1.3) + 1`.
    pub fn escalated(&self) -> Self {
        Self {
            groups: self
                .groups
                .iter()
                .map(|&(kind, count)| {
                    let scaled = (f64::from(count) * WAVE_REPEAT_SCALE).floor() as u32;
                    (kind, scaled + 1)
                })
                .collect(),
        }
    }
}

/// `count` points evenly spaced on a ring around the arena centre.
pub fn ring_positions(count: u32, radius: f64) -> Vec<Vector2> {
    (0..count)
        .map(|i| heading_vector(TAU * f64::from(i) / f64::from(count.max(1))) * radius)
        .collect()
}

#[derive(Debug, Clone)]
pub struct WaveScheduler {
    waves: Vec<WaveEntry>,
    phase: WavePhase,
    /// 1-based number of the last started wave; 0 before the first.
    current_wave: u32,
}

impl WaveScheduler {
    pub fn new(waves: Vec<WaveEntry>) -> Self {
        Self {
            waves,
            phase: WavePhase::Build,
            current_wave: 0,
        }
    }

    /// Default 3-wave script with escalating difficulty.
    pub fn default_campaign() -> Self {
        Self::new(vec![
            WaveEntry {
                groups: vec![(EnemyKind::Raider, 3)],
            },
            WaveEntry {
                groups: vec![(EnemyKind::Raider, 3), (EnemyKind::Brute, 1)],
            },
            WaveEntry {
                groups: vec![
                    (EnemyKind::Raider, 2),
                    (EnemyKind::Brute, 2),
                    (EnemyKind::Bomber, 2),
                ],
            },
        ])
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn current_wave(&self) -> u32 {
        self.current_wave
    }

    /// Definition the next `start_next_wave` would spawn. Once the script
    /// is exhausted every wave is the final scripted wave scaled once.
    pub fn next_definition(&self) -> WaveEntry {
        match self.waves.get(self.current_wave as usize) {
            Some(entry) => entry.clone(),
            None => self
                .waves
                .last()
                .map(WaveEntry::escalated)
                .unwrap_or(WaveEntry { groups: Vec::new() }),
        }
    }


    /// Enter combat and spawn the next wave. Returns the wave number, or
    /// `None` if combat is already running.
    pub fn start_next_wave(&mut self, sim: &mut GameSimulation) -> Option<u32> {
        if self.phase == WavePhase::Combat {
            return None;
        }
        let entry = self.next_definition();
        self.current_wave += 1;
        self.phase = WavePhase::Combat;

        let positions = ring_positions(entry.total(), TD_SPAWN_RADIUS);
        let kinds = entry
            .groups
            .iter()
            .flat_map(|&(kind, count)| std::iter::repeat(kind).take(count as usize));
        let mut spawned = 0;
        for (kind, position) in kinds.zip(positions) {
            sim.spawn_enemy(kind, position);
            spawned += 1;
        }

        tracing::info!(wave = self.current_wave, enemies = spawned, "wave started");
        Some(self.current_wave)
    }

    /// Return to build once no enemies are alive, paying out the clear
    /// bonus. Returns true on the tick the wave is cleared.
    pub fn update(&mut self, sim: &GameSimulation, garrison: &mut Garrison) -> bool {
        if self.phase != WavePhase::Combat || sim.living_enemy_count() > 0 {
            return false;
        }
        self.phase = WavePhase::Build;
        let bonus = WAVE_CLEAR_CREDITS + 10 * self.current_wave;
        garrison.credits += bonus;
        garrison.research_points += 1;
        tracing::info!(wave = self.current_wave, bonus, "wave cleared");
        true
    }

    /// Build through the garrison, but only during the build phase.
    pub fn try_build(
        &self,
        garrison: &mut Garrison,
        kind: FriendlyKind,
        position: Vector2,
        tech: &TechTree,
    ) -> Result<FriendlyId, BuildError> {
        if self.phase != WavePhase::Build {
            return Err(BuildError::WrongPhase);
        }
        garrison.try_build(kind, position, tech)
    }
}
