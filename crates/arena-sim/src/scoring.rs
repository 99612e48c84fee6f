//! Score, kill streak, multiplier and heat.

use serde::{Deserialize, Serialize};

use arena_core::constants::*;
use arena_core::enums::OnlookerKillRule;
use arena_core::state::ScoreView;

/// Running score state tracked by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    /// Consecutive enemy kills since the player last died.
    pub streak: u32,
    pub multiplier: u32,
    /// Wanted level, raised by onlooker kills.
    pub heat: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            streak: 0,
            multiplier: 1,
            heat: 0,
        }
    }
}

impl ScoreState {
    /// Award an enemy kill at the current multiplier. Returns the points added.
    pub fn award_enemy_kill(&mut self) -> u64 {
        let awarded = ENEMY_KILL_SCORE * u64::from(self.multiplier);
        self.score += awarded;
        self.streak += 1;
        awarded
    }

    /// Add multiplied bonus points (score pickups).
    pub fn add_points(&mut self, points: u64) -> u64 {
        let awarded = points * u64::from(self.multiplier);
        self.score += awarded;
        awarded
    }

    /// Apply the onlooker kill rule. The streak is left untouched.
    pub fn apply_onlooker_kill(&mut self, rule: OnlookerKillRule) {
        match rule {
            OnlookerKillRule::ArcadeBonus => self.score += ONLOOKER_BONUS_SCORE,
            OnlookerKillRule::Penalty => {
                self.score = self.score.saturating_sub(ONLOOKER_PENALTY_SCORE)
            }
        }
        self.heat += 1;
    }

    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    /// `1 + min(4, floor(streak / 3))`.
    pub fn recompute_multiplier(&mut self) {
        self.multiplier = 1 + (self.streak / STREAK_PER_MULTIPLIER).min(MAX_MULTIPLIER_BONUS);
    }

    pub fn view(&self, game_over: bool) -> ScoreView {
        ScoreView {
            score: self.score,
            streak: self.streak,
            multiplier: self.multiplier,
            heat: self.heat,
            game_over,
        }
    }
}
