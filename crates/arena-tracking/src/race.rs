//! Ordered checkpoints and finish-line lap counting.

use serde::{Deserialize, Serialize};

use arena_core::types::{segments_intersect, Vector2};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    CheckpointReached { index: usize },
    LapCompleted { lap: u32, lap_time: f64 },
    Finished { laps: u32, lap_time: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceTracker {
    checkpoints: Vec<Vector2>,
    checkpoint_radius: f64,
    finish_line: (Vector2, Vector2),
    laps_to_finish: u32,
    /// Index of the next checkpoint to visit.
    pub next_checkpoint: usize,
    pub lap: u32,
    /// Terminal; once set, updates are no-ops.
    pub finished: bool,
    last_position: Option<Vector2>,
    lap_started_at: f64,
    lap_times: Vec<f64>,
}

impl RaceTracker {
    pub fn new(
        checkpoints: Vec<Vector2>,
        checkpoint_radius: f64,
        finish_line: (Vector2, Vector2),
        laps_to_finish: u32,
    ) -> Self {
        Self {
            checkpoints,
            checkpoint_radius,
            finish_line,
            laps_to_finish,
            next_checkpoint: 0,
            lap: 0,
            finished: false,
            last_position: None,
            lap_started_at: 0.0,
            lap_times: Vec::new(),
        }
    }

    pub fn checkpoints(&self) -> &[Vector2] {
        &self.checkpoints
    }

    pub fn lap_times(&self) -> &[f64] {
        &self.lap_times
    }

    pub fn best_lap(&self) -> Option<f64> {
        self.lap_times.iter().copied().min_by(f64::total_cmp)
    }

    /// Feed the racer's position at `now`. The first call only records the
    /// start position and lap start time.
    pub fn update(&mut self, position: Vector2, now: f64) -> Option<RaceEvent> {
        if self.finished {
            return None;
        }
        let Some(previous) = self.last_position.replace(position) else {
            self.lap_started_at = now;
            return None;
        };

        let mut event = None;
        if let Some(&next) = self.checkpoints.get(self.next_checkpoint) {
            let r = self.checkpoint_radius;
            if position.distance_squared(next) <= r * r {
                event = Some(RaceEvent::CheckpointReached {
                    index: self.next_checkpoint,
                });
                self.next_checkpoint += 1;
            }
        }

        let all_visited = self.next_checkpoint >= self.checkpoints.len();
        let (a, b) = self.finish_line;
        if all_visited && segments_intersect(previous, position, a, b) {
            return Some(self.complete_lap(now));
        }
        event
    }

    fn complete_lap(&mut self, now: f64) -> RaceEvent {
        self.lap += 1;
        self.next_checkpoint = 0;
        let lap_time = now - self.lap_started_at;
        self.lap_started_at = now;
        self.lap_times.push(lap_time);

        if self.lap >= self.laps_to_finish {
            self.finished = true;
            tracing::info!(laps = self.lap, lap_time, "race finished");
            RaceEvent::Finished {
                laps: self.lap,
                lap_time,
            }
        } else {
            tracing::info!(lap = self.lap, lap_time, "lap completed");
            RaceEvent::LapCompleted {
                lap: self.lap,
                lap_time,
            }
        }
    }
}
