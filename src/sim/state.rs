//! Session statistics and the cosmetic display mode

use serde::{Deserialize, Serialize};

use crate::display::Display;

/// Cosmetic board mode, flipped by collision parity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualMode {
    #[default]
    Normal,
    Alternate,
}

impl VisualMode {
    /// Mode for a given collision count: odd counts show the alternate look
    pub fn for_collisions(collision_count: u64) -> Self {
        if collision_count % 2 == 1 {
            VisualMode::Alternate
        } else {
            VisualMode::Normal
        }
    }
}

/// Score counters for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Ticks survived since the last collision
    pub score: u64,
    /// Highest score reached before a collision
    pub best_score: u64,
    pub collision_count: u64,
    pub visual_mode: VisualMode,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// One score driver tick
    pub fn increase_score(&mut self, display: &mut impl Display) {
        self.score += 1;
        display.update_score_text(self.score);
    }

    /// Collision side effects: bank the best score, reset, count
    pub fn record_collision(&mut self, display: &mut impl Display) {
        self.best_score = self.best_score.max(self.score);
        display.update_best_score_text(self.best_score);

        self.score = 0;
        display.update_score_text(self.score);

        self.collision_count += 1;
        display.update_collision_text(self.collision_count);

        self.visual_mode = VisualMode::for_collisions(self.collision_count);
        display.toggle_visual_mode(self.visual_mode);
    }

    /// Push every counter to the HUD
    pub fn publish(&self, display: &mut impl Display) {
        display.update_score_text(self.score);
        display.update_best_score_text(self.best_score);
        display.update_collision_text(self.collision_count);
    }
}
