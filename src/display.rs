//! Rendering collaborator interface
//!
//! The simulation never touches the DOM. It pushes every visible change
//! through [`Display`], keyed by enemy id, and the host renders it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::VisualMode;

/// Side effects the simulation requests from the host
pub trait Display {
    /// Keyed upsert of an enemy circle
    fn create_or_update_enemy(&mut self, id: u32, position: Vec2, radius: f32);
    /// Remove an enemy whose id vanished from the latest turn
    fn remove_enemy(&mut self, id: u32);
    fn set_enemy_position(&mut self, id: u32, position: Vec2);
    fn set_enemy_radius(&mut self, id: u32, radius: f32);
    fn set_player_transform(&mut self, position: Vec2, angle_degrees: f32);
    fn update_score_text(&mut self, value: u64);
    fn update_best_score_text(&mut self, value: u64);
    fn update_collision_text(&mut self, value: u64);
    fn toggle_visual_mode(&mut self, mode: VisualMode);
}

/// One recorded [`Display`] call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DisplayCommand {
    CreateOrUpdateEnemy { id: u32, position: Vec2, radius: f32 },
    RemoveEnemy { id: u32 },
    SetEnemyPosition { id: u32, position: Vec2 },
    SetEnemyRadius { id: u32, radius: f32 },
    SetPlayerTransform { position: Vec2, angle: f32 },
    UpdateScoreText { value: u64 },
    UpdateBestScoreText { value: u64 },
    UpdateCollisionText { value: u64 },
    ToggleVisualMode { mode: VisualMode },
}

/// A display that records every call, for tests and headless runs
#[derive(Debug, Clone)]
pub struct RecordingDisplay {
    pub commands: Vec<DisplayCommand>,
    /// When false, per-frame enemy position/radius updates are dropped
    pub record_frames: bool,
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            record_frames: true,
        }
    }

    /// Recorder that keeps only structural and HUD commands
    pub fn without_frames() -> Self {
        Self {
            commands: Vec::new(),
            record_frames: false,
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Drain and return everything recorded so far
    pub fn take(&mut self) -> Vec<DisplayCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, pred: impl Fn(&DisplayCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// Last score value pushed to the HUD
    pub fn last_score_text(&self) -> Option<u64> {
        self.commands.iter().rev().find_map(|c| match c {
            DisplayCommand::UpdateScoreText { value } => Some(*value),
            _ => None,
        })
    }
}

impl Display for RecordingDisplay {
    fn create_or_update_enemy(&mut self, id: u32, position: Vec2, radius: f32) {
        self.commands
            .push(DisplayCommand::CreateOrUpdateEnemy { id, position, radius });
    }

    fn remove_enemy(&mut self, id: u32) {
        self.commands.push(DisplayCommand::RemoveEnemy { id });
    }

    fn set_enemy_position(&mut self, id: u32, position: Vec2) {
        if self.record_frames {
            self.commands
                .push(DisplayCommand::SetEnemyPosition { id, position });
        }
    }

    fn set_enemy_radius(&mut self, id: u32, radius: f32) {
        if self.record_frames {
            self.commands.push(DisplayCommand::SetEnemyRadius { id, radius });
        }
    }

    fn set_player_transform(&mut self, position: Vec2, angle_degrees: f32) {
        self.commands.push(DisplayCommand::SetPlayerTransform {
            position,
            angle: angle_degrees,
        });
    }

    fn update_score_text(&mut self, value: u64) {
        self.commands.push(DisplayCommand::UpdateScoreText { value });
    }

    fn update_best_score_text(&mut self, value: u64) {
        self.commands
            .push(DisplayCommand::UpdateBestScoreText { value });
    }

    fn update_collision_text(&mut self, value: u64) {
        self.commands
            .push(DisplayCommand::UpdateCollisionText { value });
    }

    fn toggle_visual_mode(&mut self, mode: VisualMode) {
        self.commands.push(DisplayCommand::ToggleVisualMode { mode });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_frames_drops_per_tick_updates() {
        let mut display = RecordingDisplay::without_frames();
        display.set_enemy_position(1, Vec2::ONE);
        display.set_enemy_radius(1, 4.0);
        display.remove_enemy(1);
        assert_eq!(display.commands, vec![DisplayCommand::RemoveEnemy { id: 1 }]);
    }

    #[test]
    fn test_commands_serialize_tagged() {
        let json = serde_json::to_string(&DisplayCommand::UpdateScoreText { value: 7 })
            .expect("serializable");
        assert_eq!(json, r#"{"op":"update_score_text","value":7}"#);
    }
}
