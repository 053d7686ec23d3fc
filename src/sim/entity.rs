//! Player and enemy entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::MotionPhase;
use crate::config::GameOptions;
use crate::display::Display;

/// The padded rectangle the player is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn from_options(options: &GameOptions) -> Self {
        Self {
            min: Vec2::splat(options.padding),
            max: Vec2::new(
                options.width - options.padding,
                options.height - options.padding,
            ),
        }
    }

    /// Clamp each axis independently; values on a bound stay on it
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// The dragged player shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    position: Vec2,
    /// Facing angle in degrees
    angle: f32,
    pub radius: f32,
    bounds: Bounds,
}

impl Player {
    /// Create a player centred on the board
    pub fn new(bounds: Bounds, radius: f32) -> Self {
        Self {
            position: bounds.center(),
            angle: 0.0,
            radius,
            bounds,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Apply a drag delta, face along it and push the new transform
    pub fn move_relative(&mut self, delta: Vec2, display: &mut impl Display) {
        // atan2(0, 0) has no meaningful heading, keep the old one
        if delta != Vec2::ZERO {
            self.angle = delta.y.atan2(delta.x).to_degrees();
        }
        self.position = self.bounds.clamp(self.position + delta);
        display.set_player_transform(self.position, self.angle);
    }

    /// Place the player directly, keeping its heading
    pub fn move_absolute(&mut self, point: Vec2, display: &mut impl Display) {
        self.position = self.bounds.clamp(point);
        display.set_player_transform(self.position, self.angle);
    }
}

/// One entry of a turn's freshly generated target set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTarget {
    pub id: u32,
    /// Normalized coordinates in [0, 100)²
    pub position: Vec2,
}

/// An enemy circle
///
/// `position` and `radius` are what is currently rendered; `target` is where
/// the current move phase is heading in normalized space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub target: Vec2,
    pub position: Vec2,
    pub radius: f32,
    pub phase: MotionPhase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayCommand, RecordingDisplay};
    use proptest::prelude::*;

    fn test_bounds() -> Bounds {
        Bounds::from_options(&GameOptions::default())
    }

    #[test]
    fn test_player_starts_centered() {
        let player = Player::new(test_bounds(), 5.0);
        assert_eq!(player.position(), Vec2::new(350.0, 225.0));
        assert_eq!(player.angle(), 0.0);
    }

    #[test]
    fn test_move_relative_rotates_and_notifies() {
        let mut display = RecordingDisplay::new();
        let mut player = Player::new(test_bounds(), 5.0);

        player.move_relative(Vec2::new(0.0, 10.0), &mut display);
        assert_eq!(player.position(), Vec2::new(350.0, 235.0));
        assert!((player.angle() - 90.0).abs() < 1e-4);

        player.move_relative(Vec2::new(-3.0, 0.0), &mut display);
        assert!((player.angle() - 180.0).abs() < 1e-4);

        assert_eq!(
            display.commands.last(),
            Some(&DisplayCommand::SetPlayerTransform {
                position: Vec2::new(347.0, 235.0),
                angle: player.angle(),
            })
        );
        assert_eq!(display.commands.len(), 2);
    }

    #[test]
    fn test_zero_delta_keeps_heading() {
        let mut display = RecordingDisplay::new();
        let mut player = Player::new(test_bounds(), 5.0);
        player.move_relative(Vec2::new(1.0, 1.0), &mut display);
        player.move_relative(Vec2::ZERO, &mut display);
        assert!((player.angle() - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamps_to_exact_bounds() {
        let mut display = RecordingDisplay::new();
        let mut player = Player::new(test_bounds(), 5.0);

        player.move_absolute(Vec2::new(20.0, 430.0), &mut display);
        assert_eq!(player.position(), Vec2::new(20.0, 430.0));

        player.move_relative(Vec2::new(-1000.0, 1000.0), &mut display);
        assert_eq!(player.position(), Vec2::new(20.0, 430.0));

        player.move_absolute(Vec2::new(9999.0, -5.0), &mut display);
        assert_eq!(player.position(), Vec2::new(680.0, 20.0));
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            deltas in proptest::collection::vec((-2000.0f32..2000.0, -2000.0f32..2000.0), 1..50)
        ) {
            let mut display = RecordingDisplay::new();
            let bounds = test_bounds();
            let mut player = Player::new(bounds, 5.0);
            for (dx, dy) in deltas {
                player.move_relative(Vec2::new(dx, dy), &mut display);
                let p = player.position();
                prop_assert!(p.x >= 20.0 && p.x <= 680.0, "x out of bounds: {}", p.x);
                prop_assert!(p.y >= 20.0 && p.y <= 430.0, "y out of bounds: {}", p.y);
                prop_assert!(bounds.contains(p));
            }
        }
    }
}
