//! Game options and startup validation
//!
//! Options can be built in code or loaded from JSON. Every field has a
//! default, so a config file only needs the keys it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Easing;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("num_enemies must be at least 1")]
    NoEnemies,

    #[error("board {dimension} of {size} leaves no room inside a padding of {padding}")]
    BoardTooSmall {
        dimension: &'static str,
        size: f32,
        padding: f32,
    },

    #[error("padding must be a finite, non-negative number (got {0})")]
    InvalidPadding(f32),

    #[error("{name} must be a finite, positive number (got {value})")]
    InvalidRadius { name: &'static str, value: f32 },

    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recognized game options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Board width in pixels
    pub width: f32,
    /// Board height in pixels
    pub height: f32,
    /// Enemies generated per turn
    pub num_enemies: usize,
    /// Player clamp margin
    pub padding: f32,

    pub player_radius: f32,
    pub enemy_radius: f32,

    // === Drivers ===
    pub turn_interval_ms: u64,
    pub score_interval_ms: u64,
    pub frame_interval_ms: u64,

    // === Enemy animation ===
    pub grow_duration_ms: u64,
    pub move_duration_ms: u64,
    /// Time curve applied to both animation phases
    pub easing: Easing,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            num_enemies: NUM_ENEMIES,
            padding: BOARD_PADDING,

            player_radius: PLAYER_RADIUS,
            enemy_radius: ENEMY_RADIUS,

            turn_interval_ms: TURN_INTERVAL_MS,
            score_interval_ms: SCORE_INTERVAL_MS,
            frame_interval_ms: FRAME_INTERVAL_MS,

            grow_duration_ms: GROW_DURATION_MS,
            move_duration_ms: MOVE_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

impl GameOptions {
    /// Parse options from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json(&json)?;
        log::info!("Loaded game options from {}", path.display());
        Ok(options)
    }

    /// Check every option against the constraints the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_enemies == 0 {
            return Err(ConfigError::NoEnemies);
        }

        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ConfigError::InvalidPadding(self.padding));
        }

        for (dimension, size) in [("width", self.width), ("height", self.height)] {
            // NaN fails this comparison too
            if !(size > 2.0 * self.padding) || !size.is_finite() {
                return Err(ConfigError::BoardTooSmall {
                    dimension,
                    size,
                    padding: self.padding,
                });
            }
        }

        for (name, value) in [
            ("player_radius", self.player_radius),
            ("enemy_radius", self.enemy_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidRadius { name, value });
            }
        }

        for (name, value) in [
            ("turn_interval_ms", self.turn_interval_ms),
            ("score_interval_ms", self.score_interval_ms),
            ("frame_interval_ms", self.frame_interval_ms),
            ("grow_duration_ms", self.grow_duration_ms),
            ("move_duration_ms", self.move_duration_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroInterval { name });
            }
        }

        Ok(())
    }
}
