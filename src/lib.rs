//! Watchout - drag the player around the board, dodge the swarm
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, motion, collisions, game session)
//! - `display`: Rendering collaborator interface and an in-memory recorder
//! - `config`: Game options with validation

pub mod config;
pub mod display;
pub mod sim;

pub use config::{ConfigError, GameOptions};
pub use display::{Display, DisplayCommand, RecordingDisplay};
pub use sim::{GameSession, GameStats, VisualMode};

/// Game configuration defaults
pub mod consts {
    /// Board dimensions (pixels)
    pub const BOARD_WIDTH: f32 = 700.0;
    pub const BOARD_HEIGHT: f32 = 450.0;
    /// Player clamp margin from each board edge
    pub const BOARD_PADDING: f32 = 20.0;

    /// Enemies spawned per turn
    pub const NUM_ENEMIES: usize = 30;

    /// Collision radius of the player shape
    pub const PLAYER_RADIUS: f32 = 5.0;
    /// Fully grown enemy radius
    pub const ENEMY_RADIUS: f32 = 10.0;

    /// Upper bound of the normalized enemy coordinate space
    pub const NORMALIZED_EXTENT: f32 = 100.0;

    /// Driver intervals (milliseconds)
    pub const TURN_INTERVAL_MS: u64 = 2000;
    pub const SCORE_INTERVAL_MS: u64 = 50;
    /// ~60 Hz, matches a typical requestAnimationFrame cadence
    pub const FRAME_INTERVAL_MS: u64 = 16;

    /// Enemy animation phases (milliseconds)
    pub const GROW_DURATION_MS: u64 = 500;
    pub const MOVE_DURATION_MS: u64 = 2000;
}
