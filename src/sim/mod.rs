//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (milliseconds, advanced by the host)
//! - Seeded RNG only
//! - Stable iteration order (by enemy ID)
//! - No rendering or platform dependencies; side effects go through `Display`

pub mod clock;
pub mod collision;
pub mod easing;
pub mod entity;
pub mod geometry;
pub mod motion;
pub mod session;
pub mod state;

pub use clock::{TimerHandle, Timers};
pub use collision::{colliding, detect};
pub use easing::Easing;
pub use entity::{Bounds, Enemy, EnemyTarget, Player};
pub use geometry::{Axes, LinearScale, distance, lerp, overlaps};
pub use motion::{MotionPhase, MotionScheduler, MotionTiming, Reconciliation};
pub use session::{Driver, GameSession, generate_targets};
pub use state::{GameStats, VisualMode};
