//! Game session and turn controller
//!
//! A session owns every piece of mutable game state and runs three repeating
//! drivers on a virtual clock:
//! - turn: new random targets for the whole swarm (fires immediately)
//! - score: +1 to the running score
//! - frame: one animation tick with collision checks
//!
//! The host either advances the clock from real frame timestamps or, in
//! tests and headless runs, by fixed steps.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::clock::{TimerHandle, Timers};
use super::entity::{Bounds, Enemy, EnemyTarget, Player};
use super::geometry::Axes;
use super::motion::{MotionScheduler, MotionTiming, Reconciliation};
use super::state::GameStats;
use crate::config::{ConfigError, GameOptions};
use crate::consts::NORMALIZED_EXTENT;
use crate::display::Display;

/// The three periodic drivers of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Turn,
    Score,
    Frame,
}

#[derive(Debug, Clone, Copy)]
struct DriverHandles {
    turn: TimerHandle,
    score: TimerHandle,
    frame: TimerHandle,
}

/// Fresh random targets for ids `0..count`, uniform in the normalized space
pub fn generate_targets(rng: &mut impl Rng, count: usize) -> Vec<EnemyTarget> {
    (0..count as u32)
        .map(|id| EnemyTarget {
            id,
            position: Vec2::new(
                rng.random_range(0.0..NORMALIZED_EXTENT),
                rng.random_range(0.0..NORMALIZED_EXTENT),
            ),
        })
        .collect()
}

/// One running game
#[derive(Debug, Clone)]
pub struct GameSession {
    options: GameOptions,
    seed: u64,
    rng: Pcg32,
    player: Player,
    motion: MotionScheduler,
    stats: GameStats,
    timers: Timers<Driver>,
    drivers: Option<DriverHandles>,
    /// Turns generated so far
    turn: u64,
    last_turn: Reconciliation,
}

impl GameSession {
    /// Validate `options` and build a session that has not started yet
    pub fn new(options: GameOptions, seed: u64) -> Result<Self, ConfigError> {
        options.validate()?;

        let bounds = Bounds::from_options(&options);
        let axes = Axes::for_board(options.width, options.height);

        Ok(Self {
            player: Player::new(bounds, options.player_radius),
            motion: MotionScheduler::new(MotionTiming::from_options(&options), axes),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            stats: GameStats::new(),
            timers: Timers::new(),
            drivers: None,
            turn: 0,
            last_turn: Reconciliation::default(),
            options,
        })
    }

    /// Place the player, publish the HUD and start all drivers
    pub fn start(&mut self, display: &mut impl Display) {
        if self.drivers.is_some() {
            log::warn!("Session already running, ignoring start");
            return;
        }

        let center = self.player.bounds().center();
        self.player.move_absolute(center, display);
        self.stats.publish(display);

        let turn = self.timers.every(Driver::Turn, self.options.turn_interval_ms, 0);
        let score = self.timers.every(
            Driver::Score,
            self.options.score_interval_ms,
            self.options.score_interval_ms,
        );
        let frame = self.timers.every(
            Driver::Frame,
            self.options.frame_interval_ms,
            self.options.frame_interval_ms,
        );
        self.drivers = Some(DriverHandles { turn, score, frame });

        log::info!(
            "Session started: {} enemies on a {}x{} board (seed {})",
            self.options.num_enemies,
            self.options.width,
            self.options.height,
            self.seed
        );
    }

    /// Cancel every driver; state is kept as-is
    pub fn stop(&mut self) {
        if let Some(handles) = self.drivers.take() {
            self.timers.cancel(handles.turn);
            self.timers.cancel(handles.score);
            self.timers.cancel(handles.frame);
            log::info!(
                "Session stopped at {} ms after {} turns ({} collisions, best {})",
                self.timers.now(),
                self.turn,
                self.stats.collision_count,
                self.stats.best_score
            );
        }
    }

    pub fn is_running(&self) -> bool {
        self.drivers.is_some()
    }

    /// Advance the clock by `dt_ms`
    pub fn advance(&mut self, dt_ms: u64, display: &mut impl Display) {
        let until = self.timers.now() + dt_ms;
        self.advance_to(until, display);
    }

    /// Run every driver firing due up to and including `until`
    pub fn advance_to(&mut self, until: u64, display: &mut impl Display) {
        while let Some((now, driver)) = self.timers.next_due(until) {
            match driver {
                Driver::Turn => self.run_turn(now, display),
                Driver::Score => self.stats.increase_score(display),
                Driver::Frame => self.run_frame(now, display),
            }
        }
        self.timers.advance_to(until);
    }

    fn run_turn(&mut self, now: u64, display: &mut impl Display) {
        self.turn += 1;
        let targets = generate_targets(&mut self.rng, self.options.num_enemies);
        let report = self.motion.reconcile(&targets, now, display);
        log::debug!(
            "Turn {} at {} ms: {} entered, {} updated, {} exited",
            self.turn,
            now,
            report.entered.len(),
            report.updated.len(),
            report.exited.len()
        );
        self.last_turn = report;
    }

    fn run_frame(&mut self, now: u64, display: &mut impl Display) {
        let hits = self.motion.tick(now, &self.player, display);
        for id in hits {
            log::trace!(
                "Enemy {} hit the player at {} ms (score {})",
                id,
                now,
                self.stats.score
            );
            self.stats.record_collision(display);
        }
    }

    /// Feed a drag delta to the player
    pub fn drag_player(&mut self, dx: f32, dy: f32, display: &mut impl Display) {
        self.player.move_relative(Vec2::new(dx, dy), display);
    }

    /// Put the player at a board position (clamped)
    pub fn place_player(&mut self, x: f32, y: f32, display: &mut impl Display) {
        self.player.move_absolute(Vec2::new(x, y), display);
    }

    /// Change the swarm size; applies from the next turn
    pub fn set_num_enemies(&mut self, num_enemies: usize) -> Result<(), ConfigError> {
        let options = GameOptions {
            num_enemies,
            ..self.options.clone()
        };
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.motion.enemies()
    }

    /// Keyed diff produced by the most recent turn
    pub fn last_turn(&self) -> &Reconciliation {
        &self.last_turn
    }
}
