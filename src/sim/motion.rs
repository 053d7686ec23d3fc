//! Enemy motion: keyed re-binding, grow phase, move phase
//!
//! Every turn hands the scheduler a fresh target set. Enemies are matched by
//! id: new ids enter at their target with radius 0, known ids keep whatever
//! position and radius they are rendered at and restart their animation, and
//! ids missing from the set are removed. An animation interrupted by a new
//! turn is simply dropped.
//!
//! Each animation has two phases:
//! 1. Grow: radius eases up to the full enemy radius. No collision checks.
//! 2. Move: position eases from where the phase began to the target. Every
//!    frame, collisions are tested on the position as rendered *before* the
//!    frame moves anything.
//!
//! Position and radius are pure functions of elapsed time, so frame rate
//! changes the sampling but never the path.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::colliding;
use super::easing::Easing;
use super::entity::{Enemy, EnemyTarget, Player};
use super::geometry::{Axes, lerp, lerp_f32};
use crate::config::GameOptions;
use crate::display::Display;

/// Where an enemy is in its current animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionPhase {
    /// Radius easing from `from_radius` towards full size
    Grow { started_at: u64, from_radius: f32 },
    /// Position easing from `from` towards the target
    Move { started_at: u64, from: Vec2 },
    /// Reached the target; waits for the next turn
    Settled,
}

/// Phase durations and shape of the animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTiming {
    pub grow_ms: u64,
    pub move_ms: u64,
    /// Full enemy radius reached at the end of the grow phase
    pub radius: f32,
    pub easing: Easing,
}

impl MotionTiming {
    pub fn from_options(options: &GameOptions) -> Self {
        Self {
            grow_ms: options.grow_duration_ms,
            move_ms: options.move_duration_ms,
            radius: options.enemy_radius,
            easing: options.easing,
        }
    }
}

/// Fraction of `duration` covered after `elapsed`, in [0, 1]
#[inline]
fn progress(elapsed: u64, duration: u64) -> f32 {
    if duration == 0 {
        1.0
    } else {
        (elapsed as f64 / duration as f64).min(1.0) as f32
    }
}

/// Outcome of re-binding a target set, ids in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub entered: Vec<u32>,
    pub updated: Vec<u32>,
    pub exited: Vec<u32>,
}

/// Owns the live enemy set and drives its animation
#[derive(Debug, Clone)]
pub struct MotionScheduler {
    /// Sorted by id for deterministic iteration
    enemies: Vec<Enemy>,
    timing: MotionTiming,
    axes: Axes,
}

impl MotionScheduler {
    pub fn new(timing: MotionTiming, axes: Axes) -> Self {
        Self {
            enemies: Vec::new(),
            timing,
            axes,
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn get(&self, id: u32) -> Option<&Enemy> {
        self.enemies
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.enemies[i])
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn timing(&self) -> MotionTiming {
        self.timing
    }

    /// Re-bind the enemy set to `targets` by id, starting a new animation at `now`
    ///
    /// Duplicate ids in `targets` collapse to the last occurrence.
    pub fn reconcile(
        &mut self,
        targets: &[EnemyTarget],
        now: u64,
        display: &mut impl Display,
    ) -> Reconciliation {
        let wanted: BTreeMap<u32, Vec2> = targets.iter().map(|t| (t.id, t.position)).collect();
        let mut report = Reconciliation::default();

        // Exit
        self.enemies.retain(|enemy| {
            if wanted.contains_key(&enemy.id) {
                true
            } else {
                display.remove_enemy(enemy.id);
                report.exited.push(enemy.id);
                false
            }
        });

        // Enter / update
        for (&id, &target) in &wanted {
            match self.enemies.binary_search_by_key(&id, |e| e.id) {
                Ok(i) => {
                    let enemy = &mut self.enemies[i];
                    enemy.target = target;
                    enemy.phase = MotionPhase::Grow {
                        started_at: now,
                        from_radius: enemy.radius,
                    };
                    display.create_or_update_enemy(id, enemy.position, enemy.radius);
                    report.updated.push(id);
                }
                Err(i) => {
                    let position = self.axes.to_board(target);
                    self.enemies.insert(
                        i,
                        Enemy {
                            id,
                            target,
                            position,
                            radius: 0.0,
                            phase: MotionPhase::Grow {
                                started_at: now,
                                from_radius: 0.0,
                            },
                        },
                    );
                    display.create_or_update_enemy(id, position, 0.0);
                    report.entered.push(id);
                }
            }
        }

        report
    }

    /// Advance every animation to `now`
    ///
    /// Returns the ids of moving enemies that overlapped the player at their
    /// pre-frame position, one entry per enemy.
    pub fn tick(&mut self, now: u64, player: &Player, display: &mut impl Display) -> Vec<u32> {
        let timing = self.timing;

        for enemy in &mut self.enemies {
            grow(enemy, now, &timing, display);
        }

        let hits = colliding(player, &self.enemies);

        for enemy in &mut self.enemies {
            if let MotionPhase::Move { started_at, from } = enemy.phase {
                let t = progress(now.saturating_sub(started_at), timing.move_ms);
                let target = self.axes.to_board(enemy.target);
                enemy.position = if t >= 1.0 {
                    target
                } else {
                    lerp(from, target, timing.easing.apply(t))
                };
                display.set_enemy_position(enemy.id, enemy.position);

                if t >= 1.0 {
                    enemy.phase = MotionPhase::Settled;
                }
            }
        }

        hits
    }
}

/// Grow-phase step; hands over to the move phase once the radius is full
fn grow(enemy: &mut Enemy, now: u64, timing: &MotionTiming, display: &mut impl Display) {
    let MotionPhase::Grow {
        started_at,
        from_radius,
    } = enemy.phase
    else {
        return;
    };

    let elapsed = now.saturating_sub(started_at);
    if elapsed < timing.grow_ms {
        let t = timing.easing.apply(progress(elapsed, timing.grow_ms));
        let radius = lerp_f32(from_radius, timing.radius, t);
        if radius != enemy.radius {
            enemy.radius = radius;
            display.set_enemy_radius(enemy.id, radius);
        }
        return;
    }

    if enemy.radius != timing.radius {
        enemy.radius = timing.radius;
        display.set_enemy_radius(enemy.id, enemy.radius);
    }
    // The move phase is timed from the end of the grow phase, not from this frame
    enemy.phase = MotionPhase::Move {
        started_at: started_at + timing.grow_ms,
        from: enemy.position,
    };
}
