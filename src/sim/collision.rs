//! Player/enemy collision detection
//!
//! Only enemies in their move phase are tested, against the position they
//! are rendered at right now. There is no debounce: an enemy resting on the
//! player reports a hit on every animation tick.

use glam::Vec2;

use super::entity::{Enemy, Player};
use super::geometry::overlaps;
use super::motion::MotionPhase;

/// Whether an enemy rendered at `enemy_position` touches the player
#[inline]
pub fn detect(player: &Player, enemy_position: Vec2, enemy_radius: f32) -> bool {
    overlaps(player.position(), player.radius, enemy_position, enemy_radius)
}

/// Ids of every moving enemy overlapping the player, in iteration order
pub fn colliding(player: &Player, enemies: &[Enemy]) -> Vec<u32> {
    enemies
        .iter()
        .filter(|e| matches!(e.phase, MotionPhase::Move { .. }))
        .filter(|e| detect(player, e.position, e.radius))
        .map(|e| e.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameOptions;
    use crate::sim::entity::Bounds;

    fn player_at_center() -> Player {
        // Default board centre is (350, 225)
        Player::new(Bounds::from_options(&GameOptions::default()), 5.0)
    }

    fn enemy(id: u32, position: Vec2, radius: f32, phase: MotionPhase) -> Enemy {
        Enemy {
            id,
            target: Vec2::ZERO,
            position,
            radius,
            phase,
        }
    }

    #[test]
    fn test_detect_scenarios() {
        let player = player_at_center();
        assert!(detect(&player, Vec2::new(352.0, 226.0), 20.0));
        assert!(!detect(&player, Vec2::new(400.0, 225.0), 20.0));
        // Exactly touching (distance 25 == 5 + 20)
        assert!(!detect(&player, Vec2::new(375.0, 225.0), 20.0));
    }

    #[test]
    fn test_colliding_skips_growing_and_settled() {
        let player = player_at_center();
        let on_player = Vec2::new(351.0, 225.0);
        let moving = MotionPhase::Move {
            started_at: 0,
            from: on_player,
        };
        let enemies = vec![
            enemy(0, on_player, 10.0, MotionPhase::Grow { started_at: 0, from_radius: 0.0 }),
            enemy(1, on_player, 10.0, moving),
            enemy(2, Vec2::new(10.0, 10.0), 10.0, moving),
            enemy(3, on_player, 10.0, MotionPhase::Settled),
            enemy(4, Vec2::new(356.0, 230.0), 10.0, moving),
        ];

        assert_eq!(colliding(&player, &enemies), vec![1, 4]);
    }
}
