//! Collision detection and damage
//!
//! Everything collides in screen space with axis-aligned boxes, but only
//! within a lane: a car in lane 0 never touches a runner in lane 1 even if
//! their boxes overlap on screen (e.g. mid-jump).

use glam::Vec2;

use super::antagonist::ROAR_PLAYER_HIT;
use super::obstacle::Obstacle;
use super::player::Player;
use super::state::{GameEvent, GameState};
use crate::consts::HURTBOX_INSET;
use crate::tuning::Tuning;

/// Axis-aligned box (min = top-left, max = bottom-right)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Player hurtbox: inset horizontally, shortened from the top while ducking
pub fn player_hurtbox(player: &Player, tuning: &Tuning) -> Aabb {
    Aabb::from_rect(
        tuning.player_x() + HURTBOX_INSET,
        player.top(tuning),
        tuning.player_width - 2.0 * HURTBOX_INSET,
        player.height(tuning),
    )
}

/// Obstacle box, resting on its lane floor
pub fn obstacle_box(obstacle: &Obstacle, tuning: &Tuning) -> Aabb {
    Aabb::from_rect(
        obstacle.x,
        obstacle.top(tuning),
        obstacle.kind.width(),
        obstacle.kind.height(),
    )
}

/// Same lane and overlapping boxes
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    player.lane == obstacle.lane
        && player_hurtbox(player, tuning).overlaps(&obstacle_box(obstacle, tuning))
}

/// Apply one unit of damage. Ignored while invincible.
///
/// Returns true if the hit ended the run.
pub fn apply_damage(state: &mut GameState) -> bool {
    if state.player.invincible {
        return false;
    }
    state.lives = state.lives.saturating_sub(1);
    state.player.start_invincibility(&state.tuning);
    state.kong.roar_at_least(ROAR_PLAYER_HIT);
    state.events.push(GameEvent::PlayerHit {
        lives_left: state.lives,
    });
    log::debug!("Player hit, {} lives left", state.lives);

    if state.lives == 0 {
        state.end_run();
        return true;
    }
    false
}

/// Check every obstacle in the player's lane. Returns true if the run ended.
///
/// The first hit opens an invincibility window, which masks the rest.
pub fn resolve_obstacles(state: &mut GameState) -> bool {
    let hit = state
        .obstacles
        .in_lane(state.player.lane)
        .filter(|o| !o.cleared)
        .any(|o| player_hits_obstacle(&state.player, o, &state.tuning));

    if hit && !state.player.invincible {
        return apply_damage(state);
    }
    false
}
