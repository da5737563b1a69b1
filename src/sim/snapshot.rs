//! Draw-state records for the presentation layer
//!
//! The renderer never reads `GameState` directly: after each tick the host
//! builds a `FrameSnapshot` and hands it over (as a struct or as JSON).

use glam::Vec2;
use serde::Serialize;

use super::antagonist::AttackPhase;
use super::arc::kong_rest_position;
use super::obstacle::ObstacleKind;
use super::state::{GamePhase, GameState};
use crate::consts::BLINK_PERIOD_MS;

/// Player pose
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPose {
    pub lane: u8,
    pub x: f32,
    pub y: f32,
    pub ducking: bool,
    pub invincible: bool,
    /// Inside a window opened by damage (hurt tint)
    pub hurt: bool,
    /// False on the "off" half of the invincibility blink
    pub visible: bool,
    pub run_frame: u8,
}

/// One obstacle to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleSprite {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: u8,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Kong's pose and attack state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KongPose {
    pub phase: AttackPhase,
    /// Airborne or landing (angry glow)
    pub attacking: bool,
    /// Lane under threat (warning through recovery)
    pub target_lane: Option<u8>,
    /// Leap progress 0..=1 (executing/recovery)
    pub leap_progress: Option<f32>,
    /// Where the leaping silhouette is drawn
    pub leap_point: Option<Vec2>,
    /// Resting body position with the idle bob applied
    pub body: Vec2,
    pub roar: f32,
    pub arm_swing: f32,
    /// Chest-beat ripple (0..1 loop)
    pub chest_ripple: f32,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    pub lives: u8,
    pub speed: f32,
    pub player: PlayerPose,
    pub obstacles: Vec<ObstacleSprite>,
    pub kong: KongPose,
}

impl FrameSnapshot {
    /// Capture the current state
    pub fn capture(state: &GameState) -> Self {
        let tuning = &state.tuning;
        let t = state.time_ms;

        let player = &state.player;
        let blink_off = player.invincible && ((t / BLINK_PERIOD_MS).floor() as u64) % 2 == 0;

        let obstacles = state
            .obstacles
            .obstacles
            .iter()
            .map(|o| ObstacleSprite {
                id: o.id,
                kind: o.kind,
                lane: o.lane,
                x: o.x,
                y: o.top(tuning),
                width: o.kind.width(),
                height: o.kind.height(),
            })
            .collect();

        let kong = &state.kong;
        let leap_progress = kong.leap_progress(tuning);
        let leap_point = match (kong.leap, leap_progress) {
            (Some(arc), Some(progress)) => Some(arc.point_at(progress)),
            _ => None,
        };
        let bob = ((t / 450.0).sin() * 5.0) as f32;

        Self {
            phase: state.phase,
            score: state.display_score(),
            best_score: state.best_score.max(state.display_score()),
            lives: state.lives,
            speed: state.speed,
            player: PlayerPose {
                lane: player.lane,
                x: tuning.player_x(),
                y: player.y,
                ducking: player.ducking,
                invincible: player.invincible,
                hurt: player.hit_this_window,
                visible: !blink_off,
                run_frame: player.run_frame,
            },
            obstacles,
            kong: KongPose {
                phase: kong.phase,
                attacking: kong.is_attacking(),
                target_lane: (kong.phase != AttackPhase::Idle).then_some(kong.target_lane),
                leap_progress,
                leap_point,
                body: kong_rest_position(tuning) + Vec2::new(0.0, bob),
                roar: kong.roar,
                arm_swing: ((t / 320.0).sin() * 12.0) as f32,
                chest_ripple: ((t % 700.0) / 700.0) as f32,
            },
        }
    }

    /// Serialize for a JS host
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("Snapshot serialization failed: {}", e);
            String::from("{}")
        })
    }
}
