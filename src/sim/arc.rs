//! Leap arc geometry for Kong's pounce
//!
//! The arc is captured when the leap starts so the renderer can interpolate
//! it without knowing anything about lanes:
//! - start: Kong's body anchor at the left edge of the street
//! - end: the target lane's fixed landing point
//! - height: peak lift above the straight start→end line

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A parabola-like leap from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeapArc {
    pub start: Vec2,
    pub end: Vec2,
    /// Peak lift (screen y is inverted, so the arc bends upward)
    pub height: f32,
}

impl LeapArc {
    pub fn new(start: Vec2, end: Vec2, height: f32) -> Self {
        Self { start, end, height }
    }

    /// Build the leap toward a lane using the current layout
    pub fn toward_lane(lane: u8, tuning: &Tuning) -> Self {
        Self::new(
            kong_leap_anchor(tuning),
            landing_point(lane, tuning),
            tuning.viewport_height * tuning.leap_arc_height_fraction,
        )
    }

    /// Point along the arc at progress `t` (clamped to 0..=1)
    ///
    /// x moves linearly, y follows the straight line minus a half sine.
    pub fn point_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let base = self.start.lerp(self.end, t);
        base - Vec2::Y * (t * std::f32::consts::PI).sin() * self.height
    }

    /// Peak point of the arc (useful for shadows / debugging)
    pub fn apex(&self) -> Vec2 {
        self.point_at(0.5)
    }
}

/// Where Kong touches down in a lane
pub fn landing_point(lane: u8, tuning: &Tuning) -> Vec2 {
    Vec2::new(tuning.player_x() + 20.0, tuning.lane_floor_y(lane) - 20.0)
}

/// Kong's resting top-left corner: partially off-screen left, feet on the ground
pub fn kong_rest_position(tuning: &Tuning) -> Vec2 {
    Vec2::new(
        -tuning.kong_width * 0.18,
        tuning.ground_y() - tuning.kong_height * 0.94,
    )
}

/// Point on Kong's body the leap launches from
pub fn kong_leap_anchor(tuning: &Tuning) -> Vec2 {
    kong_rest_position(tuning) + Vec2::new(tuning.kong_width * 0.5, tuning.kong_height * 0.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_endpoints() {
        let arc = LeapArc::new(Vec2::new(0.0, 100.0), Vec2::new(200.0, 300.0), 50.0);
        assert!((arc.point_at(0.0) - arc.start).length() < 1e-4);
        assert!((arc.point_at(1.0) - arc.end).length() < 1e-3);
    }

    #[test]
    fn test_arc_lifts_in_the_middle() {
        let arc = LeapArc::new(Vec2::new(0.0, 100.0), Vec2::new(200.0, 100.0), 50.0);
        let apex = arc.apex();
        assert!((apex.x - 100.0).abs() < 1e-4);
        assert!((apex.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_arc_progress_is_clamped() {
        let arc = LeapArc::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 5.0);
        assert_eq!(arc.point_at(-1.0), arc.point_at(0.0));
        assert_eq!(arc.point_at(2.0), arc.point_at(1.0));
    }

    #[test]
    fn test_landing_points_follow_lanes() {
        let tuning = Tuning::default();
        let top = landing_point(0, &tuning);
        let bottom = landing_point(2, &tuning);
        assert_eq!(top.x, bottom.x);
        assert!(top.y < bottom.y);
        let arc = LeapArc::toward_lane(2, &tuning);
        assert_eq!(arc.end, bottom);
        assert_eq!(arc.start, kong_leap_anchor(&tuning));
    }
}
