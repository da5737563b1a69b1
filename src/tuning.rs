//! Data-driven game balance
//!
//! Every number the simulation reads lives here so runs can be re-tuned from
//! a JSON file without a rebuild. Missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;

/// Errors raised while loading or validating a tuning file
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game balance and layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Layout ===
    /// Logical viewport width (obstacles spawn just past this edge)
    pub viewport_width: f32,
    /// Logical viewport height
    pub viewport_height: f32,
    /// Lane floor heights as fractions of the viewport (top, mid, bottom)
    pub lane_fractions: [f32; LANE_COUNT as usize],
    /// Street ground line as a fraction of the viewport
    pub ground_fraction: f32,

    // === Loop ===
    /// Upper bound on a single tick's delta time (seconds)
    pub max_frame_dt: f32,
    /// Frame rate the per-frame constants (speed, gravity, jump) are expressed in
    pub reference_fps: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Player x position as a fraction of the viewport width
    pub player_x_fraction: f32,
    /// Hurtbox height multiplier while ducking
    pub duck_height_factor: f32,
    /// Initial vertical velocity of a jump (px per reference frame, negative = up)
    pub jump_velocity: f32,
    /// Gravity (px per reference frame squared)
    pub gravity: f32,
    /// How many ticks a duck lasts
    pub duck_ticks: u32,
    /// Invincibility window after taking damage (ms)
    pub invincibility_ms: f32,

    // === Score & difficulty ===
    pub base_speed: f32,
    pub max_speed: f32,
    /// Speed gained per difficulty step
    pub speed_increment: f32,
    /// Score needed per difficulty step
    pub score_step: f32,
    /// Score gained per second per unit of world speed
    pub score_factor: f32,

    // === Obstacle field ===
    pub spawn_base_interval_ms: f32,
    pub spawn_min_interval_ms: f32,
    /// Spawn interval reduction per point of score
    pub spawn_interval_per_score: f32,
    /// Chance of a second obstacle on the same spawn tick
    pub double_spawn_chance: f64,

    // === Kong leap attack ===
    pub attack_warning_ms: f32,
    pub attack_executing_ms: f32,
    pub attack_recovery_ms: f32,
    pub attack_base_cooldown_ms: f32,
    pub attack_min_cooldown_ms: f32,
    /// Cooldown reduction per point of score
    pub attack_cooldown_per_score: f32,
    /// Peak height of the leap arc as a fraction of the viewport height
    pub leap_arc_height_fraction: f32,
    pub kong_width: f32,
    pub kong_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            lane_fractions: [0.50, 0.72, 0.88],
            ground_fraction: 0.90,

            max_frame_dt: 0.05,
            reference_fps: 60.0,

            player_width: 40.0,
            player_height: 72.0,
            player_x_fraction: 0.22,
            duck_height_factor: 0.55,
            jump_velocity: -22.0,
            gravity: 0.9,
            duck_ticks: 45,
            invincibility_ms: 2200.0,

            base_speed: 5.0,
            max_speed: 16.0,
            speed_increment: 0.6,
            score_step: 300.0,
            score_factor: 1.8,

            spawn_base_interval_ms: 1800.0,
            spawn_min_interval_ms: 600.0,
            spawn_interval_per_score: 0.4,
            double_spawn_chance: 0.3,

            attack_warning_ms: 1800.0,
            attack_executing_ms: 800.0,
            attack_recovery_ms: 500.0,
            attack_base_cooldown_ms: 9000.0,
            attack_min_cooldown_ms: 4000.0,
            attack_cooldown_per_score: 0.7,
            leap_arc_height_fraction: 0.45,
            kong_width: 160.0,
            kong_height: 300.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(invalid("viewport", "dimensions must be positive"));
        }
        if !self.lane_fractions.windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid("lane_fractions", "lanes must be ordered top to bottom"));
        }
        if self.max_frame_dt <= 0.0 || self.reference_fps <= 0.0 {
            return Err(invalid("max_frame_dt", "loop timing must be positive"));
        }
        if self.jump_velocity >= 0.0 || self.gravity <= 0.0 {
            return Err(invalid("jump_velocity", "a jump must go up and come back down"));
        }
        if !(0.0..=1.0).contains(&self.duck_height_factor) {
            return Err(invalid("duck_height_factor", "must be within 0..=1"));
        }
        if self.base_speed <= 0.0 || self.max_speed < self.base_speed {
            return Err(invalid("max_speed", "must be at least base_speed (> 0)"));
        }
        if self.score_step <= 0.0 {
            return Err(invalid("score_step", "must be positive"));
        }
        // Score only grows and speed only steps up
        if self.score_factor < 0.0 {
            return Err(invalid("score_factor", "must not be negative"));
        }
        if self.speed_increment < 0.0 {
            return Err(invalid("speed_increment", "must not be negative"));
        }
        if self.invincibility_ms < 0.0 {
            return Err(invalid("invincibility_ms", "must not be negative"));
        }
        if self.spawn_min_interval_ms <= 0.0
            || self.spawn_min_interval_ms > self.spawn_base_interval_ms
        {
            return Err(invalid(
                "spawn_min_interval_ms",
                "must be positive and no larger than the base interval",
            ));
        }
        if !(0.0..=1.0).contains(&self.double_spawn_chance) {
            return Err(invalid("double_spawn_chance", "must be a probability"));
        }
        if self.attack_min_cooldown_ms <= 0.0
            || self.attack_min_cooldown_ms > self.attack_base_cooldown_ms
        {
            return Err(invalid(
                "attack_min_cooldown_ms",
                "must be positive and no larger than the base cooldown",
            ));
        }
        if self.attack_warning_ms <= 0.0
            || self.attack_executing_ms <= 0.0
            || self.attack_recovery_ms <= 0.0
        {
            return Err(invalid("attack_*_ms", "phase durations must be positive"));
        }
        Ok(())
    }

    /// Floor line (screen y) of a lane
    #[inline]
    pub fn lane_floor_y(&self, lane: u8) -> f32 {
        self.viewport_height * self.lane_fractions[lane as usize]
    }

    /// Player's top edge when standing in a lane
    #[inline]
    pub fn player_ground_y(&self, lane: u8) -> f32 {
        self.lane_floor_y(lane) - self.player_height
    }

    /// Player's fixed horizontal position
    #[inline]
    pub fn player_x(&self) -> f32 {
        self.viewport_width * self.player_x_fraction
    }

    /// Street ground line (screen y)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.viewport_height * self.ground_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 6.0, "max_speed": 20.0 }"#).unwrap();
        assert_eq!(tuning.base_speed, 6.0);
        assert_eq!(tuning.max_speed, 20.0);
        assert_eq!(tuning.score_factor, Tuning::default().score_factor);
    }

    #[test]
    fn test_rejects_unordered_lanes() {
        let result = Tuning::from_json(r#"{ "lane_fractions": [0.9, 0.7, 0.5] }"#);
        assert!(matches!(
            result,
            Err(TuningError::Invalid {
                field: "lane_fractions",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    fn rejected_field(json: &str) -> Option<&'static str> {
        match Tuning::from_json(json) {
            Err(TuningError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_rejects_negative_score_factor() {
        assert_eq!(
            rejected_field(r#"{ "score_factor": -1.8 }"#),
            Some("score_factor")
        );
    }

    #[test]
    fn test_rejects_negative_speed_increment() {
        assert_eq!(
            rejected_field(r#"{ "speed_increment": -0.6 }"#),
            Some("speed_increment")
        );
    }

    #[test]
    fn test_rejects_negative_invincibility() {
        assert_eq!(
            rejected_field(r#"{ "invincibility_ms": -1.0 }"#),
            Some("invincibility_ms")
        );
    }

    #[test]
    fn test_rejects_zero_min_cooldown() {
        assert_eq!(
            rejected_field(r#"{ "attack_min_cooldown_ms": 0.0 }"#),
            Some("attack_min_cooldown_ms")
        );
    }

    #[test]
    fn test_zero_growth_is_allowed() {
        let tuning = Tuning::from_json(r#"{ "score_factor": 0.0, "speed_increment": 0.0 }"#);
        assert!(tuning.is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Tuning::load(dir.path().join("nope.json"));
        assert!(matches!(result, Err(TuningError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tuning.json");
        std::fs::write(&path, r#"{ "base_speed": 6.0, "double_spawn_chance": 0.5 }"#).unwrap();

        let tuning = Tuning::load(&path).unwrap();
        assert_eq!(tuning.base_speed, 6.0);
        assert_eq!(tuning.double_spawn_chance, 0.5);
        assert_eq!(tuning.max_speed, Tuning::default().max_speed);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tuning.json");
        std::fs::write(&path, r#"{ "score_factor": -1.0 }"#).unwrap();
        assert!(matches!(
            Tuning::load(&path),
            Err(TuningError::Invalid { .. })
        ));
    }

    #[test]
    fn test_lane_geometry() {
        let tuning = Tuning::default();
        assert_eq!(tuning.lane_floor_y(1), 720.0 * 0.72);
        assert_eq!(tuning.player_ground_y(0), 720.0 * 0.50 - 72.0);
        assert!(tuning.player_ground_y(0) < tuning.player_ground_y(2));
    }
}
