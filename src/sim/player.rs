//! The runner
//!
//! Screen coordinates: y grows downward, so a jump starts with a negative
//! vertical velocity. Requests that are not allowed in the current state are
//! silently ignored.

use serde::{Deserialize, Serialize};

use super::score::dt_ms;
use crate::consts::{LANE_COUNT, RUN_FRAME_THRESHOLD, RUN_FRAMES, START_LANE};
use crate::tuning::Tuning;

/// Player state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Current lane (0 = top, 1 = middle, 2 = bottom)
    pub lane: u8,
    /// Top edge of the player (screen y)
    pub y: f32,
    /// Vertical velocity in px per reference frame
    pub vy: f32,
    pub grounded: bool,
    pub ducking: bool,
    /// Ticks of ducking left
    pub duck_ticks: u32,
    pub invincible: bool,
    /// Invincibility left (ms)
    pub invincible_ms: f32,
    /// Set when damage opened the current invincibility window, cleared
    /// when it closes. Drives the hurt tint in `FrameSnapshot`.
    pub hit_this_window: bool,
    /// Run-cycle frame (animation only)
    pub run_frame: u8,
    run_timer: f32,
}

impl Player {
    /// Fresh player standing in the middle lane
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lane: START_LANE,
            y: tuning.player_ground_y(START_LANE),
            vy: 0.0,
            grounded: true,
            ducking: false,
            duck_ticks: 0,
            invincible: false,
            invincible_ms: 0.0,
            hit_this_window: false,
            run_frame: 0,
            run_timer: 0.0,
        }
    }

    /// Start a jump. Only from the ground and never mid-duck.
    pub fn request_jump(&mut self, tuning: &Tuning) -> bool {
        if !self.grounded || self.ducking {
            return false;
        }
        self.vy = tuning.jump_velocity;
        self.grounded = false;
        true
    }

    /// Start (or refresh) a duck. Only from the ground.
    pub fn request_duck(&mut self, tuning: &Tuning) -> bool {
        if !self.grounded {
            return false;
        }
        self.ducking = true;
        self.duck_ticks = tuning.duck_ticks;
        true
    }

    /// Step one lane up (-1) or down (+1). Out-of-range moves are ignored.
    pub fn request_lane_change(&mut self, direction: i8) -> bool {
        let target = self.lane as i16 + direction.signum() as i16;
        if direction == 0 || !(0..LANE_COUNT as i16).contains(&target) {
            return false;
        }
        self.lane = target as u8;
        true
    }

    /// Open an invincibility window after taking a hit
    pub fn start_invincibility(&mut self, tuning: &Tuning) {
        self.invincible = true;
        self.invincible_ms = tuning.invincibility_ms;
        self.hit_this_window = true;
    }

    /// Advance physics and timers by `dt` seconds
    pub fn tick(&mut self, dt: f32, world_speed: f32, tuning: &Tuning) {
        let ground_y = tuning.player_ground_y(self.lane);
        let frames = dt * tuning.reference_fps;

        if self.grounded {
            // Lane changes on the ground snap vertically with no interpolation
            self.y = ground_y;
        } else {
            self.vy += tuning.gravity * frames;
            self.y += self.vy * frames;
            if self.y >= ground_y {
                self.y = ground_y;
                self.vy = 0.0;
                self.grounded = true;
            }
        }

        if self.ducking {
            self.duck_ticks = self.duck_ticks.saturating_sub(1);
            if self.duck_ticks == 0 {
                self.ducking = false;
            }
        }

        if self.invincible {
            self.invincible_ms -= dt_ms(dt);
            if self.invincible_ms <= 0.0 {
                self.invincible_ms = 0.0;
                self.invincible = false;
                self.hit_this_window = false;
            }
        }

        self.run_timer += dt * world_speed;
        if self.run_timer > RUN_FRAME_THRESHOLD {
            self.run_timer = 0.0;
            self.run_frame = (self.run_frame + 1) % RUN_FRAMES;
        }
    }

    /// Hurtbox height (shrinks while ducking)
    #[inline]
    pub fn height(&self, tuning: &Tuning) -> f32 {
        if self.ducking {
            tuning.player_height * tuning.duck_height_factor
        } else {
            tuning.player_height
        }
    }

    /// Hurtbox top edge (a duck keeps the feet where they were)
    #[inline]
    pub fn top(&self, tuning: &Tuning) -> f32 {
        self.y + tuning.player_height - self.height(tuning)
    }
}
