//! Kong's leap attack
//!
//! A cooldown-gated cycle: Idle → Warning → Executing → Recovery → Idle.
//! The target lane is picked when the warning starts and stays fixed until
//! the cycle ends. The only damage check happens on the tick the leap lands.
//! One phase transition per tick; leftover time is not carried over.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arc::LeapArc;
use super::player::Player;
use super::score::{attack_cooldown_ms, dt_ms};
use crate::consts::LANE_COUNT;
use crate::tuning::Tuning;

/// Roar intensity on entering each attack phase / taking a hit
const ROAR_WARNING: f32 = 14.0;
const ROAR_WARNING_SUSTAIN: f32 = 6.0;
const ROAR_LANDING: f32 = 18.0;
pub const ROAR_PLAYER_HIT: f32 = 15.0;

/// Attack phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Waiting out the cooldown
    Idle,
    /// Target lane is marked, player can still get out of the way
    Warning,
    /// Kong is in the air
    Executing,
    /// Landing follow-through
    Recovery,
}

/// Something the rest of the tick needs to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackSignal {
    /// Warning started on a lane
    Warning { lane: u8 },
    /// Kong just landed on a lane
    Landed { lane: u8 },
}

/// Kong and his attack sequencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Antagonist {
    pub phase: AttackPhase,
    /// Time left in the current non-idle phase (ms)
    pub timer_ms: f32,
    /// Time left before the next warning (ms, Idle only)
    pub cooldown_ms: f32,
    pub target_lane: u8,
    pub hit_this_cycle: bool,
    /// Captured when the leap starts
    pub leap: Option<LeapArc>,
    /// Roar/jaw intensity (presentation; decays every tick in every session phase)
    pub roar: f32,
}

impl Antagonist {
    /// Idle with the full base cooldown
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: AttackPhase::Idle,
            timer_ms: 0.0,
            cooldown_ms: tuning.attack_base_cooldown_ms,
            target_lane: crate::consts::START_LANE,
            hit_this_cycle: false,
            leap: None,
            roar: 0.0,
        }
    }

    /// Discard any in-flight attack
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Presentation-only update (runs in every session phase)
    pub fn animate(&mut self, dt: f32, tuning: &Tuning) {
        self.roar = (self.roar - dt * tuning.reference_fps).max(0.0);
    }

    /// Bump the roar (never lowers it)
    pub fn roar_at_least(&mut self, level: f32) {
        self.roar = self.roar.max(level);
    }

    /// True while Kong is airborne or landing
    pub fn is_attacking(&self) -> bool {
        matches!(self.phase, AttackPhase::Executing | AttackPhase::Recovery)
    }

    /// Progress along the leap (0..=1) while executing, 1 during recovery
    pub fn leap_progress(&self, tuning: &Tuning) -> Option<f32> {
        match self.phase {
            AttackPhase::Executing => {
                Some((1.0 - self.timer_ms / tuning.attack_executing_ms).clamp(0.0, 1.0))
            }
            AttackPhase::Recovery => Some(1.0),
            _ => None,
        }
    }

    /// Advance the sequencer. `score` feeds the next cooldown.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        score: f32,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<AttackSignal> {
        let ms = dt_ms(dt);
        match self.phase {
            AttackPhase::Idle => {
                self.cooldown_ms -= ms;
                if self.cooldown_ms <= 0.0 {
                    self.target_lane = rng.random_range(0..LANE_COUNT);
                    self.phase = AttackPhase::Warning;
                    self.timer_ms = tuning.attack_warning_ms;
                    self.hit_this_cycle = false;
                    self.leap = None;
                    self.roar = ROAR_WARNING;
                    log::debug!("Kong warning: lane {}", self.target_lane);
                    return Some(AttackSignal::Warning {
                        lane: self.target_lane,
                    });
                }
            }
            AttackPhase::Warning => {
                self.timer_ms -= ms;
                self.roar_at_least(ROAR_WARNING_SUSTAIN);
                if self.timer_ms <= 0.0 {
                    self.phase = AttackPhase::Executing;
                    self.timer_ms = tuning.attack_executing_ms;
                    self.leap = Some(LeapArc::toward_lane(self.target_lane, tuning));
                    log::debug!("Kong leaps at lane {}", self.target_lane);
                }
            }
            AttackPhase::Executing => {
                self.timer_ms -= ms;
                if self.timer_ms <= 0.0 {
                    self.phase = AttackPhase::Recovery;
                    self.timer_ms = tuning.attack_recovery_ms;
                    self.roar = ROAR_LANDING;
                    return Some(AttackSignal::Landed {
                        lane: self.target_lane,
                    });
                }
            }
            AttackPhase::Recovery => {
                self.timer_ms -= ms;
                if self.timer_ms <= 0.0 {
                    self.phase = AttackPhase::Idle;
                    self.timer_ms = 0.0;
                    self.cooldown_ms = attack_cooldown_ms(score, tuning);
                    self.leap = None;
                    log::debug!("Kong idle for {:.0} ms", self.cooldown_ms);
                }
            }
        }
        None
    }

    /// Decide whether a landing hits the player. Marks the cycle as spent on a hit.
    pub fn landing_hits(&mut self, player: &Player) -> bool {
        if player.invincible || self.hit_this_cycle || player.lane != self.target_lane {
            return false;
        }
        self.hit_this_cycle = true;
        true
    }
}
