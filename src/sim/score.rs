//! Score accrual and difficulty curves
//!
//! Difficulty is a pure function of score: a player who stalls score growth
//! never faces a faster street or a more aggressive Kong.

use crate::consts::MS_PER_SEC;
use crate::tuning::Tuning;

/// Score after running for `dt` seconds at `speed`
#[inline]
pub fn accrue(score: f32, dt: f32, speed: f32, tuning: &Tuning) -> f32 {
    score + dt * speed * tuning.score_factor
}

/// World speed for a score (step function, capped)
pub fn world_speed(score: f32, tuning: &Tuning) -> f32 {
    let level = (score / tuning.score_step).floor();
    (tuning.base_speed + level * tuning.speed_increment).min(tuning.max_speed)
}

/// Milliseconds between obstacle spawns at a score
pub fn spawn_interval_ms(score: f32, tuning: &Tuning) -> f32 {
    (tuning.spawn_base_interval_ms - score * tuning.spawn_interval_per_score)
        .max(tuning.spawn_min_interval_ms)
}

/// Idle time before Kong's next leap at a score
pub fn attack_cooldown_ms(score: f32, tuning: &Tuning) -> f32 {
    (tuning.attack_base_cooldown_ms - score * tuning.attack_cooldown_per_score)
        .max(tuning.attack_min_cooldown_ms)
}

/// Advance score and re-derive world speed. Returns the new (score, speed).
pub fn update(score: f32, speed: f32, dt: f32, tuning: &Tuning) -> (f32, f32) {
    let score = accrue(score, dt, speed, tuning);
    (score, world_speed(score, tuning))
}

/// Score as shown to the player and persisted as a best score
#[inline]
pub fn display_score(score: f32) -> u64 {
    score.max(0.0).floor() as u64
}

/// Convert a tick's delta time to milliseconds
#[inline]
pub(crate) fn dt_ms(dt: f32) -> f32 {
    dt * MS_PER_SEC
}
