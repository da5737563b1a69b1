//! Per-frame simulation tick
//!
//! Order inside a PLAYING tick is fixed:
//! obstacles → Kong → obstacle collisions → player → score/difficulty.
//! A run that ends mid-tick skips whatever is left of that tick.

use serde::{Deserialize, Serialize};

use super::antagonist::{AttackPhase, AttackSignal};
use super::clock::clamp_dt;
use super::collision::{apply_damage, resolve_obstacles};
use super::score;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::LANE_COUNT;

/// How far ahead (in seconds of travel) the autopilot looks for obstacles
const AUTOPILOT_LOOKAHEAD_SECS: f32 = 0.45;
/// Jump once an unavoidable obstacle is this close (seconds of travel)
const AUTOPILOT_JUMP_SECS: f32 = 0.1;

/// A discrete, already-debounced player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Jump,
    Duck,
    LaneLeft,
    LaneRight,
    Start,
    Restart,
}

impl Intent {
    /// Parse a host-side intent name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "jump" | "up" => Some(Intent::Jump),
            "duck" | "down" => Some(Intent::Duck),
            "left" | "lane_left" => Some(Intent::LaneLeft),
            "right" | "lane_right" => Some(Intent::LaneRight),
            "start" => Some(Intent::Start),
            "restart" => Some(Intent::Restart),
            _ => None,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub jump: bool,
    pub duck: bool,
    /// Move one lane toward the top
    pub lane_left: bool,
    /// Move one lane toward the bottom
    pub lane_right: bool,
    pub start: bool,
    pub restart: bool,
    /// Demo mode - the autopilot plays the run
    pub autopilot: bool,
}

impl TickInput {
    /// Record an intent for this tick
    pub fn press(&mut self, intent: Intent) {
        match intent {
            Intent::Jump => self.jump = true,
            Intent::Duck => self.duck = true,
            Intent::LaneLeft => self.lane_left = true,
            Intent::LaneRight => self.lane_right = true,
            Intent::Start => self.start = true,
            Intent::Restart => self.restart = true,
        }
    }

    /// Input holding a single intent
    pub fn with(intent: Intent) -> Self {
        let mut input = Self::default();
        input.press(intent);
        input
    }

    /// Clear one-shot intents after they were consumed (keeps the autopilot flag)
    pub fn clear_intents(&mut self) {
        *self = Self {
            autopilot: self.autopilot,
            ..Default::default()
        };
    }
}

/// Advance the game state by one frame of `dt` seconds (clamped)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = clamp_dt(dt, state.tuning.max_frame_dt);

    // Presentation tick runs in every phase
    state.time_ticks += 1;
    state.time_ms += f64::from(dt) * 1000.0;
    state.kong.animate(dt, &state.tuning);

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::Start if input.start => {
            state.begin_run();
            return;
        }
        GamePhase::GameOver if input.restart => {
            state.begin_run();
            return;
        }
        GamePhase::Start | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    apply_movement(state, input);

    // Obstacle field
    state
        .obstacles
        .tick(dt, state.speed, state.score, &mut state.rng, &state.tuning);

    // Kong's attack
    if let Some(signal) = state
        .kong
        .tick(dt, state.score, &mut state.rng, &state.tuning)
    {
        match signal {
            AttackSignal::Warning { lane } => {
                state.events.push(GameEvent::AttackWarning { lane });
            }
            AttackSignal::Landed { lane } => {
                let hit = state.kong.landing_hits(&state.player);
                state.events.push(GameEvent::AttackLanded { lane, hit });
                if hit && apply_damage(state) {
                    return;
                }
            }
        }
    }

    // Obstacle collisions
    if resolve_obstacles(state) {
        return;
    }

    state.player.tick(dt, state.speed, &state.tuning);

    let (score, speed) = score::update(state.score, state.speed, dt, &state.tuning);
    state.score = score;
    state.speed = speed;
}

/// Movement intents (PLAYING only). Disallowed moves are silently dropped.
fn apply_movement(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    if input.lane_left {
        player.request_lane_change(-1);
    }
    if input.lane_right {
        player.request_lane_change(1);
    }
    if input.jump {
        player.request_jump(&state.tuning);
    }
    if input.duck {
        player.request_duck(&state.tuning);
    }
}

/// Demo mode: fill in intents for the current state
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Start => {
            input.start = true;
            return;
        }
        GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    let tuning = &state.tuning;
    let px_per_sec = state.speed * tuning.reference_fps;
    let player_right = tuning.player_x() + tuning.player_width;

    let kong_lane = matches!(
        state.kong.phase,
        AttackPhase::Warning | AttackPhase::Executing
    )
    .then_some(state.kong.target_lane);

    // Distance to the nearest obstacle coming at the player in a lane
    let threat = |lane: u8| -> Option<f32> {
        state
            .obstacles
            .in_lane(lane)
            .filter(|o| !o.cleared)
            .map(|o| o.x - player_right)
            .filter(|gap| *gap < px_per_sec * AUTOPILOT_LOOKAHEAD_SECS)
            .reduce(f32::min)
    };

    let current = state.player.lane;
    let under_kong = kong_lane == Some(current);
    let gap = threat(current);
    if !under_kong && gap.is_none() {
        return;
    }

    let neighbours = [-1i8, 1].into_iter().filter_map(|dir| {
        let lane = current as i16 + dir as i16;
        (0..LANE_COUNT as i16)
            .contains(&lane)
            .then_some((dir, lane as u8))
    });

    // Prefer a fully clear lane, then anything out of Kong's way
    let escape = neighbours
        .clone()
        .find(|&(_, lane)| kong_lane != Some(lane) && threat(lane).is_none())
        .or_else(|| {
            under_kong
                .then(|| neighbours.clone().find(|&(_, lane)| kong_lane != Some(lane)))
                .flatten()
        });

    if let Some((dir, _)) = escape {
        if dir < 0 {
            input.lane_left = true;
        } else {
            input.lane_right = true;
        }
        return;
    }

    if let Some(gap) = gap {
        if gap < px_per_sec * AUTOPILOT_JUMP_SECS {
            input.jump = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleKind;

    const DT: f32 = 1.0 / 60.0;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &TickInput::with(Intent::Start), DT);
        state.drain_events();
        state
    }

    #[test]
    fn test_start_to_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Start);

        // No start command - stays on the title screen
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Start);

        tick(&mut state, &TickInput::with(Intent::Start), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0.0);
    }

    #[test]
    fn test_intents_outside_their_phase_are_ignored() {
        let mut state = GameState::new(1);
        for intent in [
            Intent::Restart,
            Intent::Jump,
            Intent::LaneLeft,
            Intent::Duck,
        ] {
            tick(&mut state, &TickInput::with(intent), DT);
            assert_eq!(state.phase, GamePhase::Start);
            assert_eq!(state.player.lane, 1);
            assert!(state.player.grounded);
            assert!(!state.player.ducking);
        }

        let mut state = started(1);
        tick(&mut state, &TickInput::with(Intent::Start), DT);
        tick(&mut state, &TickInput::with(Intent::Restart), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.score > 0.0);
    }

    #[test]
    fn test_movement_intents_apply_while_playing() {
        let mut state = started(2);
        tick(&mut state, &TickInput::with(Intent::LaneRight), DT);
        assert_eq!(state.player.lane, 2);
        tick(&mut state, &TickInput::with(Intent::Jump), DT);
        assert!(!state.player.grounded);
    }

    #[test]
    fn test_nothing_moves_while_not_playing() {
        let mut state = started(3);
        state.lives = 1;
        apply_damage(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        state.obstacles.push(ObstacleKind::Car, 0, 700.0);
        let score = state.score;
        let cooldown = state.kong.cooldown_ms;
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 0.05);
        }
        assert_eq!(state.obstacles.obstacles[0].x, 700.0);
        assert_eq!(state.score, score);
        assert_eq!(state.kong.cooldown_ms, cooldown);
        // Presentation clock still runs
        assert!(state.time_ms > 4900.0);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = started(4);
        state.score = 777.0;
        state.lives = 1;
        apply_damage(&mut state);
        state.drain_events();

        tick(&mut state, &TickInput::with(Intent::Restart), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.best_score, 777);
        assert_eq!(state.drain_events(), vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut state = started(5);
        tick(&mut state, &TickInput::default(), 10.0);
        let expected = 0.05 * state.tuning.base_speed * state.tuning.score_factor;
        assert!((state.score - expected).abs() < 1e-4);
    }

    #[test]
    fn test_kong_landing_on_player_lane_hits() {
        let mut state = started(6);
        state.kong.phase = AttackPhase::Executing;
        state.kong.timer_ms = 10.0;
        state.kong.target_lane = state.player.lane;

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.lives, 2);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::AttackLanded {
            lane: 1,
            hit: true
        }));
        assert!(events.contains(&GameEvent::PlayerHit { lives_left: 2 }));
    }

    #[test]
    fn test_dodging_kong_by_changing_lane() {
        let mut state = started(7);
        state.kong.phase = AttackPhase::Executing;
        state.kong.timer_ms = 10.0;
        state.kong.target_lane = 1;

        tick(&mut state, &TickInput::with(Intent::LaneLeft), DT);
        assert_eq!(state.lives, 3);
        assert!(state.drain_events().contains(&GameEvent::AttackLanded {
            lane: 1,
            hit: false
        }));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput::with(Intent::Start),
            TickInput::with(Intent::LaneLeft),
            TickInput::with(Intent::Jump),
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input, 0.05);
                tick(&mut state2, input, 0.05);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.obstacles.obstacles, state2.obstacles.obstacles);
        assert_eq!(state1.kong, state2.kong);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
    }

    #[test]
    fn test_autopilot_starts_and_dodges_kong() {
        let mut state = GameState::new(8);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Playing);

        state.kong.phase = AttackPhase::Warning;
        state.kong.timer_ms = 500.0;
        state.kong.target_lane = state.player.lane;
        tick(&mut state, &input, DT);
        assert_ne!(state.player.lane, state.kong.target_lane);
    }

    #[test]
    fn test_autopilot_jumps_when_boxed_in() {
        let mut state = started(9);
        let x = state.tuning.player_x() + state.tuning.player_width + 5.0;
        for lane in 0..LANE_COUNT {
            state.obstacles.push(ObstacleKind::Barrier, lane, x);
        }
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.player.lane, 1);
        assert!(!state.player.grounded);
    }

    #[test]
    fn test_intent_names() {
        assert_eq!(Intent::from_name("Jump"), Some(Intent::Jump));
        assert_eq!(Intent::from_name("lane_left"), Some(Intent::LaneLeft));
        assert_eq!(Intent::from_name("fly"), None);
    }

    #[test]
    fn test_intent_serde() {
        assert_eq!(serde_json::to_string(&Intent::LaneRight).unwrap(), "\"LaneRight\"");
        let intent: Intent = serde_json::from_str("\"Duck\"").unwrap();
        assert_eq!(intent, Intent::Duck);
    }
}
