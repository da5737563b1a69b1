//! Game state and session control
//!
//! `GameState` is the single session context every component ticks against.
//! It owns the player, the obstacle field and Kong exclusively; only the best
//! score ever leaves it (by value, through `GameEvent::NewBestScore`).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::antagonist::Antagonist;
use super::obstacle::ObstacleField;
use super::player::Player;
use super::score::display_score;
use crate::consts::START_LIVES;
use crate::tuning::Tuning;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start command
    Start,
    /// Active run
    Playing,
    /// Run ended, waiting for a restart command
    GameOver,
}

/// Things that happened during a tick (drained by the host)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run started (fresh session or restart)
    SessionStarted,
    /// Player lost a life (drives the hit flash)
    PlayerHit { lives_left: u8 },
    /// Kong marked a lane
    AttackWarning { lane: u8 },
    /// Kong landed on a lane
    AttackLanded { lane: u8, hit: bool },
    /// Lives ran out
    GameOver { score: u64 },
    /// Best score improved; the host should persist it
    NewBestScore(u64),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Run score (continuous, monotonic while playing)
    pub score: f32,
    pub lives: u8,
    /// World scroll speed (px per reference frame)
    pub speed: f32,
    /// Best score across sessions
    pub best_score: u64,
    /// Monotonic simulation time in ms (every phase, drives idle animations)
    pub time_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub obstacles: ObstacleField,
    pub kong: Antagonist,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session on the title screen with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default(), 0)
    }

    /// New session on the title screen
    ///
    /// A tuning that fails validation is replaced by the default one.
    pub fn with_tuning(seed: u64, tuning: Tuning, best_score: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning ({}), using defaults", e);
                Tuning::default()
            }
        };
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0.0,
            lives: START_LIVES,
            speed: tuning.base_speed,
            best_score,
            time_ms: 0.0,
            time_ticks: 0,
            player: Player::new(&tuning),
            obstacles: ObstacleField::new(),
            kong: Antagonist::new(&tuning),
            events: Vec::new(),
            tuning,
        }
    }

    /// Enter PLAYING from a clean slate. Any in-flight attack is dropped.
    pub fn begin_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0.0;
        self.lives = START_LIVES;
        self.speed = self.tuning.base_speed;
        self.obstacles.clear();
        self.kong.reset(&self.tuning);
        self.player = Player::new(&self.tuning);
        self.events.push(GameEvent::SessionStarted);
        log::info!("Run started (best score {})", self.best_score);
    }

    /// Enter GAMEOVER and settle the best score
    pub fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        let final_score = display_score(self.score);
        self.events.push(GameEvent::GameOver { score: final_score });
        log::info!("Game over with score {}", final_score);

        if final_score > self.best_score {
            self.best_score = final_score;
            self.events.push(GameEvent::NewBestScore(final_score));
            log::info!("New best score: {}", final_score);
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Score as displayed (floored)
    #[inline]
    pub fn display_score(&self) -> u64 {
        display_score(self.score)
    }
}
