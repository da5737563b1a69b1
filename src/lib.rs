//! Kong Dash - A three-lane city runner
//!
//! Core modules:
//! - `sim`: Simulation core (player, obstacles, Kong's leap attack, session)
//! - `tuning`: Data-driven game balance
//! - `best_score`: Best-score persistence behind a small storage seam
//! - `platform`: Browser bindings (wasm32 only)

pub mod best_score;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use best_score::{BestScoreStore, MemoryStore, StoreError};
#[cfg(not(target_arch = "wasm32"))]
pub use best_score::JsonFileStore;
pub use tuning::{Tuning, TuningError};

/// Fixed game constants that are not part of the tuning file
pub mod consts {
    /// Number of lanes (0 = top, 1 = middle, 2 = bottom)
    pub const LANE_COUNT: u8 = 3;
    /// Lane the player starts each run in
    pub const START_LANE: u8 = 1;
    /// Lives at the start of a run
    pub const START_LIVES: u8 = 3;

    /// Milliseconds per second (timers are kept in ms)
    pub const MS_PER_SEC: f32 = 1000.0;

    /// Horizontal inset of the player hurtbox on each side
    pub const HURTBOX_INSET: f32 = 4.0;

    /// Run-cycle frames, advanced whenever dt * speed accumulates past the threshold
    pub const RUN_FRAMES: u8 = 4;
    pub const RUN_FRAME_THRESHOLD: f32 = 6.0;

    /// Invincibility blink period (ms per on/off half)
    pub const BLINK_PERIOD_MS: f64 = 120.0;
}
