//! Browser host bindings
//!
//! JS calls `press()` from its key handlers and `frame()` from
//! `requestAnimationFrame`; each frame returns a JSON `FrameSnapshot` for the
//! canvas renderer. The best score goes to LocalStorage.

use wasm_bindgen::prelude::*;

use crate::best_score::{BestScoreStore, LocalStorageStore};
use crate::sim::{FrameClock, FrameSnapshot, GameEvent, GameState, Intent, TickInput, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Kong Dash starting...");
}

/// Game instance owned by the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
    store: LocalStorageStore,
    /// Events from the last frame, for the page's HUD (hit flash etc.)
    last_events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; a seed of 0 picks one from the current time
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebGame {
        let seed = if seed == 0 {
            js_sys::Date::now() as u64
        } else {
            seed
        };
        let store = LocalStorageStore;
        let best = store.load();
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            state: GameState::with_tuning(seed, Tuning::default(), best),
            clock: FrameClock::new(),
            input: TickInput::default(),
            store,
            last_events: Vec::new(),
        }
    }

    /// Queue an intent by name ("jump", "duck", "left", "right", "start", "restart")
    pub fn press(&mut self, name: &str) {
        match Intent::from_name(name) {
            Some(intent) => self.input.press(intent),
            None => log::debug!("Ignoring unknown intent '{}'", name),
        }
    }

    /// Toggle demo mode
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    /// Run one frame and return the snapshot as JSON
    pub fn frame(&mut self, timestamp_ms: f64) -> String {
        let dt = self.clock.advance(timestamp_ms);
        tick(&mut self.state, &self.input, dt);
        self.input.clear_intents();

        self.last_events = self.state.drain_events();
        for event in &self.last_events {
            if let GameEvent::NewBestScore(best) = event {
                if let Err(e) = self.store.save(*best) {
                    log::warn!("Could not save best score: {}", e);
                }
            }
        }

        FrameSnapshot::capture(&self.state).to_json()
    }

    /// Events raised by the last frame, as JSON
    pub fn events(&self) -> String {
        serde_json::to_string(&self.last_events).unwrap_or_else(|_| String::from("[]"))
    }

    /// Forget the last timestamp (call when the tab becomes visible again)
    pub fn resume(&mut self) {
        self.clock.reset();
    }
}
