//! Platform abstraction layer
//!
//! The simulation is platform-free; hosts drive it. Native hosts use the
//! `kong-dash` binary, the browser uses the wasm-bindgen wrapper in `web`.

#[cfg(target_arch = "wasm32")]
pub mod web;
