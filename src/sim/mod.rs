//! Simulation core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only comes in through `tick`'s dt (clamped)
//! - Seeded RNG only
//! - Stable iteration order (obstacles by spawn id)
//! - No rendering or platform dependencies

pub mod antagonist;
pub mod arc;
pub mod clock;
pub mod collision;
pub mod obstacle;
pub mod player;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use antagonist::{Antagonist, AttackPhase, AttackSignal};
pub use arc::LeapArc;
pub use clock::{FrameClock, clamp_dt};
pub use collision::{Aabb, apply_damage, resolve_obstacles};
pub use obstacle::{Obstacle, ObstacleField, ObstacleKind};
pub use player::Player;
pub use snapshot::FrameSnapshot;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Intent, TickInput, tick};
