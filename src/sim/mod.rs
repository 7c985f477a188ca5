//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` is one logical frame
//! - Seeded RNG only
//! - Stable iteration order (obstacles by creation id)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod score;
pub mod state;
pub mod tick;

pub use clock::GameClock;
pub use collision::{CollisionCause, bounds_collision, detect, obstacle_collision};
pub use obstacles::{Obstacle, ObstacleField};
pub use physics::Actor;
pub use score::ScoreKeeper;
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickInput, tick};
